//! OpenRTB 2.1 reference tables (section 6 of the 2.1 API document).
//!
//! Entity fields store the raw integer code, so a value outside a table is
//! still accepted; exchanges are free to use their own codes. The enums here
//! are for callers that want to build or interpret those codes by name.

use serde_repr::{Deserialize_repr, Serialize_repr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{code} is not a known {table} code")]
pub struct UnknownCode {
    pub table: &'static str,
    pub code: i64,
}

macro_rules! code_table {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $code:expr),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i64)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $code),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn code(self) -> i64 {
                self as i64
            }

            pub fn from_code(code: i64) -> Option<Self> {
                Self::ALL.iter().copied().find(|v| v.code() == code)
            }

            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> i64 {
                value.code()
            }
        }

        impl TryFrom<i64> for $name {
            type Error = UnknownCode;

            fn try_from(code: i64) -> Result<Self, Self::Error> {
                Self::from_code(code).ok_or(UnknownCode {
                    table: stringify!($name),
                    code,
                })
            }
        }
    };
}

code_table! {
    /// `BidRequest.at`.
    AuctionType {
        FirstPrice = 1,
        SecondPrice = 2,
    }
}

impl AuctionType {
    /// Codes from here up are reserved for exchange business rules.
    pub const EXCHANGE_SPECIFIC_MIN: i64 = 500;

    pub fn is_exchange_specific(code: i64) -> bool {
        code >= Self::EXCHANGE_SPECIFIC_MIN
    }
}

code_table! {
    /// `Banner.btype`: banner ad types to block.
    BannerAdType {
        XhtmlTextAd = 1,
        XhtmlBannerAd = 2,
        JavascriptAd = 3,
        Iframe = 4,
    }
}

code_table! {
    /// `battr` / `Bid.attr`.
    CreativeAttribute {
        AudioAdAutoPlay = 1,
        AudioAdUserInitiated = 2,
        ExpandableAutomatic = 3,
        ExpandableUserInitiatedClick = 4,
        ExpandableUserInitiatedRollover = 5,
        InBannerVideoAdAutoPlay = 6,
        InBannerVideoAdUserInitiated = 7,
        Pop = 8,
        ProvocativeOrSuggestiveImagery = 9,
        ShakyFlashingFlickeringExtremeAnimationSmileys = 10,
        Surveys = 11,
        TextOnly = 12,
        UserInteractive = 13,
        WindowsDialogOrAlertStyle = 14,
        HasAudioOnOffButton = 15,
        AdCanBeSkipped = 16,
    }
}

code_table! {
    /// `api` on `Banner` and `Video`.
    ApiFramework {
        Vpaid1 = 1,
        Vpaid2 = 2,
        Mraid = 3,
        Ormma = 4,
    }
}

code_table! {
    /// `pos` on `Banner` and `Video`.
    AdPosition {
        Unknown = 0,
        AboveTheFold = 1,
        /// May or may not be initially visible depending on screen size.
        Deprecated = 2,
        BelowTheFold = 3,
        Header = 4,
        Footer = 5,
        Sidebar = 6,
        Fullscreen = 7,
    }
}

code_table! {
    /// `Video.linearity`.
    VideoLinearity {
        /// In-stream: pre-roll, mid-roll, post-roll.
        Linear = 1,
        /// Overlay.
        NonLinear = 2,
    }
}

code_table! {
    /// `Video.protocol`.
    VideoBidResponseProtocol {
        Vast1 = 1,
        Vast2 = 2,
        Vast3 = 3,
        Vast1Wrapper = 4,
        Vast2Wrapper = 5,
        Vast3Wrapper = 6,
    }
}

code_table! {
    /// `Video.playbackmethod`.
    VideoPlaybackMethod {
        AutoPlaySoundOn = 1,
        AutoPlaySoundOff = 2,
        ClickToPlay = 3,
        MouseOver = 4,
    }
}

code_table! {
    /// `Video.startdelay`. Values above zero are mid-roll offsets in seconds.
    VideoStartDelay {
        PreRoll = 0,
        GenericMidRoll = -1,
        GenericPostRoll = -2,
    }
}

code_table! {
    /// `Device.connectiontype`.
    ConnectionType {
        Unknown = 0,
        Ethernet = 1,
        Wifi = 2,
        CellularUnknownGeneration = 3,
        Cellular2g = 4,
        Cellular3g = 5,
        Cellular4g = 6,
    }
}

code_table! {
    /// `Banner.expdir`.
    ExpandableDirection {
        Left = 1,
        Right = 2,
        Up = 3,
        Down = 4,
        Fullscreen = 5,
    }
}

code_table! {
    /// `Video.delivery`.
    ContentDeliveryMethod {
        Streaming = 1,
        Progressive = 2,
    }
}

code_table! {
    /// `Content.context`.
    ContentContext {
        Video = 1,
        Game = 2,
        Music = 3,
        Application = 4,
        Text = 5,
        Other = 6,
        Unknown = 7,
    }
}

code_table! {
    /// `Content.videoquality`.
    VideoQuality {
        Unknown = 0,
        ProfessionallyProduced = 1,
        Prosumer = 2,
        UserGenerated = 3,
    }
}

code_table! {
    /// `Geo.type`.
    LocationType {
        /// GPS or other location services.
        LocationServices = 1,
        IpAddress = 2,
        UserProvided = 3,
    }
}

code_table! {
    /// `Device.devicetype`.
    DeviceType {
        Mobile = 1,
        PersonalComputer = 2,
        ConnectedTv = 3,
    }
}

code_table! {
    /// `Video.companiontype`.
    VastCompanionType {
        StaticResource = 1,
        HtmlResource = 2,
        IframeResource = 3,
    }
}

code_table! {
    /// `Content.qagmediarating`.
    QagMediaRating {
        AllAudiences = 1,
        EveryoneOver12 = 2,
        MatureAudiences = 3,
    }
}
