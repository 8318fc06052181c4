//! OpenRTB 2.1 bid request / bid response model with required-field
//! validation and a JSON codec.

pub mod codec;
pub mod config;
pub mod openrtb;
pub mod refs;
pub mod validation;

pub use codec::{Codec, CodecError};
pub use config::{CodecConfig, ConfigError, Settings};
pub use openrtb::{
    App, Banner, Bid, BidRequest, BidResponse, Content, Data, Device, Ext, Geo, Impression,
    Producer, Publisher, SeatBid, Segment, Site, User, Video,
};
pub use validation::{RequiredFields, ValidationError};
