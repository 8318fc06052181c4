//! Required-field validation.
//!
//! Validation walks the tree depth first and stops at the first required
//! attribute that is missing. Only the entities that declare required
//! attributes are visited: a request's impressions and their videos, a
//! response's seat bids and their bids. `Banner` and the context objects
//! (`Site`, `App`, `Device`, `User` and everything below them) are never
//! inspected, so an empty banner is accepted.

use std::fmt;

use crate::openrtb::{Bid, BidRequest, BidResponse, Impression, SeatBid, Video};

/// One step from the root of a document to a nested entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathStep {
    pub name: &'static str,
    /// Position within the array, for array members.
    pub index: Option<usize>,
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(i) => write!(f, "{}[{}]", self.name, i),
            None => f.write_str(self.name),
        }
    }
}

/// Location of an entity inside a request or response; empty for the root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(Vec<PathStep>);

impl FieldPath {
    pub fn steps(&self) -> &[PathStep] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

fn render_path(location: &FieldPath, field: &str) -> String {
    if location.is_root() {
        field.to_string()
    } else {
        format!("{}.{}", location, field)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required attribute is absent, or a required array is empty.
    #[error(
        "required field missing: {entity}.{field} (at `{path}`)",
        path = render_path(.location, .field)
    )]
    MissingField {
        entity: &'static str,
        field: &'static str,
        location: FieldPath,
    },
}

impl ValidationError {
    fn missing(entity: &'static str, field: &'static str) -> Self {
        ValidationError::MissingField {
            entity,
            field,
            location: FieldPath::default(),
        }
    }

    /// Record that the failing entity sits under `name[index]` of its parent.
    fn within(self, name: &'static str, index: Option<usize>) -> Self {
        match self {
            ValidationError::MissingField {
                entity,
                field,
                mut location,
            } => {
                location.0.insert(0, PathStep { name, index });
                ValidationError::MissingField {
                    entity,
                    field,
                    location,
                }
            }
        }
    }

    /// Entity type owning the missing attribute, e.g. `"Video"`.
    pub fn entity(&self) -> &'static str {
        match self {
            ValidationError::MissingField { entity, .. } => *entity,
        }
    }

    /// Wire name of the missing attribute.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField { field, .. } => *field,
        }
    }

    pub fn location(&self) -> &FieldPath {
        match self {
            ValidationError::MissingField { location, .. } => location,
        }
    }

    /// Full dotted path to the missing attribute, e.g. `seatbid[0].bid[1].price`.
    pub fn path(&self) -> String {
        render_path(self.location(), self.field())
    }
}

pub trait RequiredFields {
    /// Ok when every required attribute reachable from `self` is present,
    /// otherwise the first missing one in declaration order.
    fn validate(&self) -> Result<(), ValidationError>;
}

fn require(
    present: bool,
    entity: &'static str,
    field: &'static str,
) -> Result<(), ValidationError> {
    if present {
        Ok(())
    } else {
        Err(ValidationError::missing(entity, field))
    }
}

impl RequiredFields for BidRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        require(self.id.is_some(), "BidRequest", "id")?;
        require(!self.imp.is_empty(), "BidRequest", "imp")?;
        for (i, imp) in self.imp.iter().enumerate() {
            imp.validate().map_err(|e| e.within("imp", Some(i)))?;
        }
        Ok(())
    }
}

impl RequiredFields for Impression {
    fn validate(&self) -> Result<(), ValidationError> {
        require(self.id.is_some(), "Impression", "id")?;
        // Banner declares no required attributes and is not visited.
        if let Some(video) = &self.video {
            video.validate().map_err(|e| e.within("video", None))?;
        }
        Ok(())
    }
}

impl RequiredFields for Video {
    fn validate(&self) -> Result<(), ValidationError> {
        require(!self.mimes.is_empty(), "Video", "mimes")?;
        require(self.linearity.is_some(), "Video", "linearity")?;
        require(self.minduration.is_some(), "Video", "minduration")?;
        require(self.maxduration.is_some(), "Video", "maxduration")?;
        require(self.protocol.is_some(), "Video", "protocol")
    }
}

impl RequiredFields for BidResponse {
    fn validate(&self) -> Result<(), ValidationError> {
        require(self.id.is_some(), "BidResponse", "id")?;
        require(!self.seatbid.is_empty(), "BidResponse", "seatbid")?;
        for (i, seatbid) in self.seatbid.iter().enumerate() {
            seatbid.validate().map_err(|e| e.within("seatbid", Some(i)))?;
        }
        Ok(())
    }
}

impl RequiredFields for SeatBid {
    fn validate(&self) -> Result<(), ValidationError> {
        require(!self.bid.is_empty(), "SeatBid", "bid")?;
        for (i, bid) in self.bid.iter().enumerate() {
            bid.validate().map_err(|e| e.within("bid", Some(i)))?;
        }
        Ok(())
    }
}

impl RequiredFields for Bid {
    fn validate(&self) -> Result<(), ValidationError> {
        require(self.id.is_some(), "Bid", "id")?;
        require(self.impid.is_some(), "Bid", "impid")?;
        // NaN and infinity have no JSON form, so they count as absent.
        require(self.price.is_some_and(f64::is_finite), "Bid", "price")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openrtb::{App, Banner, Device, Site, User};
    use crate::refs::{VideoBidResponseProtocol, VideoLinearity};

    fn video() -> Video {
        Video::new(
            vec!["video/mp4".to_string()],
            VideoLinearity::Linear.code(),
            5,
            30,
            VideoBidResponseProtocol::Vast2.code(),
        )
    }

    fn banner_request() -> BidRequest {
        BidRequest::new(
            "r1",
            vec![Impression::with_banner(
                "1",
                Banner {
                    w: Some(300),
                    h: Some(250),
                    ..Default::default()
                },
            )],
        )
    }

    #[test]
    fn banner_request_is_valid() {
        assert_eq!(banner_request().validate(), Ok(()));
    }

    #[test]
    fn request_without_id_fails_on_id() {
        let req = BidRequest {
            id: None,
            ..banner_request()
        };
        let err = req.validate().unwrap_err();
        assert_eq!(err.entity(), "BidRequest");
        assert_eq!(err.field(), "id");
        assert!(err.location().is_root());
    }

    #[test]
    fn request_without_impressions_fails_on_imp() {
        let err = BidRequest::new("r1", vec![]).validate().unwrap_err();
        assert_eq!(err.field(), "imp");
        assert_eq!(err.path(), "imp");
    }

    #[test]
    fn id_is_checked_before_imp() {
        let err = BidRequest::default().validate().unwrap_err();
        assert_eq!(err.field(), "id");
    }

    #[test]
    fn impression_without_id_reports_index() {
        let mut req = banner_request();
        req.imp.push(Impression::default());
        let err = req.validate().unwrap_err();
        assert_eq!(err.entity(), "Impression");
        assert_eq!(err.field(), "id");
        assert_eq!(err.path(), "imp[1].id");
        assert_eq!(
            err.location().steps(),
            &[PathStep {
                name: "imp",
                index: Some(1)
            }]
        );
    }

    #[test]
    fn empty_banner_is_accepted() {
        let req = BidRequest::new("r1", vec![Impression::with_banner("1", Banner::default())]);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn impression_with_neither_banner_nor_video_is_accepted() {
        let req = BidRequest::new("r1", vec![Impression::new("1")]);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn complete_video_is_accepted() {
        let req = BidRequest::new("r1", vec![Impression::with_video("1", video())]);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn each_missing_video_field_is_reported() {
        let cases: [(&str, fn(&mut Video)); 5] = [
            ("mimes", |v| v.mimes.clear()),
            ("linearity", |v| v.linearity = None),
            ("minduration", |v| v.minduration = None),
            ("maxduration", |v| v.maxduration = None),
            ("protocol", |v| v.protocol = None),
        ];
        for (field, strip) in cases {
            let mut v = video();
            strip(&mut v);
            let req = BidRequest::new("r1", vec![Impression::with_video("7", v)]);
            let err = req.validate().unwrap_err();
            assert_eq!(err.entity(), "Video", "stripped {}", field);
            assert_eq!(err.field(), field);
            assert_eq!(err.path(), format!("imp[0].video.{}", field));
        }
    }

    #[test]
    fn video_fields_are_checked_in_declaration_order() {
        let req = BidRequest::new("r1", vec![Impression::with_video("1", Video::default())]);
        assert_eq!(req.validate().unwrap_err().field(), "mimes");

        let partial = Video {
            mimes: vec!["video/mp4".to_string()],
            maxduration: Some(30),
            ..Default::default()
        };
        let req = BidRequest::new("r1", vec![Impression::with_video("1", partial)]);
        assert_eq!(req.validate().unwrap_err().field(), "linearity");
    }

    #[test]
    fn first_failing_impression_wins() {
        let broken_video = Video {
            protocol: None,
            ..video()
        };
        let req = BidRequest::new(
            "r1",
            vec![
                Impression::new("1"),
                Impression::with_video("2", broken_video),
                Impression::default(),
            ],
        );
        let err = req.validate().unwrap_err();
        assert_eq!(err.path(), "imp[1].video.protocol");
    }

    #[test]
    fn context_objects_are_not_inspected() {
        let req = BidRequest {
            site: Some(Site::default()),
            app: Some(App::default()),
            device: Some(Device::default()),
            user: Some(User::default()),
            ..banner_request()
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn empty_string_id_counts_as_present() {
        let req = BidRequest::new("", vec![Impression::new("")]);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn response_bid_without_price_fails_on_price() {
        let resp = BidResponse::new(
            "r1",
            vec![SeatBid::new(vec![Bid {
                id: Some("b1".to_string()),
                impid: Some("1".to_string()),
                ..Default::default()
            }])],
        );
        let err = resp.validate().unwrap_err();
        assert_eq!(err.entity(), "Bid");
        assert_eq!(err.field(), "price");
        assert_eq!(err.path(), "seatbid[0].bid[0].price");
    }

    #[test]
    fn response_checks_id_seatbid_bid_in_order() {
        assert_eq!(BidResponse::default().validate().unwrap_err().field(), "id");
        assert_eq!(
            BidResponse::new("r1", vec![]).validate().unwrap_err().path(),
            "seatbid"
        );
        let err = BidResponse::new(
            "r1",
            vec![SeatBid::new(vec![Bid::new("b1", "1", 1.0)]), SeatBid::default()],
        )
        .validate()
        .unwrap_err();
        assert_eq!(err.entity(), "SeatBid");
        assert_eq!(err.path(), "seatbid[1].bid");

        let err = BidResponse::new(
            "r1",
            vec![SeatBid::new(vec![Bid::new("b1", "1", 1.0), Bid::default()])],
        )
        .validate()
        .unwrap_err();
        assert_eq!(err.path(), "seatbid[0].bid[1].id");
    }

    #[test]
    fn bid_checks_id_impid_price_in_order() {
        let bid = Bid {
            price: Some(1.0),
            ..Default::default()
        };
        assert_eq!(bid.validate().unwrap_err().field(), "id");
        let bid = Bid {
            id: Some("b1".to_string()),
            ..bid
        };
        assert_eq!(bid.validate().unwrap_err().field(), "impid");
    }

    #[test]
    fn valid_response() {
        let resp = BidResponse::new("r1", vec![SeatBid::new(vec![Bid::new("b1", "1", 0.0)])]);
        assert!(resp.validate().is_ok());
    }

    #[test]
    fn non_finite_price_counts_as_missing() {
        for price in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let resp = BidResponse::new("r1", vec![SeatBid::new(vec![Bid::new("b1", "1", price)])]);
            let err = resp.validate().unwrap_err();
            assert_eq!(err.path(), "seatbid[0].bid[0].price");
        }
    }

    #[test]
    fn validation_is_idempotent() {
        let req = BidRequest::new("r1", vec![Impression::default()]);
        let first = req.validate();
        let second = req.validate();
        assert_eq!(first, second);
        assert!(first.is_err());
    }

    #[test]
    fn error_message_names_entity_field_and_path() {
        let req = BidRequest::new(
            "r1",
            vec![Impression::with_video(
                "1",
                Video {
                    minduration: None,
                    ..video()
                },
            )],
        );
        let err = req.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "required field missing: Video.minduration (at `imp[0].video.minduration`)"
        );
        let err = BidRequest::new("r1", vec![]).validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "required field missing: BidRequest.imp (at `imp`)"
        );
    }
}
