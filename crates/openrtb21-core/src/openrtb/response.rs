use serde::{Deserialize, Serialize};

use super::{default_currency, finite_opt, is_default_currency, Ext};

/// Bidder's answer to a [`BidRequest`](super::BidRequest).
///
/// `id` echoes the request id. At least one `seatbid` is required; a bidder
/// with nothing to offer sends an empty HTTP 204 instead of a response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub seatbid: Vec<SeatBid>,
    /// Bidder-generated response id, for logging and tracking.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bidid: Option<String>,
    #[serde(
        default = "default_currency",
        skip_serializing_if = "is_default_currency"
    )]
    pub cur: String,
    /// Opaque data the exchange stores in its cookie for the bidder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customdata: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ext: Option<Ext>,
}

impl Default for BidResponse {
    fn default() -> Self {
        Self {
            id: None,
            seatbid: Vec::new(),
            bidid: None,
            cur: default_currency(),
            customdata: None,
            ext: None,
        }
    }
}

impl BidResponse {
    pub fn new(id: impl Into<String>, seatbid: Vec<SeatBid>) -> Self {
        Self {
            id: Some(id.into()),
            seatbid,
            ..Default::default()
        }
    }
}

/// Bids from one buyer seat.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatBid {
    #[serde(default)]
    pub bid: Vec<Bid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seat: Option<String>,
    /// 1 when the bids must be won or lost as a group; unset means 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ext: Option<Ext>,
}

impl SeatBid {
    pub fn new(bid: Vec<Bid>) -> Self {
        Self {
            bid,
            ..Default::default()
        }
    }

    pub fn is_group(&self) -> bool {
        self.group.unwrap_or(0) == 1
    }
}

/// An offer to buy one impression.
///
/// `impid` names an [`Impression`](super::Impression) of the originating
/// request by value. Nothing here checks that it exists; the exchange has to
/// match it against the request it sent.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impid: Option<String>,
    /// CPM, in the response currency.
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "finite_opt")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adid: Option<String>,
    /// Win notice URL. Macros in it are substituted by the exchange.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nurl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adomain: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iurl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attr: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ext: Option<Ext>,
}

impl Bid {
    pub fn new(id: impl Into<String>, impid: impl Into<String>, price: f64) -> Self {
        Self {
            id: Some(id.into()),
            impid: Some(impid.into()),
            price: Some(price),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_response_defaults_to_usd() {
        assert_eq!(BidResponse::default().cur, "USD");
        let resp: BidResponse = serde_json::from_str(r#"{"id":"r1","seatbid":[]}"#).unwrap();
        assert_eq!(resp.cur, "USD");
    }

    #[test]
    fn usd_is_omitted_other_currencies_are_written() {
        let resp = BidResponse::new("r1", vec![SeatBid::new(vec![Bid::new("b1", "1", 1.5)])]);
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("cur").is_none());

        let resp = BidResponse {
            cur: "EUR".to_string(),
            ..resp
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["cur"], "EUR");
    }

    #[test]
    fn bid_response_structure() {
        let resp = BidResponse {
            bidid: Some("abc".to_string()),
            ..BidResponse::new(
                "r1",
                vec![SeatBid {
                    seat: Some("512".to_string()),
                    ..SeatBid::new(vec![Bid {
                        nurl: Some("https://bidder.test/win?p=${AUCTION_PRICE}".to_string()),
                        adomain: Some(vec!["advertiser.test".to_string()]),
                        attr: Some(vec![12]),
                        ..Bid::new("b1", "1", 9.43)
                    }])
                }],
            )
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["id"], "r1");
        assert_eq!(json["bidid"], "abc");
        assert_eq!(json["seatbid"][0]["seat"], "512");
        let bid = &json["seatbid"][0]["bid"][0];
        assert_eq!(bid["impid"], "1");
        assert_eq!(bid["price"], 9.43);
        assert_eq!(bid["nurl"], "https://bidder.test/win?p=${AUCTION_PRICE}");
        assert_eq!(bid["attr"][0], 12);
        assert!(bid.get("adm").is_none());
    }

    #[test]
    fn group_unset_means_independent() {
        let seat = SeatBid::default();
        assert!(seat.group.is_none());
        assert!(!seat.is_group());
        let seat = SeatBid {
            group: Some(1),
            ..seat
        };
        assert!(seat.is_group());
    }
}
