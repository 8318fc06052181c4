//! OpenRTB 2.1 object model.
//!
//! Every entity is a plain owned record. Optional attributes are `Option`s
//! and are left off the wire when unset; attributes with a protocol default
//! hold that default in memory and are left off the wire while they still
//! equal it. Required attributes are `Option`s too (or `Vec`s for required
//! arrays) so that an incomplete document can still be decoded and then
//! rejected by [`RequiredFields`](crate::validation::RequiredFields) with a precise
//! location.

use std::fmt;

use serde::ser::Error as _;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::value::RawValue;

pub mod request;
pub mod response;

pub use request::{
    App, Banner, BidRequest, Content, Data, Device, Geo, Impression, Producer, Publisher, Segment,
    Site, User, Video,
};
pub use response::{Bid, BidResponse, SeatBid};

/// ISO-4217 currency assumed when a request or response does not name one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Opaque `ext` payload.
///
/// Held as the exact JSON text it was decoded from (or built with) and
/// written back unchanged, so bilateral extensions survive a
/// decode/encode cycle byte for byte. Two payloads are equal when their
/// text is equal.
#[derive(Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ext(Box<RawValue>);

impl Ext {
    /// Wrap a JSON document given as text. The text is checked for
    /// well-formedness and then kept as is.
    pub fn from_json(json: impl Into<String>) -> Result<Self, serde_json::Error> {
        RawValue::from_string(json.into()).map(Ext)
    }

    pub fn from_value<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::value::to_raw_value(value).map(Ext)
    }

    pub fn as_str(&self) -> &str {
        self.0.get()
    }

    /// Parse the payload for inspection. The stored text is not touched.
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(self.0.get())
    }
}

impl PartialEq for Ext {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl fmt::Debug for Ext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Ext").field(&self.as_str()).finish()
    }
}

impl fmt::Display for Ext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// serde `default` / `skip_serializing_if` helpers for defaulted attributes.

pub(crate) fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

pub(crate) fn is_default_currency(cur: &str) -> bool {
    cur == DEFAULT_CURRENCY
}

pub(crate) fn one() -> i64 {
    1
}

pub(crate) fn is_one(v: &i64) -> bool {
    *v == 1
}

pub(crate) fn is_zero(v: &i64) -> bool {
    *v == 0
}

pub(crate) fn is_zero_f64(v: &f64) -> bool {
    *v == 0.0
}

/// JSON has no NaN or infinity; serde_json would write `null` in their place.
pub(crate) fn finite<S: Serializer>(v: &f64, s: S) -> Result<S::Ok, S::Error> {
    if v.is_finite() {
        s.serialize_f64(*v)
    } else {
        Err(S::Error::custom(format!("{} cannot be written as a JSON number", v)))
    }
}

pub(crate) fn finite_opt<S: Serializer>(v: &Option<f64>, s: S) -> Result<S::Ok, S::Error> {
    match v {
        Some(v) => finite(v, s),
        None => s.serialize_none(),
    }
}
