//! JSON boundary for requests and responses.
//!
//! Encoding always validates first, so nothing with a missing required
//! attribute leaves the process. Decoding validates when
//! [`CodecConfig::validate_on_decode`] is set.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::CodecConfig;
use crate::openrtb::{BidRequest, BidResponse};
use crate::validation::{RequiredFields, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("document is {len} bytes, limit is {limit}")]
    TooLarge { len: usize, limit: usize },
    #[error("malformed document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid document: {0}")]
    Invalid(#[from] ValidationError),
}

#[derive(Debug, Clone, Default)]
pub struct Codec {
    config: CodecConfig,
}

fn warn_site_and_app(req: &BidRequest) {
    if req.site.is_some() && req.app.is_some() {
        log::warn!(
            "bid request {:?} carries both site and app; passing it through",
            req.id
        );
    }
}

impl Codec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn decode_request(&self, bytes: &[u8]) -> Result<BidRequest, CodecError> {
        let req: BidRequest = self.decode(bytes)?;
        warn_site_and_app(&req);
        if self.config.validate_on_decode {
            req.validate().inspect_err(|e| {
                log::warn!("rejecting bid request {:?}: {}", req.id, e);
            })?;
        }
        log::debug!("decoded bid request id={:?}, imps={}", req.id, req.imp.len());
        Ok(req)
    }

    pub fn decode_response(&self, bytes: &[u8]) -> Result<BidResponse, CodecError> {
        let resp: BidResponse = self.decode(bytes)?;
        if self.config.validate_on_decode {
            resp.validate().inspect_err(|e| {
                log::warn!("rejecting bid response {:?}: {}", resp.id, e);
            })?;
        }
        log::debug!(
            "decoded bid response id={:?}, seatbids={}",
            resp.id,
            resp.seatbid.len()
        );
        Ok(resp)
    }

    pub fn encode_request(&self, req: &BidRequest) -> Result<String, CodecError> {
        req.validate().inspect_err(|e| {
            log::warn!("refusing to send bid request {:?}: {}", req.id, e);
        })?;
        warn_site_and_app(req);
        let body = self.encode(req)?;
        log::debug!(
            "encoded bid request id={:?}, imps={}, bytes={}",
            req.id,
            req.imp.len(),
            body.len()
        );
        Ok(body)
    }

    pub fn encode_response(&self, resp: &BidResponse) -> Result<String, CodecError> {
        resp.validate().inspect_err(|e| {
            log::warn!("refusing to send bid response {:?}: {}", resp.id, e);
        })?;
        let body = self.encode(resp)?;
        log::debug!(
            "encoded bid response id={:?}, seatbids={}, bytes={}",
            resp.id,
            resp.seatbid.len(),
            body.len()
        );
        Ok(body)
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        let limit = self.config.max_document_bytes;
        if bytes.len() > limit {
            log::warn!("document of {} bytes exceeds limit of {}", bytes.len(), limit);
            return Err(CodecError::TooLarge {
                len: bytes.len(),
                limit,
            });
        }
        serde_json::from_slice(bytes).map_err(|e| {
            log::warn!("malformed document: {}", e);
            CodecError::Json(e)
        })
    }

    fn encode<T: Serialize>(&self, value: &T) -> Result<String, CodecError> {
        let body = if self.config.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(body)
    }
}
