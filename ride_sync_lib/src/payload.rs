use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::ride::RideRecord;

/// Body of a ride push to the sheet webhook.
///
/// `ride_data` is the ride serialized to JSON, then base64 encoded.
/// `telegram_alert` is `"true"` or `"false"`, as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RidePush {
    pub ride_data: String,
    pub telegram_alert: String,
}

impl RidePush {
    pub fn new(ride: &RideRecord, alert: bool) -> serde_json::Result<Self> {
        Ok(Self {
            ride_data: encode_ride(ride)?,
            telegram_alert: alert.to_string(),
        })
    }

    pub fn alert(&self) -> bool {
        self.telegram_alert == "true"
    }

    pub fn ride_json(&self) -> Result<String, PayloadError> {
        decode_ride_json(&self.ride_data)
    }
}

pub fn encode_ride(ride: &RideRecord) -> serde_json::Result<String> {
    let json = ride.to_json()?;
    Ok(STANDARD.encode(json.as_bytes()))
}

pub fn decode_ride_json(encoded: &str) -> Result<String, PayloadError> {
    let bytes = STANDARD.decode(encoded).map_err(PayloadError::Base64)?;
    String::from_utf8(bytes).map_err(|_| PayloadError::Utf8)
}

#[derive(Debug)]
pub enum PayloadError {
    Base64(base64::DecodeError),
    Utf8,
}

impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadError::Base64(err) => write!(f, "ride data is not valid base64: {err}"),
            PayloadError::Utf8 => f.write_str("ride data is not valid UTF-8"),
        }
    }
}

impl std::error::Error for PayloadError {}
