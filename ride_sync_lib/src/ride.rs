use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

pub const RIDE_ID: &str = "ride_id";

/// Deduplication key of a ride. The API hands out integers, but the sheet
/// may echo them back as text or as floats, so all of these are accepted.
///
/// Any integer up to `u64::MAX` is kept exactly, and an integral float is the
/// same id as the matching integer. Numbers order numerically, before all
/// strings. `7` and `"7"` are different ids.
#[derive(Debug, Clone)]
pub enum RideId {
    Number(i128),
    Decimal(f64),
    Text(String),
}

// Integral floats up to this magnitude become `Number`.
const INTEGRAL_FLOAT_LIMIT: f64 = 1e38;

impl RideId {
    /// `None` for values that cannot identify a ride: null, bools, arrays and objects.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => {
                if let Some(signed) = number.as_i64() {
                    Some(RideId::Number(signed.into()))
                } else if let Some(unsigned) = number.as_u64() {
                    Some(RideId::Number(unsigned.into()))
                } else {
                    number.as_f64().map(RideId::from_float)
                }
            }
            Value::String(text) => Some(RideId::Text(text.clone())),
            _ => None,
        }
    }

    fn from_float(value: f64) -> Self {
        if value.fract() == 0.0 && value.abs() < INTEGRAL_FLOAT_LIMIT {
            RideId::Number(value as i128)
        } else {
            RideId::Decimal(value)
        }
    }

    fn rank(&self) -> u8 {
        match self {
            RideId::Number(_) | RideId::Decimal(_) => 0,
            RideId::Text(_) => 1,
        }
    }
}

impl PartialEq for RideId {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RideId {}

impl Hash for RideId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            RideId::Number(number) => (0u8, number).hash(state),
            RideId::Decimal(decimal) => (1u8, decimal.to_bits()).hash(state),
            RideId::Text(text) => (2u8, text).hash(state),
        }
    }
}

impl Ord for RideId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (RideId::Number(a), RideId::Number(b)) => a.cmp(b),
            (RideId::Decimal(a), RideId::Decimal(b)) => a.total_cmp(b),
            // A decimal is never integral, so ties only come from rounding.
            (RideId::Number(a), RideId::Decimal(b)) => (*a as f64).total_cmp(b).then(Ordering::Less),
            (RideId::Decimal(a), RideId::Number(b)) => a.total_cmp(&(*b as f64)).then(Ordering::Greater),
            (RideId::Text(a), RideId::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for RideId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for RideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RideId::Number(number) => write!(f, "{number}"),
            RideId::Decimal(decimal) => write!(f, "{decimal}"),
            RideId::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for RideId {
    fn from(value: i64) -> Self {
        RideId::Number(value.into())
    }
}

impl From<&str> for RideId {
    fn from(value: &str) -> Self {
        RideId::Text(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecordError {
    MissingRideId,
    InvalidRideId(Value),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::MissingRideId => write!(f, "ride record has no '{RIDE_ID}' field"),
            RecordError::InvalidRideId(value) => write!(f, "'{RIDE_ID}' must be a number or a string, got {value}"),
        }
    }
}

impl std::error::Error for RecordError {}

/// One trip as reported by the rides endpoint.
///
/// Only `ride_id` is validated. Every other field is carried through untouched
/// and in its original order, so serializing the record gives back the object
/// the API sent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct RideRecord {
    ride_id: RideId,
    fields: Map<String, Value>,
}

impl RideRecord {
    pub fn ride_id(&self) -> &RideId {
        &self.ride_id
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.fields)
    }
}

impl TryFrom<Map<String, Value>> for RideRecord {
    type Error = RecordError;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let Some(raw_id) = fields.get(RIDE_ID) else {
            return Err(RecordError::MissingRideId);
        };
        let ride_id = RideId::from_value(raw_id).ok_or_else(|| RecordError::InvalidRideId(raw_id.clone()))?;

        Ok(Self { ride_id, fields })
    }
}

impl TryFrom<Value> for RideRecord {
    type Error = RecordError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => fields.try_into(),
            _ => Err(RecordError::MissingRideId),
        }
    }
}

impl Serialize for RideRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}
