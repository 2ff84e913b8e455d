use std::fmt;

use serde::Deserialize;

/// Characters dropped from the front of `scooter.display_id` to get the id
/// the rides endpoint expects.
pub const DISPLAY_ID_PREFIX_LEN: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayId(String);

impl DisplayId {
    /// Strips the fixed prefix. Returns `None` when nothing is left.
    pub fn from_raw(raw: &str) -> Option<Self> {
        let stripped: String = raw.chars().skip(DISPLAY_ID_PREFIX_LEN).collect();
        if stripped.is_empty() {
            None
        } else {
            Some(Self(stripped))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The part of a trip log entry needed to identify the scooter.
#[derive(Debug, Clone, Deserialize)]
pub struct TripLog {
    pub scooter: TripLogScooter,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TripLogScooter {
    pub display_id: String,
}

impl TripLog {
    pub fn display_id(&self) -> Option<DisplayId> {
        DisplayId::from_raw(&self.scooter.display_id)
    }
}

#[test]
fn test_display_id_prefix() {
    assert_eq!(DisplayId::from_raw("S-450X01").unwrap().as_str(), "450X01");
    assert_eq!(DisplayId::from_raw("ÅÄ12").unwrap().as_str(), "12");
    assert_eq!(DisplayId::from_raw("AB"), None);
    assert_eq!(DisplayId::from_raw("A"), None);

    let log: TripLog = serde_json::from_str(r#"{"id": 9, "scooter": {"display_id": "XX1234", "model": "450"}}"#).unwrap();
    assert_eq!(log.display_id(), Some(DisplayId("1234".into())));
}
