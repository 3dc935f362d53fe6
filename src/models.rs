use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Integer identifier of a destination hub.
pub type HubId = i64;

// ---------------------------------------------------------------------------
// Hub records
// ---------------------------------------------------------------------------

/// One row of the hub sheet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HubRecord {
    #[serde(rename = "Shipment Destination Hub ID", deserialize_with = "hub_id")]
    pub hub_id: HubId,
    #[serde(rename = "Shipment Destination Hub Name", deserialize_with = "text")]
    pub hub_name: String,
    #[serde(rename = "Sack Segregation", deserialize_with = "text")]
    pub sack_code: String,
    #[serde(rename = "OSA lane", deserialize_with = "text")]
    pub osa_lane: String,
}

// ---------------------------------------------------------------------------
// Scan payloads
// ---------------------------------------------------------------------------

/// The part of a scanned shipment label this crate cares about.  Any other
/// keys in the payload (AWB number, origin, ...) are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ScanPayload {
    #[serde(deserialize_with = "hub_id")]
    pub destination_hub_id: HubId,
}

// ---------------------------------------------------------------------------
// Sack lanes
// ---------------------------------------------------------------------------

/// Conveyor lane family, taken from the first letter of a sack code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SackLane {
    A,
    B,
    C,
    D,
    Other,
}

/// Classify a sack segregation code (or OSA lane) by its first character.
pub fn sack_lane(code: &str) -> SackLane {
    match code.chars().next() {
        Some('A') => SackLane::A,
        Some('B') => SackLane::B,
        Some('C') => SackLane::C,
        Some('D') => SackLane::D,
        _ => SackLane::Other,
    }
}

// ---------------------------------------------------------------------------
// Lenient field coercion
// ---------------------------------------------------------------------------

/// Coerce a JSON value into a hub id.
///
/// Accepts integers, integral floats and strings holding an integer.
pub(crate) fn coerce_hub_id(value: &Value) -> Result<HubId, String> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            n.as_f64()
                .and_then(integral)
                .ok_or_else(|| format!("{n} is not an integer"))
        }
        Value::String(s) => {
            let trimmed = s.trim();
            if let Ok(i) = trimmed.parse::<HubId>() {
                return Ok(i);
            }
            trimmed
                .parse::<f64>()
                .ok()
                .and_then(integral)
                .ok_or_else(|| format!("{s:?} is not an integer"))
        }
        other => Err(format!("expected integer, found {}", kind(other))),
    }
}

/// `Some` for finite whole numbers that fit a hub id.
fn integral(f: f64) -> Option<HubId> {
    (f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64).then_some(f as HubId)
}

fn coerce_text(value: &Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(format!("expected text, found {}", kind(other))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn hub_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<HubId, D::Error> {
    let value = Value::deserialize(deserializer)?;
    coerce_hub_id(&value).map_err(serde::de::Error::custom)
}

fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    coerce_text(&value).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_from_sheet_row() {
        let row = json!({
            "Shipment Destination Hub ID": 42,
            "Shipment Destination Hub Name": "North Hub",
            "Sack Segregation": "A",
            "OSA lane": "1"
        });
        let record: HubRecord = serde_json::from_value(row).unwrap();
        assert_eq!(record.hub_id, 42);
        assert_eq!(record.hub_name, "North Hub");
        assert_eq!(record.sack_code, "A");
        assert_eq!(record.osa_lane, "1");
    }

    #[test]
    fn test_record_coerces_spreadsheet_numbers() {
        let row = json!({
            "Shipment Destination Hub ID": "17",
            "Shipment Destination Hub Name": "South",
            "Sack Segregation": "B",
            "OSA lane": 3
        });
        let record: HubRecord = serde_json::from_value(row).unwrap();
        assert_eq!(record.hub_id, 17);
        assert_eq!(record.osa_lane, "3");
    }

    #[test]
    fn test_record_missing_field_fails() {
        let row = json!({
            "Shipment Destination Hub ID": 1,
            "Shipment Destination Hub Name": "East",
            "Sack Segregation": "C"
        });
        assert!(serde_json::from_value::<HubRecord>(row).is_err());
    }

    #[test]
    fn test_record_null_name_fails() {
        let row = json!({
            "Shipment Destination Hub ID": 1,
            "Shipment Destination Hub Name": null,
            "Sack Segregation": "C",
            "OSA lane": "2"
        });
        assert!(serde_json::from_value::<HubRecord>(row).is_err());
    }

    #[test]
    fn test_coerce_hub_id() {
        assert_eq!(coerce_hub_id(&json!(42)), Ok(42));
        assert_eq!(coerce_hub_id(&json!(42.0)), Ok(42));
        assert_eq!(coerce_hub_id(&json!(" 42 ")), Ok(42));
        assert_eq!(coerce_hub_id(&json!("42.0")), Ok(42));
        assert!(coerce_hub_id(&json!(42.5)).is_err());
        assert!(coerce_hub_id(&json!("42.5")).is_err());
        assert!(coerce_hub_id(&json!("NaN")).is_err());
        assert!(coerce_hub_id(&json!("inf")).is_err());
        assert!(coerce_hub_id(&json!("north")).is_err());
        assert!(coerce_hub_id(&json!(null)).is_err());
        assert!(coerce_hub_id(&json!([42])).is_err());
    }

    #[test]
    fn test_payload_ignores_extra_keys() {
        let payload: ScanPayload =
            serde_json::from_str(r#"{"awb":"1234567890","destination_hub_id":"7"}"#).unwrap();
        assert_eq!(payload.destination_hub_id, 7);
    }

    #[test]
    fn test_sack_lane() {
        assert_eq!(sack_lane("A"), SackLane::A);
        assert_eq!(sack_lane("B2"), SackLane::B);
        assert_eq!(sack_lane("C"), SackLane::C);
        assert_eq!(sack_lane("D"), SackLane::D);
        assert_eq!(sack_lane("a"), SackLane::Other);
        assert_eq!(sack_lane(""), SackLane::Other);
    }
}
