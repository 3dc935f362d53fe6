use serde_json::Value;

use crate::directory::HubDirectory;
use crate::error::{InvalidInput, InvalidReason};
use crate::models::{HubRecord, ScanPayload};

/// Parse raw scanner text into a [`ScanPayload`].
///
/// Surrounding whitespace (scanners usually append CR/LF) is ignored.
pub fn parse_payload(raw: &str) -> Result<ScanPayload, InvalidInput> {
    let value: Value = serde_json::from_str(raw.trim())
        .map_err(|e| InvalidInput::new(InvalidReason::Malformed(e.to_string())))?;

    if !value.is_object() {
        return Err(InvalidInput::new(InvalidReason::Malformed(
            "not a JSON object".into(),
        )));
    }

    serde_json::from_value(value)
        .map_err(|e| InvalidInput::new(InvalidReason::BadHubId(e.to_string())))
}

/// Resolve a scanned payload against the current directory.
///
/// Malformed payloads and unknown hubs both yield [`InvalidInput`]; the
/// operator sees the same "Invalid Barcode" either way.
pub fn resolve(raw: &str, directory: &HubDirectory) -> Result<HubRecord, InvalidInput> {
    let payload = parse_payload(raw)?;
    directory
        .get(payload.destination_hub_id)
        .cloned()
        .ok_or_else(|| InvalidInput::new(InvalidReason::UnknownHub(payload.destination_hub_id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn north_only() -> HubDirectory {
        HubDirectory::from_records(vec![HubRecord {
            hub_id: 42,
            hub_name: "North Hub".into(),
            sack_code: "A".into(),
            osa_lane: "1".into(),
        }])
    }

    #[test]
    fn test_resolve_known_hub() {
        let dir = north_only();
        let record = resolve(r#"{"destination_hub_id":42}"#, &dir).unwrap();
        assert_eq!(record.hub_name, "North Hub");
        assert_eq!(record.sack_code, "A");
        assert_eq!(record.osa_lane, "1");
    }

    #[test]
    fn test_resolve_string_id_with_trailing_newline() {
        let dir = north_only();
        let record = resolve("{\"destination_hub_id\":\"42\"}\r\n", &dir).unwrap();
        assert_eq!(record.hub_id, 42);
    }

    #[test]
    fn test_resolve_integral_float_string_id() {
        let dir = north_only();
        let record = resolve(r#"{"destination_hub_id":"42.0"}"#, &dir).unwrap();
        assert_eq!(record.hub_id, 42);

        let err = resolve(r#"{"destination_hub_id":"42.5"}"#, &dir).unwrap_err();
        assert!(matches!(err.reason, InvalidReason::BadHubId(_)));
    }

    #[test]
    fn test_resolve_unknown_hub() {
        let err = resolve(r#"{"destination_hub_id":7}"#, &north_only()).unwrap_err();
        assert_eq!(err.reason, InvalidReason::UnknownHub(7));
    }

    #[test]
    fn test_resolve_not_json() {
        let err = resolve("not json", &north_only()).unwrap_err();
        assert!(matches!(err.reason, InvalidReason::Malformed(_)));
    }

    #[test]
    fn test_resolve_non_object() {
        let err = resolve("[42]", &north_only()).unwrap_err();
        assert!(matches!(err.reason, InvalidReason::Malformed(_)));
    }

    #[test]
    fn test_resolve_missing_or_bad_field() {
        let dir = north_only();
        for raw in [
            r#"{"awb":"123"}"#,
            r#"{"destination_hub_id":null}"#,
            r#"{"destination_hub_id":"north"}"#,
            r#"{"destination_hub_id":42.5}"#,
        ] {
            let err = resolve(raw, &dir).unwrap_err();
            assert!(
                matches!(err.reason, InvalidReason::BadHubId(_)),
                "{raw} gave {err}"
            );
        }
    }

    #[test]
    fn test_resolve_against_empty_directory() {
        let err = resolve(r#"{"destination_hub_id":42}"#, &HubDirectory::default()).unwrap_err();
        assert_eq!(err.reason, InvalidReason::UnknownHub(42));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let dir = north_only();
        let raw = r#"{"destination_hub_id":42}"#;
        assert_eq!(resolve(raw, &dir), resolve(raw, &dir));
        let bad = r#"{"destination_hub_id":7}"#;
        assert_eq!(resolve(bad, &dir), resolve(bad, &dir));
    }
}
