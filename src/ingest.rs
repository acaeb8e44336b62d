//! Payload validation and normalization.
//!
//! Turns raw input text into a typed [`TracePayload`] or a structured
//! error. Two failure kinds exist, both terminal for the submission:
//! a parse error when the text is not well-formed JSON, and a schema
//! error when the JSON does not match the Apollo Tracing shape.

use crate::core::{Result, TraceLensError, TracePayload};
use once_cell::sync::Lazy;
use serde_json::Value;

static DEMO_PAYLOAD: Lazy<TracePayload> = Lazy::new(|| {
    parse_payload(include_str!("demo_trace.json")).expect("embedded demo trace is valid")
});

/// Returns the demo payload compiled into the binary.
pub fn demo_payload() -> &'static TracePayload {
    &DEMO_PAYLOAD
}

/// Parses raw input text into a typed tracing payload.
///
/// Input may arrive as a bare payload, wrapped in `{"tracing": ...}`,
/// or as a whole GraphQL response carrying
/// `{"extensions": {"tracing": ...}}` — the usual shape when pasting a
/// server response. The wrapper is resolved by ordered fallback before
/// the typed deserialization runs, so downstream code never sees it.
pub fn parse_payload(input: &str) -> Result<TracePayload> {
    let value: Value =
        serde_json::from_str(input).map_err(|e| TraceLensError::parse(e.to_string()))?;

    let inner = unwrap_payload(value);

    let payload: TracePayload =
        serde_json::from_value(inner).map_err(|e| TraceLensError::schema(e.to_string()))?;

    tracing::debug!(
        resolvers = payload.resolver_count(),
        duration_ms = payload.duration_ms(),
        "validated tracing payload"
    );

    Ok(payload)
}

/// Ordered-fallback extraction of the tracing object:
/// `extensions.tracing`, then `tracing`, then the value itself.
fn unwrap_payload(mut value: Value) -> Value {
    if let Some(inner) = value
        .get_mut("extensions")
        .and_then(|e| e.get_mut("tracing"))
        .filter(|v| !v.is_null())
    {
        tracing::debug!("unwrapped payload from extensions.tracing");
        return inner.take();
    }

    if let Some(inner) = value.get_mut("tracing").filter(|v| !v.is_null()) {
        tracing::debug!("unwrapped payload from tracing");
        return inner.take();
    }

    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BARE: &str = r#"{
        "duration": 100000000,
        "execution": {
            "resolvers": [
                {
                    "path": ["hero"],
                    "parentType": "Query",
                    "fieldName": "hero",
                    "returnType": "Character",
                    "startOffset": 1000,
                    "duration": 50000000
                }
            ]
        }
    }"#;

    #[test]
    fn test_parses_bare_payload() {
        let payload = parse_payload(BARE).unwrap();
        assert_eq!(payload.duration, 100_000_000);
        assert_eq!(payload.resolver_count(), 1);
        assert_eq!(payload.execution.resolvers[0].field_name, "hero");
    }

    #[test]
    fn test_all_wrappings_parse_identically() {
        let bare = parse_payload(BARE).unwrap();
        let tracing_wrapped = parse_payload(&format!(r#"{{"tracing": {}}}"#, BARE)).unwrap();
        let extensions_wrapped =
            parse_payload(&format!(r#"{{"extensions": {{"tracing": {}}}}}"#, BARE)).unwrap();

        assert_eq!(bare, tracing_wrapped);
        assert_eq!(bare, extensions_wrapped);
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let err = parse_payload("{not json").unwrap_err();
        assert!(matches!(err, TraceLensError::Parse { .. }));
        assert_eq!(err.category(), "parse");
    }

    #[test]
    fn test_missing_execution_is_a_schema_error() {
        let err = parse_payload(r#"{"duration": 5}"#).unwrap_err();
        assert!(matches!(err, TraceLensError::Schema(_)));
    }

    #[test]
    fn test_negative_duration_is_a_schema_error() {
        let input = r#"{
            "duration": -1,
            "execution": {"resolvers": []}
        }"#;
        assert!(matches!(
            parse_payload(input),
            Err(TraceLensError::Schema(_))
        ));
    }

    #[test]
    fn test_bad_start_time_is_a_schema_error() {
        let input = r#"{
            "startTime": "not a timestamp",
            "duration": 5,
            "execution": {"resolvers": []}
        }"#;
        assert!(matches!(
            parse_payload(input),
            Err(TraceLensError::Schema(_))
        ));
    }

    #[test]
    fn test_null_tracing_key_falls_through_to_bare() {
        // a payload that happens to sit next to a null `tracing` key
        let input = r#"{"tracing": null, "duration": 5, "execution": {"resolvers": []}}"#;
        let payload = parse_payload(input).unwrap();
        assert_eq!(payload.duration, 5);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let input = r#"{
            "duration": 5,
            "execution": {"resolvers": []},
            "somethingElse": {"nested": true}
        }"#;
        assert!(parse_payload(input).is_ok());
    }

    #[test]
    fn test_zero_resolvers_is_valid() {
        let payload = parse_payload(r#"{"duration": 0, "execution": {"resolvers": []}}"#).unwrap();
        assert_eq!(payload.resolver_count(), 0);
    }

    #[test]
    fn test_demo_payload_is_usable() {
        let payload = demo_payload();
        assert!(payload.resolver_count() > 0);
        assert!(payload.parsing.is_some());
        assert!(payload.validation.is_some());
    }
}
