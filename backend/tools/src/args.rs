//! Argument extraction helpers shared by the tool implementations.
//!
//! The dispatcher has already checked required-parameter presence against
//! each tool's schema; these helpers guard the types on top of that.

use serde_json::Value;

use abagenta_core::{AgentaError, RecordQuery};

pub fn required_str<'a>(args: &'a Value, tool: &str, name: &str) -> Result<&'a str, AgentaError> {
    args.get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| missing(tool, name))
}

pub fn required_object<'a>(args: &'a Value, tool: &str, name: &str) -> Result<&'a Value, AgentaError> {
    match args.get(name) {
        Some(value) if value.is_object() => Ok(value),
        _ => Err(missing(tool, name)),
    }
}

pub fn optional_str<'a>(args: &'a Value, name: &str) -> Option<&'a str> {
    args.get(name).and_then(Value::as_str)
}

pub fn optional_bool(args: &Value, name: &str) -> Option<bool> {
    args.get(name).and_then(Value::as_bool)
}

pub fn optional_u64(args: &Value, name: &str) -> Option<u64> {
    args.get(name).and_then(Value::as_u64)
}

/// Collect the list-operation query options present in the argument bag.
pub fn record_query(args: &Value) -> RecordQuery {
    RecordQuery {
        fields: optional_str(args, "fields").map(str::to_string),
        order: optional_str(args, "order").map(str::to_string),
        limit: optional_u64(args, "limit"),
        offset: optional_u64(args, "offset"),
        resolvetexts: optional_bool(args, "resolvetexts"),
        deletedrecords: optional_u64(args, "deletedrecords").map(|v| v as u8),
        archivedrecords: optional_u64(args, "archivedrecords").map(|v| v as u8),
    }
}

fn missing(tool: &str, name: &str) -> AgentaError {
    AgentaError::MissingParameters {
        tool: tool.to_string(),
        params: vec![name.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_query_picks_up_present_options_only() {
        let args = json!({
            "objecttype": "-54346245",
            "limit": 1,
            "resolvetexts": true,
            "deletedrecords": 3
        });
        let query = record_query(&args);
        assert_eq!(query.limit, Some(1));
        assert_eq!(query.resolvetexts, Some(true));
        assert_eq!(query.deletedrecords, Some(3));
        assert!(query.fields.is_none());
        assert!(query.offset.is_none());
    }

    #[test]
    fn required_str_rejects_wrong_types() {
        let args = json!({ "id": 42 });
        assert!(required_str(&args, "get_record", "id").is_err());
        assert!(required_str(&args, "get_record", "absent").is_err());
    }
}
