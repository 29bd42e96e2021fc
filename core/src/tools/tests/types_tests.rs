use crate::tools::types::{ToolError, ToolInput};
use crate::llm::LlmError;

#[test]
fn test_tool_input_from_object() {
    let input = ToolInput::parse(r#"{"query": "12 * 7"}"#).unwrap();
    assert_eq!(input.query, "12 * 7");
}

#[test]
fn test_tool_input_from_bare_string() {
    let input = ToolInput::parse(r#""Alan Turing""#).unwrap();
    assert_eq!(input.query, "Alan Turing");
}

#[test]
fn test_tool_input_rejects_malformed_arguments() {
    assert!(ToolInput::parse("{query: 12 * 7").is_err());
    assert!(ToolInput::parse(r#"{"expression": "12 * 7"}"#).is_err());
    assert!(ToolInput::parse("42").is_err());
}

#[test]
fn test_tool_input_schema_requires_query() {
    let schema = ToolInput::schema("what to look up");
    assert_eq!(schema["required"][0], "query");
    assert_eq!(schema["properties"]["query"]["type"], "string");
}

#[test]
fn test_llm_errors_keep_their_message() {
    let err: ToolError = LlmError::Network("connection reset".into()).into();
    assert_eq!(err.to_string(), "Network error: connection reset");
}
