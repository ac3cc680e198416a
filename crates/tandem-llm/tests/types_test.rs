use serde_json::json;
use tandem_llm::{Message, ToolCall};

#[test]
fn test_message_roles() {
    assert_eq!(Message::system("a").role(), "system");
    assert_eq!(Message::human("b").role(), "user");
    assert_eq!(Message::ai("c").role(), "assistant");
    assert_eq!(Message::tool_result("call_1", "d").role(), "tool");
}

#[test]
fn test_message_wire_format() {
    let msg = Message::human("What is MCP?");
    let value = serde_json::to_value(&msg).unwrap();

    assert_eq!(value, json!({"role": "user", "content": "What is MCP?"}));
}

#[test]
fn test_ai_message_omits_empty_fields() {
    let msg = Message::ai("Hello there");
    let value = serde_json::to_value(&msg).unwrap();

    assert_eq!(value["role"], "assistant");
    assert_eq!(value["content"], "Hello there");
    assert!(value.get("tool_calls").is_none());
}

#[test]
fn test_ai_message_with_tool_calls() {
    let call = ToolCall::new("call_42", "get_forecast", r#"{"latitude":37.7}"#);
    let msg = Message::ai_with_tools(vec![call]);

    let value = serde_json::to_value(&msg).unwrap();
    assert!(value.get("content").is_none());
    assert_eq!(value["tool_calls"][0]["function"]["name"], "get_forecast");
}

#[test]
fn test_tool_result_roundtrip() {
    let msg = Message::tool_result("call_42", "72F and sunny");
    let value = serde_json::to_value(&msg).unwrap();

    assert_eq!(value["role"], "tool");
    assert_eq!(value["tool_call_id"], "call_42");

    let back: Message = serde_json::from_value(value).unwrap();
    assert_eq!(back.text(), Some("72F and sunny"));
}

#[test]
fn test_tool_call_arguments_parsing() {
    let call = ToolCall::new("call_1", "search_issues", r#"{"query": "mcp servers"}"#);
    let args = call.arguments_value().unwrap();

    assert_eq!(args["query"], "mcp servers");
}

#[test]
fn test_tool_call_invalid_arguments() {
    let call = ToolCall::new("call_1", "search_issues", "not json");
    assert!(call.arguments_value().is_err());
}
