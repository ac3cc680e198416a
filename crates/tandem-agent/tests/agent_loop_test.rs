use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tandem_agent::AgentBuilder;
use tandem_llm::{ChatClient, ChatRequest, ChatResponse, ToolCall};

/// Chat client that replays a script of canned responses and records the
/// requests it received.
struct ScriptedClient {
    responses: Mutex<Vec<ChatResponse>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedClient {
    fn new(mut responses: Vec<ChatResponse>) -> Arc<Self> {
        responses.reverse();
        Arc::new(Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatClient for ScriptedClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop()
            .ok_or_else(|| anyhow::anyhow!("script exhausted"))
    }
}

fn text_response(content: &str) -> ChatResponse {
    ChatResponse {
        content: Some(content.to_string()),
        tool_calls: None,
        usage: None,
        finish_reason: Some("stop".to_string()),
    }
}

fn tool_call_response(name: &str, arguments: &str) -> ChatResponse {
    ChatResponse {
        content: None,
        tool_calls: Some(vec![ToolCall::new("call_1", name, arguments)]),
        usage: None,
        finish_reason: Some("tool_calls".to_string()),
    }
}

#[tokio::test]
async fn plain_reply_finishes_in_one_turn() {
    let client = ScriptedClient::new(vec![text_response("Paris")]);

    let agent = AgentBuilder::new()
        .chat_client(client.clone(), "gpt-4o")
        .instructions("You answer geography questions.")
        .build()
        .await
        .unwrap();

    let run = agent.run("Capital of France?").await.unwrap();

    assert_eq!(run.reply, "Paris");
    assert_eq!(run.turns, 1);
    // system + user + assistant
    assert_eq!(run.transcript.len(), 3);
    assert_eq!(run.transcript[0].role(), "system");
}

#[tokio::test]
async fn tool_failure_is_fed_back_and_run_recovers() {
    // Turn 1: the model asks for a tool no server provides. The registry
    // error must come back as a tool-result message, not abort the run.
    let client = ScriptedClient::new(vec![
        tool_call_response("get_forecast", r#"{"latitude": 37.7}"#),
        text_response("I could not reach the forecast service."),
    ]);

    let agent = AgentBuilder::new()
        .chat_client(client.clone(), "gpt-4o")
        .build()
        .await
        .unwrap();

    let run = agent.run("Weather in SF?").await.unwrap();

    assert_eq!(run.reply, "I could not reach the forecast service.");
    assert_eq!(run.turns, 2);

    // user, assistant(tool_calls), tool(error), assistant(final)
    assert_eq!(run.transcript.len(), 4);
    let tool_msg = &run.transcript[2];
    assert_eq!(tool_msg.role(), "tool");
    assert!(tool_msg.text().unwrap().contains("Tool execution failed"));
    assert!(tool_msg.text().unwrap().contains("get_forecast"));

    // The second model turn must see the tool result.
    let second_request = &client.requests()[1];
    assert_eq!(second_request.messages.len(), 3);
}

#[tokio::test]
async fn invalid_tool_arguments_become_error_results() {
    let client = ScriptedClient::new(vec![
        tool_call_response("search_code", "not json"),
        text_response("done"),
    ]);

    let agent = AgentBuilder::new()
        .chat_client(client, "gpt-4o")
        .build()
        .await
        .unwrap();

    let run = agent.run("look something up").await.unwrap();

    let tool_msg = &run.transcript[2];
    assert!(tool_msg.text().unwrap().contains("invalid tool arguments"));
    assert_eq!(run.reply, "done");
}

#[tokio::test]
async fn max_turns_guardrail_stops_runaway_loops() {
    // A model that asks for tools forever.
    let responses: Vec<ChatResponse> = (0..5)
        .map(|_| tool_call_response("get_forecast", "{}"))
        .collect();
    let client = ScriptedClient::new(responses);

    let agent = AgentBuilder::new()
        .chat_client(client, "gpt-4o")
        .max_turns(3)
        .build()
        .await
        .unwrap();

    let err = agent.run("loop forever").await.unwrap_err();
    assert!(err.to_string().contains("3 model turns"));
}

#[tokio::test]
async fn empty_model_reply_terminates_with_empty_string() {
    let client = ScriptedClient::new(vec![ChatResponse {
        content: None,
        tool_calls: None,
        usage: None,
        finish_reason: Some("stop".to_string()),
    }]);

    let agent = AgentBuilder::new()
        .chat_client(client, "gpt-4o")
        .build()
        .await
        .unwrap();

    let run = agent.run("anything").await.unwrap();
    assert_eq!(run.reply, "");
    assert_eq!(run.turns, 1);
}

#[tokio::test]
async fn no_tools_means_no_tool_options_in_request() {
    let client = ScriptedClient::new(vec![text_response("hi")]);

    let agent = AgentBuilder::new()
        .chat_client(client.clone(), "gpt-4o")
        .build()
        .await
        .unwrap();

    agent.run("hello").await.unwrap();

    let request = &client.requests()[0];
    assert!(request.options.tools.is_none());
    assert!(request.options.tool_choice.is_none());
}
