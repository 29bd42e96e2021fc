use super::{ChatCompletion, ChatRequest, LlmClient, LlmError, TokenUsage, ToolCall};
use crate::config::AssistantConfig;
use crate::credentials::ApiKey;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

/// Client for Groq's OpenAI-compatible chat completions API
pub struct GroqClient {
    http: reqwest::Client,
    api_key: ApiKey,
    model: String,
    endpoint: String,
    temperature: Option<f32>,
}

impl GroqClient {
    pub fn new(api_key: ApiKey, config: &AssistantConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model: config.model.clone(),
            endpoint: config.chat_url.clone(),
            temperature: config.temperature,
        }
    }

    fn request_body(&self, request: &ChatRequest) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": request.messages,
        });
        if !request.tools.is_empty() {
            let tools: Vec<Value> = request.tools.iter().map(|t| t.to_openai()).collect();
            body["tools"] = json!(tools);
            body["tool_choice"] = json!("auto");
        }
        if let Some(temperature) = self.temperature {
            body["temperature"] = json!(temperature);
        }
        body
    }

    async fn http_post(&self, body: &Value) -> Result<CompletionResponse, LlmError> {
        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose())
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| LlmError::Network(format!("request error: {}", e)))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            warn!("Groq returned {}", status);
            return Err(LlmError::from_status(status.as_u16(), text));
        }

        resp.json::<CompletionResponse>()
            .await
            .map_err(|e| LlmError::Decode(e.to_string()))
    }
}

#[async_trait]
impl LlmClient for GroqClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatCompletion, LlmError> {
        let body = self.request_body(&request);
        debug!(
            "Sending {} messages ({} tools) to {}",
            request.messages.len(),
            request.tools.len(),
            self.model
        );

        let resp = self.http_post(&body).await?;
        let usage = resp.usage.map(|u| TokenUsage {
            input_tokens: u.prompt_tokens as u32,
            output_tokens: u.completion_tokens as u32,
            total_tokens: u.total_tokens as u32,
        });

        let Some(choice) = resp.choices.into_iter().next() else {
            return Err(LlmError::Decode("no choices".to_string()));
        };
        let message = choice.message.unwrap_or_default();

        Ok(ChatCompletion {
            content: message.content,
            tool_calls: message.tool_calls.unwrap_or_default(),
            usage,
            finish_reason: choice.finish_reason,
        })
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Clone, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    usage: Option<UsageResponse>,
    choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
struct UsageResponse {
    prompt_tokens: i64,
    completion_tokens: i64,
    total_tokens: i64,
}

#[derive(Debug, Clone, Deserialize)]
struct Choice {
    #[serde(default)]
    finish_reason: Option<String>,
    #[serde(default)]
    message: Option<ResponseMessage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ToolCall>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::{CredentialGate, Gate};
    use crate::llm::{LlmMessage, ToolDefinition};
    use mockito::Matcher;

    fn api_key() -> ApiKey {
        match CredentialGate::evaluate(Some("gsk_test")) {
            Gate::Open(key) => key,
            Gate::Halted { .. } => unreachable!(),
        }
    }

    fn client_for(server: &mockito::ServerGuard) -> GroqClient {
        let config = AssistantConfig::default()
            .with_chat_url(format!("{}/openai/v1/chat/completions", server.url()));
        GroqClient::new(api_key(), &config)
    }

    #[tokio::test]
    async fn test_chat_parses_text_reply() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/openai/v1/chat/completions")
            .match_header("authorization", "Bearer gsk_test")
            .match_body(Matcher::PartialJson(json!({
                "model": "llama-3.3-70b-versatile"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "id": "chatcmpl-1",
                    "model": "llama-3.3-70b-versatile",
                    "choices": [{
                        "index": 0,
                        "finish_reason": "stop",
                        "message": { "role": "assistant", "content": "84" }
                    }],
                    "usage": { "prompt_tokens": 10, "completion_tokens": 2, "total_tokens": 12 }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let completion = client.chat(ChatRequest::new(vec![LlmMessage::user("12*7")])).await.unwrap();

        mock.assert_async().await;
        assert_eq!(completion.content.as_deref(), Some("84"));
        assert!(completion.tool_calls.is_empty());
        assert_eq!(completion.usage.map(|u| u.total_tokens), Some(12));
    }

    #[tokio::test]
    async fn test_chat_sends_tools_and_parses_tool_calls() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/openai/v1/chat/completions")
            .match_body(Matcher::PartialJson(json!({ "tool_choice": "auto" })))
            .with_status(200)
            .with_body(
                json!({
                    "choices": [{
                        "finish_reason": "tool_calls",
                        "message": {
                            "role": "assistant",
                            "content": null,
                            "tool_calls": [{
                                "id": "call_9",
                                "type": "function",
                                "function": { "name": "calculator", "arguments": "{\"query\":\"12 * 7\"}" }
                            }]
                        }
                    }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let request = ChatRequest::new(vec![LlmMessage::user("What is 12 * 7?")]).with_tools(vec![
            ToolDefinition {
                name: "calculator".into(),
                description: "math".into(),
                parameters: json!({"type": "object"}),
            },
        ]);
        let completion = client.chat(request).await.unwrap();

        mock.assert_async().await;
        assert!(completion.content.is_none());
        assert_eq!(completion.tool_calls.len(), 1);
        assert_eq!(completion.tool_calls[0].id, "call_9");
        assert_eq!(completion.tool_calls[0].function.name, "calculator");
    }

    #[tokio::test]
    async fn test_chat_maps_unauthorized_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/openai/v1/chat/completions")
            .with_status(401)
            .with_body("invalid api key")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .chat(ChatRequest::new(vec![LlmMessage::user("hi")]))
            .await
            .unwrap_err();
        assert_eq!(err, LlmError::Authentication("invalid api key".to_string()));
    }

    #[tokio::test]
    async fn test_complete_rejects_empty_content() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/openai/v1/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":""}}]}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.complete("hi").await.unwrap_err();
        assert_eq!(err, LlmError::EmptyResponse);
    }

    #[tokio::test]
    async fn test_chat_accepts_tool_call_without_id() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/openai/v1/chat/completions")
            .with_status(200)
            .with_body(
                json!({
                    "choices": [{
                        "message": {
                            "role": "assistant",
                            "tool_calls": [{
                                "function": { "name": "wikipedia_search", "arguments": "{\"query\":\"Ada Lovelace\"}" }
                            }]
                        }
                    }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let completion = client
            .chat(ChatRequest::new(vec![LlmMessage::user("Who was Ada Lovelace?")]))
            .await
            .unwrap();

        assert_eq!(completion.tool_calls.len(), 1);
        assert!(completion.tool_calls[0].id.is_empty());
        assert_eq!(completion.tool_calls[0].kind, "function");
        assert_eq!(completion.tool_calls[0].function.name, "wikipedia_search");
    }
}
