pub mod calculator_tests;
pub mod types_tests;
pub mod wikipedia_tests;

// Test utilities
use crate::config::WikipediaSettings;
use crate::llm::{LlmClient, MockLlmClient};
use std::sync::Arc;

/// Test helper to wrap a scripted client as a shared LLM handle
pub fn shared_llm(client: MockLlmClient) -> (Arc<MockLlmClient>, Arc<dyn LlmClient>) {
    let concrete = Arc::new(client);
    let shared: Arc<dyn LlmClient> = concrete.clone();
    (concrete, shared)
}

/// Test helper to point the Wikipedia tool at a mock server
pub fn wikipedia_settings(server: &mockito::ServerGuard) -> WikipediaSettings {
    WikipediaSettings {
        api_url: format!("{}/w/api.php", server.url()),
        ..WikipediaSettings::default()
    }
}
