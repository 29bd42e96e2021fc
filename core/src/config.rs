/// Default chat model served by Groq
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Groq exposes an OpenAI-compatible chat completions endpoint
pub const GROQ_CHAT_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

pub const WIKIPEDIA_API_URL: &str = "https://en.wikipedia.org/w/api.php";

/// Settings for the session's agent, model client and tools.
///
/// Built once when the credential gate opens and never changed afterwards.
/// Only the API key comes from the environment; everything here is a
/// compiled-in default that tests override field by field.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    pub model: String,
    pub chat_url: String,
    pub temperature: Option<f32>,
    /// Upper bound on model turns per question
    pub max_iterations: usize,
    pub wikipedia: WikipediaSettings,
}

#[derive(Debug, Clone)]
pub struct WikipediaSettings {
    pub api_url: String,
    pub top_k_results: usize,
    pub doc_content_chars_max: usize,
    pub max_query_chars: usize,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            chat_url: GROQ_CHAT_URL.to_string(),
            temperature: None,
            max_iterations: 15,
            wikipedia: WikipediaSettings::default(),
        }
    }
}

impl Default for WikipediaSettings {
    fn default() -> Self {
        Self {
            api_url: WIKIPEDIA_API_URL.to_string(),
            top_k_results: 3,
            doc_content_chars_max: 4000,
            max_query_chars: 300,
        }
    }
}

impl AssistantConfig {
    pub fn with_chat_url(mut self, url: impl Into<String>) -> Self {
        self.chat_url = url.into();
        self
    }

    pub fn with_wikipedia_url(mut self, url: impl Into<String>) -> Self {
        self.wikipedia.api_url = url.into();
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}
