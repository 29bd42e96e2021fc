use std::fmt;

/// Environment variable holding the Groq API key
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

pub const MISSING_KEY_NOTICE: &str = "Please provide your Groq API Key to continue.";

/// Secret used to authenticate against the chat completions API
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Outcome of checking the user-supplied credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    Open(ApiKey),
    /// No usable key; nothing downstream may be built
    Halted { notice: &'static str },
}

impl Gate {
    pub fn is_open(&self) -> bool {
        matches!(self, Gate::Open(_))
    }
}

pub struct CredentialGate;

impl CredentialGate {
    /// Check a raw credential value. Blank input halts.
    pub fn evaluate(raw: Option<&str>) -> Gate {
        match raw.map(str::trim) {
            Some(key) if !key.is_empty() => Gate::Open(ApiKey(key.to_string())),
            _ => Gate::Halted {
                notice: MISSING_KEY_NOTICE,
            },
        }
    }

    /// Check the key supplied through `GROQ_API_KEY`
    pub fn from_env() -> Gate {
        let value = std::env::var(API_KEY_ENV).ok();
        Self::evaluate(value.as_deref())
    }
}
