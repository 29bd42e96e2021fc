//! Terminal user interface for the Math & Knowledge Assistant: credential
//! screen, chat transcript, reasoning panel and question input.

pub mod app;
pub mod components;
pub mod handlers;
pub mod markdown;
pub mod state;
pub mod utils;

// Re-export main types for convenience
pub use app::App;
pub use state::AppState;
