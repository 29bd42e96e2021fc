pub mod types;
pub mod registry;
pub mod executors;

#[cfg(test)]
pub mod tests;

pub use types::*;
pub use registry::ToolRegistry;
