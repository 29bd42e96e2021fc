pub mod calculator;
pub mod expr;
pub mod reasoning;
pub mod wikipedia;

pub use calculator::*;
pub use reasoning::*;
pub use wikipedia::*;
