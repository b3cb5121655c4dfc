pub mod category;
pub mod errors;
pub mod game;
pub mod settings;

// Re-export all types
pub use category::*;
pub use errors::*;
pub use game::*;
pub use settings::*;
