pub mod catalog;
pub mod countdown;
pub mod game_events;
pub mod game_state;
pub mod sampler;
pub mod scoring;

// Re-export main components
pub use catalog::*;
pub use countdown::*;
pub use game_events::*;
pub use game_state::*;
pub use sampler::*;
pub use scoring::*;
