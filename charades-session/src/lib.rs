pub mod app;
pub mod config;
pub mod cues;
pub mod recorder;
pub mod session;
pub mod timer;

pub use app::CharadesApp;
pub use config::Config;
pub use cues::{Cue, CueSink, SilentCues};
pub use session::{GameSession, TurnView};

use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber, filtered through `RUST_LOG` (default `info`).
/// Calling it again once a subscriber is set is a no-op.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_twice_is_harmless() {
        init_tracing();
        init_tracing();
        tracing::info!("tracing initialised");
    }
}
