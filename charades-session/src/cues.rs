use std::fmt;

/// Feedback sounds played while a turn is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Correct,
    Skip,
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cue::Correct => write!(f, "correct"),
            Cue::Skip => write!(f, "skip"),
        }
    }
}

/// Where cues are played. The session only calls this when sound is enabled.
pub trait CueSink: Send + Sync {
    fn play(&self, cue: Cue);
}

/// Default sink for hosts without audio.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentCues;

impl CueSink for SilentCues {
    fn play(&self, cue: Cue) {
        tracing::trace!("Cue {} (no audio output)", cue);
    }
}
