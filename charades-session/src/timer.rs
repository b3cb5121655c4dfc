use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Background task that calls back once per `TICK_PERIOD` until the callback
/// returns `false` or the timer is stopped. Dropping the timer stops it.
#[derive(Debug, Default)]
pub struct TurnTimer {
    handle: Option<JoinHandle<()>>,
}

impl TurnTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any task already running. The first call happens one full
    /// period after starting.
    pub fn start<F, Fut>(&mut self, mut on_tick: F)
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        self.stop();
        self.handle = Some(tokio::spawn(async move {
            let mut ticks = interval(TICK_PERIOD);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticks.tick().await;
            loop {
                ticks.tick().await;
                if !on_tick().await {
                    break;
                }
            }
        }));
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for TurnTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
