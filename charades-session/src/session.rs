use charades_core::{Countdown, CountdownEvent, Game, Urgency};
use charades_types::{GameError, GamePhase, GameResult, GameSettings, PlayerSummary, RoundSnapshot};
use serde::Serialize;
use std::sync::{Arc, Weak};
use tokio::sync::{Mutex, watch};
use tracing::{debug, info};
use ts_rs::TS;

use crate::cues::{Cue, CueSink};
use crate::timer::TurnTimer;

/// Everything the round screen renders, taken under one lock.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TurnView {
    #[serde(flatten)]
    #[ts(flatten)]
    pub round: RoundSnapshot,
    pub remaining_seconds: u32,
    pub timer_display: String,
    pub time_fraction: f64,
    pub urgency: Urgency,
}

struct SessionInner {
    game: Game,
    countdown: Countdown,
    timer: TurnTimer,
    cues: Arc<dyn CueSink>,
    settings: watch::Receiver<GameSettings>,
}

impl SessionInner {
    /// Hand the latest saved preferences to the game; they only change what
    /// the next deal and the next countdown look like.
    fn sync_settings(&mut self) {
        let latest = self.settings.borrow_and_update().clone();
        self.game.apply_settings(latest);
    }

    fn sound_enabled(&self) -> bool {
        self.settings.borrow().sound_enabled
    }

    fn halt_clock_unless_playing(&mut self) {
        if self.game.phase() != GamePhase::Playing {
            self.countdown.stop();
            self.timer.stop();
        }
    }

    /// One second of the turn clock. Returns whether the driver should keep
    /// ticking.
    fn on_tick(&mut self, generation: u64) -> bool {
        if self.game.turn_generation() != generation || self.game.phase() != GamePhase::Playing {
            return false;
        }

        match self.countdown.tick() {
            Some(CountdownEvent::Tick { .. }) => true,
            Some(CountdownEvent::Expired) => {
                info!("Time up for {}", self.game.current_player().name);
                if let Err(e) = self.game.time_up() {
                    debug!("Ignoring expiry: {}", e);
                }
                false
            }
            None => false,
        }
    }

    fn view(&self) -> TurnView {
        TurnView {
            round: self.game.snapshot(),
            remaining_seconds: self.countdown.remaining(),
            timer_display: self.countdown.display(),
            time_fraction: self.countdown.fraction_remaining(),
            urgency: self.countdown.urgency(),
        }
    }
}

/// One game in progress, with its turn clock. Cheap to clone; clones share the
/// same game.
#[derive(Clone)]
pub struct GameSession {
    inner: Arc<Mutex<SessionInner>>,
}

impl GameSession {
    pub fn new(
        game: Game,
        cues: Arc<dyn CueSink>,
        settings: watch::Receiver<GameSettings>,
    ) -> Self {
        let countdown = Countdown::new(game.settings().round_time_seconds);
        Self {
            inner: Arc::new(Mutex::new(SessionInner {
                game,
                countdown,
                timer: TurnTimer::new(),
                cues,
                settings,
            })),
        }
    }

    /// Begin the current player's turn and its countdown.
    pub async fn start(&self) -> Result<GamePhase, GameError> {
        let mut inner = self.inner.lock().await;
        inner.sync_settings();

        let phase = inner.game.start()?;
        let round_time = inner.game.settings().round_time_seconds;
        inner.countdown.reset(round_time);

        if phase == GamePhase::Playing {
            inner.countdown.start();
            let generation = inner.game.turn_generation();
            let weak = Arc::downgrade(&self.inner);
            inner.timer.start(move || drive_countdown(weak.clone(), generation));
        } else {
            inner.halt_clock_unless_playing();
        }

        Ok(phase)
    }

    pub async fn mark_correct(&self) -> Result<GamePhase, GameError> {
        self.answer(true).await
    }

    pub async fn mark_skip(&self) -> Result<GamePhase, GameError> {
        self.answer(false).await
    }

    async fn answer(&self, correct: bool) -> Result<GamePhase, GameError> {
        let mut inner = self.inner.lock().await;
        let phase = if correct {
            inner.game.mark_correct()?
        } else {
            inner.game.mark_skip()?
        };

        if inner.sound_enabled() {
            inner.cues.play(if correct { Cue::Correct } else { Cue::Skip });
        }
        inner.halt_clock_unless_playing();

        Ok(phase)
    }

    pub async fn next_player(&self) -> Result<GamePhase, GameError> {
        let mut inner = self.inner.lock().await;
        inner.sync_settings();
        let phase = inner.game.next_player()?;
        let round_time = inner.game.settings().round_time_seconds;
        inner.countdown.reset(round_time);
        Ok(phase)
    }

    /// Hardware back during a turn: the partial turn is thrown away and the
    /// clock stops.
    pub async fn cancel_turn(&self) -> Result<GamePhase, GameError> {
        let mut inner = self.inner.lock().await;
        let phase = inner.game.cancel_turn()?;
        inner.halt_clock_unless_playing();
        let round_time = inner.game.settings().round_time_seconds;
        inner.countdown.reset(round_time);
        Ok(phase)
    }

    pub async fn restart(&self) -> GamePhase {
        let mut inner = self.inner.lock().await;
        inner.timer.stop();
        inner.sync_settings();
        let phase = inner.game.restart();
        let round_time = inner.game.settings().round_time_seconds;
        inner.countdown.reset(round_time);
        phase
    }

    pub async fn phase(&self) -> GamePhase {
        self.inner.lock().await.game.phase()
    }

    pub async fn view(&self) -> TurnView {
        self.inner.lock().await.view()
    }

    pub async fn snapshot(&self) -> RoundSnapshot {
        self.inner.lock().await.game.snapshot()
    }

    pub async fn summaries(&self) -> Vec<PlayerSummary> {
        self.inner.lock().await.game.summaries()
    }

    pub async fn last_result(&self) -> Option<GameResult> {
        self.inner.lock().await.game.last_result().cloned()
    }

    pub async fn remaining_seconds(&self) -> u32 {
        self.inner.lock().await.countdown.remaining()
    }

    pub async fn is_timer_running(&self) -> bool {
        self.inner.lock().await.timer.is_running()
    }
}

async fn drive_countdown(session: Weak<Mutex<SessionInner>>, generation: u64) -> bool {
    match session.upgrade() {
        Some(inner) => inner.lock().await.on_tick(generation),
        None => false,
    }
}
