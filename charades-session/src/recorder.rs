use charades_core::{GameEvent, GameEventHandler};
use charades_persistence::HistoryStore;
use charades_types::GameResult;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc, oneshot};
use tracing::{debug, warn};

pub enum HistoryCommand {
    Append(GameResult),
    /// Answered once every command queued before it has been applied.
    Flush(oneshot::Sender<()>),
}

/// Forwards finished games to the history writer without blocking the round.
#[derive(Clone)]
pub struct HistoryRecorder {
    sender: mpsc::UnboundedSender<HistoryCommand>,
}

impl HistoryRecorder {
    pub fn new(sender: mpsc::UnboundedSender<HistoryCommand>) -> Self {
        Self { sender }
    }
}

impl GameEventHandler for HistoryRecorder {
    fn handle_event(&mut self, event: GameEvent) {
        if let GameEvent::GameEnded { result } = event {
            debug!("Queueing game {} for history", result.id);
            if self.sender.send(HistoryCommand::Append(result)).is_err() {
                warn!("History writer has stopped, dropping game result");
            }
        }
    }
}

/// Apply queued history commands in order until every sender is gone.
pub async fn run_history_writer(
    history: Arc<Mutex<HistoryStore>>,
    mut receiver: mpsc::UnboundedReceiver<HistoryCommand>,
) {
    while let Some(command) = receiver.recv().await {
        match command {
            HistoryCommand::Append(result) => history.lock().await.append(result).await,
            HistoryCommand::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
    debug!("History writer stopped");
}
