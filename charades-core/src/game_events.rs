use charades_types::GameResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnEndReason {
    WordsExhausted,
    TimeUp,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    TurnStarted {
        player_index: usize,
        player: String,
        batch_size: usize,
        generation: u64,
    },
    WordAnswered {
        player_index: usize,
        word: String,
        correct: bool,
    },
    TurnCompleted {
        player_index: usize,
        reason: TurnEndReason,
        score: u32,
        skipped_count: u32,
    },
    TurnCancelled {
        player_index: usize,
    },
    NextPlayerReady {
        player_index: usize,
        player: String,
        batch_size: usize,
    },
    GameEnded {
        result: GameResult,
    },
    GameRestarted {
        batch_size: usize,
    },
}

impl GameEvent {
    pub fn player_index(&self) -> Option<usize> {
        match self {
            GameEvent::TurnStarted { player_index, .. }
            | GameEvent::WordAnswered { player_index, .. }
            | GameEvent::TurnCompleted { player_index, .. }
            | GameEvent::TurnCancelled { player_index }
            | GameEvent::NextPlayerReady { player_index, .. } => Some(*player_index),
            GameEvent::GameEnded { .. } | GameEvent::GameRestarted { .. } => None,
        }
    }
}

/// Event handler trait for processing game events
pub trait GameEventHandler: Send {
    fn handle_event(&mut self, event: GameEvent);
}

/// Simple event bus for distributing game events
pub struct GameEventBus {
    handlers: Vec<Box<dyn GameEventHandler>>,
}

impl GameEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn GameEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    pub fn publish(&mut self, event: GameEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(event.clone());
        }
    }
}

impl Default for GameEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GameEventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEventBus")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct TestHandler {
        events: Arc<Mutex<Vec<GameEvent>>>,
    }

    impl GameEventHandler for TestHandler {
        fn handle_event(&mut self, event: GameEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    #[test]
    fn test_event_bus_delivers_to_every_handler() {
        let mut bus = GameEventBus::new();
        let first = Arc::new(Mutex::new(Vec::new()));
        let second = Arc::new(Mutex::new(Vec::new()));

        bus.add_handler(Box::new(TestHandler {
            events: first.clone(),
        }));
        bus.add_handler(Box::new(TestHandler {
            events: second.clone(),
        }));
        assert_eq!(bus.handler_count(), 2);

        let event = GameEvent::TurnCancelled { player_index: 1 };
        bus.publish(event.clone());

        assert_eq!(*first.lock().unwrap(), vec![event.clone()]);
        assert_eq!(*second.lock().unwrap(), vec![event]);
    }

    #[test]
    fn test_player_index() {
        let event = GameEvent::WordAnswered {
            player_index: 2,
            word: "Gee".to_string(),
            correct: true,
        };
        assert_eq!(event.player_index(), Some(2));
        assert_eq!(GameEvent::GameRestarted { batch_size: 10 }.player_index(), None);
    }
}
