use tokio::sync::broadcast;
use uuid::Uuid;

const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurveyEvent {
    Saved(Uuid),
    Deleted(Uuid),
}

/// Survey change notifications for open builder sessions.
///
/// Owned by whoever composes the sessions and passed to them explicitly;
/// there is no process-wide bus.
#[derive(Debug, Clone)]
pub struct SurveyEvents {
    sender: broadcast::Sender<SurveyEvent>,
}

impl Default for SurveyEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl SurveyEvents {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SurveyEvent> {
        self.sender.subscribe()
    }

    /// Send to current subscribers. Having none is fine.
    pub fn publish(&self, event: SurveyEvent) {
        let delivered = self.sender.send(event).unwrap_or(0);
        tracing::debug!(?event, delivered, "survey event published");
    }
}
