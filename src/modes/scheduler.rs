use std::pin::Pin;
use std::time::Duration;

use tokio::time::{Sleep, sleep};

use crate::game::Scheduler;

/// Single pending tick backed by a tokio timer
#[derive(Default)]
pub struct TokioScheduler {
    pending: Option<Pin<Box<Sleep>>>,
}

impl TokioScheduler {
    pub fn new() -> Self {
        Self { pending: None }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Resolves when the pending tick is due. Never resolves while nothing is
    /// scheduled, so it can sit in a `select!` next to other sources.
    ///
    /// Cancel safe: dropping the future keeps the timer armed.
    pub async fn fired(&mut self) {
        if let Some(timer) = self.pending.as_mut() {
            timer.as_mut().await;
            self.pending = None;
        } else {
            std::future::pending::<()>().await;
        }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_after(&mut self, delay: Duration) {
        self.pending = Some(Box::pin(sleep(delay)));
    }

    fn cancel(&mut self) {
        self.pending = None;
    }
}
