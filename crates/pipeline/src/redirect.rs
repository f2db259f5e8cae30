//! Countdown shown on the not-found page before returning home.

use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use showcase_core::view::REDIRECT_DELAY_SECS;

const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RedirectEvent {
    /// Seconds left before navigating home.
    Tick { remaining_secs: u64 },
    NavigateHome,
    /// The visitor navigated away first.
    Cancelled,
}

impl RedirectEvent {
    pub fn is_final(self) -> bool {
        !matches!(self, Self::Tick { .. })
    }
}

/// A running countdown. Dropping it cancels the countdown.
pub struct RedirectCountdown {
    cancel: CancellationToken,
    events: watch::Receiver<RedirectEvent>,
}

impl RedirectCountdown {
    /// Start the standard countdown.
    pub fn start() -> Self {
        Self::with_delay(REDIRECT_DELAY_SECS)
    }

    /// Start a countdown of `secs` seconds, publishing one tick per second.
    pub fn with_delay(secs: u64) -> Self {
        let cancel = CancellationToken::new();
        let (tx, events) = watch::channel(RedirectEvent::Tick {
            remaining_secs: secs,
        });
        tokio::spawn(run(tx, secs, cancel.clone()));
        Self { cancel, events }
    }

    pub fn subscribe(&self) -> watch::Receiver<RedirectEvent> {
        self.events.clone()
    }

    pub fn current(&self) -> RedirectEvent {
        *self.events.borrow()
    }

    /// Stop the countdown; the final event becomes [`RedirectEvent::Cancelled`].
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the final event.
    pub async fn wait(&self) -> RedirectEvent {
        let mut events = self.events.clone();
        loop {
            let event = *events.borrow_and_update();
            if event.is_final() {
                return event;
            }
            if events.changed().await.is_err() {
                return *events.borrow();
            }
        }
    }
}

impl Drop for RedirectCountdown {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run(tx: watch::Sender<RedirectEvent>, secs: u64, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(TICK);
    // The first tick completes immediately.
    interval.tick().await;

    let mut remaining = secs;
    while remaining > 0 {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!(remaining, "Redirect countdown cancelled");
                tx.send_replace(RedirectEvent::Cancelled);
                return;
            }
            _ = interval.tick() => {
                remaining -= 1;
                if remaining > 0 {
                    tx.send_replace(RedirectEvent::Tick { remaining_secs: remaining });
                }
            }
        }
    }

    tracing::info!("Redirect countdown finished, navigating home");
    tx.send_replace(RedirectEvent::NavigateHome);
}
