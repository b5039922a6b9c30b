//! Runs controller effects in the background for the TUI
//!
//! Network effects each get their own task, so slow requests never block input
//! and listing responses may come back in any order. Session effects share one
//! worker and run in the order they were issued. Completions are sent back over
//! a channel and applied by the app loop.

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

use crate::controller::{Effect, Event, Services};

pub struct EffectRunner {
    services: Services,
    tx: UnboundedSender<Event>,
    session_tx: UnboundedSender<Effect>,
}

impl EffectRunner {
    /// Must be called inside a tokio runtime; the session worker starts here.
    pub fn channel(services: Services) -> (Self, UnboundedReceiver<Event>) {
        let (tx, rx) = unbounded_channel();
        let (session_tx, mut session_rx) = unbounded_channel::<Effect>();

        let worker_services = services.clone();
        let worker_tx = tx.clone();
        tokio::spawn(async move {
            while let Some(effect) = session_rx.recv().await {
                if let Some(event) = worker_services.perform(effect).await {
                    send(&worker_tx, event);
                }
            }
            debug!("Session worker stopped");
        });

        (Self { services, tx, session_tx }, rx)
    }

    pub fn spawn(&self, effects: Vec<Effect>) {
        for effect in effects {
            if touches_session(&effect) {
                if let Err(e) = self.session_tx.send(effect) {
                    warn!("Session worker gone, dropping {:?}", e.0);
                }
                continue;
            }

            let services = self.services.clone();
            let tx = self.tx.clone();
            tokio::spawn(async move {
                if let Some(event) = services.perform(effect).await {
                    send(&tx, event);
                }
            });
        }
    }
}

fn touches_session(effect: &Effect) -> bool {
    matches!(
        effect,
        Effect::LoadSession | Effect::SaveSession { .. } | Effect::ClearSession
    )
}

fn send(tx: &UnboundedSender<Event>, event: Event) {
    if tx.send(event).is_err() {
        debug!("App loop gone, dropping completion");
    }
}
