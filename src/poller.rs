//! Status poller.
//!
//! A small state machine (`Idle → Polling → Idle | Terminal`) that repeatedly
//! queries a signature request's status on a fixed interval until a terminal
//! status arrives, a tick fails, or the caller cancels.
//!
//! At most one polling session is active per poller: starting while already
//! polling is a no-op guard. Cancellation is explicit and immediate; a tick
//! whose network call is still in flight when the session is cancelled or
//! replaced discards its result via a session-generation check.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

use crate::credentials::Credentials;
use crate::error::{Error, Result};
use crate::gateway::SigningGateway;
use crate::models::SignatureRequest;
use crate::traits::HttpClient;

/// Fixed polling period.
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Poller lifecycle states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PollState {
    /// No session active.
    #[default]
    Idle,
    /// A session is ticking.
    Polling,
    /// The last session ended on a terminal status.
    Terminal,
}

/// Events emitted to the caller over the session channel.
#[derive(Debug)]
pub enum PollEvent {
    /// A fresh status snapshot from a successful tick.
    Snapshot(SignatureRequest),
    /// The tick failed; the session has ended and must be restarted
    /// explicitly.
    Failed(Error),
}

/// One polling session's bookkeeping.
#[derive(Debug, Default)]
struct Session {
    state: PollState,
    /// Bumped on every start and stop; in-flight ticks compare their
    /// captured value before applying results.
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

/// Polls a signature request's status until it reaches a terminal state.
#[derive(Debug)]
pub struct StatusPoller<C: HttpClient> {
    gateway: Arc<SigningGateway<C>>,
    interval: Duration,
    session: Arc<Mutex<Session>>,
}

impl<C: HttpClient + 'static> StatusPoller<C> {
    /// Create a poller with the standard 5 second period.
    pub fn new(gateway: SigningGateway<C>) -> Self {
        Self::with_interval(gateway, POLL_INTERVAL)
    }

    /// Create a poller with a custom period.
    pub fn with_interval(gateway: SigningGateway<C>, interval: Duration) -> Self {
        Self {
            gateway: Arc::new(gateway),
            interval,
            session: Arc::new(Mutex::new(Session::default())),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PollState {
        self.session.lock().unwrap().state
    }

    /// Start polling the given signature request.
    ///
    /// Returns the session's event channel, or `None` if a session is
    /// already polling (idempotent start; the existing session keeps its
    /// single timer). The first tick fires one full period after start.
    ///
    /// The session ends on its own when a tick returns a terminal status
    /// (`Terminal`) or fails (`Idle`, with a [`PollEvent::Failed`] emitted);
    /// either way the channel closes and no further ticks occur.
    pub fn start(
        &self,
        credentials: Credentials,
        signature_id: &str,
    ) -> Option<mpsc::UnboundedReceiver<PollEvent>> {
        let mut session = self.session.lock().unwrap();
        if session.state == PollState::Polling {
            return None;
        }

        session.generation += 1;
        session.state = PollState::Polling;
        let generation = session.generation;

        let (tx, rx) = mpsc::unbounded_channel();
        let gateway = Arc::clone(&self.gateway);
        let shared = Arc::clone(&self.session);
        let signature_id = signature_id.to_string();
        let period = self.interval;

        debug!(%signature_id, generation, "poll session started");
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let result = gateway.get_status(&credentials, &signature_id).await;

                let mut session = shared.lock().unwrap();
                // Stale-result guard: a stop() or replacement start() while
                // the request was in flight bumped the generation.
                if session.generation != generation {
                    return;
                }
                match result {
                    Ok(snapshot) => {
                        let terminal = snapshot.is_terminal();
                        let _ = tx.send(PollEvent::Snapshot(snapshot));
                        if terminal {
                            debug!(%signature_id, "terminal status, poll session ending");
                            session.state = PollState::Terminal;
                            session.handle = None;
                            return;
                        }
                    }
                    Err(err) => {
                        debug!(%signature_id, error = %err, "tick failed, poll session ending");
                        session.state = PollState::Idle;
                        session.handle = None;
                        let _ = tx.send(PollEvent::Failed(err));
                        return;
                    }
                }
            }
        });
        session.handle = Some(handle);
        Some(rx)
    }

    /// Cancel the active session, if any.
    ///
    /// Always legal: stopping an idle poller is a no-op. Clears the pending
    /// timer and transitions to `Idle`; an in-flight tick's result is
    /// discarded by the generation guard.
    pub fn stop(&self) {
        let mut session = self.session.lock().unwrap();
        session.generation += 1;
        if let Some(handle) = session.handle.take() {
            handle.abort();
        }
        session.state = PollState::Idle;
    }

    /// One-shot status fetch for manual "Check Status" actions.
    ///
    /// Independent of any active session; does not affect the poll state.
    pub async fn fetch_once(
        &self,
        credentials: &Credentials,
        signature_id: &str,
    ) -> Result<SignatureRequest> {
        self.gateway.get_status(credentials, signature_id).await
    }
}
