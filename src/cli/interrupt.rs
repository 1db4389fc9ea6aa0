//! Process-wide Ctrl-C handling.
//!
//! `tokio::signal::ctrl_c` replaces the default SIGINT action for the rest of
//! the process, so a single listener owns it. Interested code subscribes for
//! as long as it wants interrupts; when nobody is subscribed the process exits
//! with status 130, as it would without a handler.

use std::sync::OnceLock;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Exit status of a process ended by SIGINT.
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

#[derive(Clone)]
pub struct Interrupts {
    tx: broadcast::Sender<()>,
}

impl Default for Interrupts {
    fn default() -> Self {
        Self::new()
    }
}

impl Interrupts {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(4);
        Self { tx }
    }

    /// Listens for interrupts until the receiver is dropped.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Forwards one interrupt. Returns `false` when nobody is listening.
    pub fn notify(&self) -> bool {
        self.tx.send(()).is_ok()
    }
}

/// The shared hub, fed by the one SIGINT listener. Must be first called from
/// inside the tokio runtime.
pub fn interrupts() -> &'static Interrupts {
    static HUB: OnceLock<Interrupts> = OnceLock::new();
    HUB.get_or_init(|| {
        let hub = Interrupts::new();
        let forward = hub.clone();
        tokio::spawn(async move {
            loop {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    warn!("Cannot listen for Ctrl-C: {}", e);
                    return;
                }
                if !forward.notify() {
                    debug!("Interrupt with no listener, exiting");
                    std::process::exit(INTERRUPTED_EXIT_CODE);
                }
            }
        });
        hub
    })
}

/// Resolves on the next interrupt delivered to `rx`.
pub async fn interrupted(rx: &mut broadcast::Receiver<()>) {
    loop {
        match rx.recv().await {
            Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => return,
            Err(broadcast::error::RecvError::Closed) => std::future::pending::<()>().await,
        }
    }
}
