// Signal handling module
//
// SIGINT (Ctrl+C) and SIGTERM both request graceful shutdown: the accept
// loop stops taking new connections and the process exits 0.

use std::sync::Arc;
use tokio::sync::Notify;

/// Install shutdown signal handlers and return the notifier the accept loop
/// waits on.
#[cfg(unix)]
pub fn install_shutdown_handler() -> Arc<Notify> {
    use tokio::signal::unix::{signal, SignalKind};

    let shutdown = Arc::new(Notify::new());
    let notify = Arc::clone(&shutdown);

    tokio::spawn(async move {
        let mut sigterm =
            signal(SignalKind::terminate()).expect("Failed to register SIGTERM handler");
        let mut sigint =
            signal(SignalKind::interrupt()).expect("Failed to register SIGINT handler");

        tokio::select! {
            _ = sigterm.recv() => {
                println!("\n[SIGNAL] SIGTERM received, shutting down...");
            }
            _ = sigint.recv() => {
                println!("\n[SIGNAL] SIGINT received (Ctrl+C), shutting down...");
            }
        }

        // notify_one stores a permit so the signal is not lost if the accept
        // loop is between notified() calls
        notify.notify_one();
    });

    shutdown
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn install_shutdown_handler() -> Arc<Notify> {
    let shutdown = Arc::new(Notify::new());
    let notify = Arc::clone(&shutdown);

    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            println!("\n[SIGNAL] Ctrl+C received, shutting down...");
            notify.notify_one();
        }
    });

    shutdown
}
