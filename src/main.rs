use std::sync::Arc;
use tokio::net::TcpListener;

mod config;
mod handler;
mod http;
mod logger;
mod server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;
    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;
    let listener = server::create_listener(addr)?;

    // Read the address back: port 0 resolves to an ephemeral port
    let local_addr = listener.local_addr()?;
    logger::log_server_start(&local_addr, &cfg);

    let config = Arc::new(cfg);
    let shutdown = server::signal::install_shutdown_handler();

    run_accept_loop(listener, config, &shutdown).await;

    logger::log_server_stopped();
    Ok(())
}

/// Accept connections until a shutdown signal arrives. Accept errors are
/// logged and the loop keeps going; only the signal ends it.
async fn run_accept_loop(
    listener: TcpListener,
    config: Arc<config::Config>,
    shutdown: &tokio::sync::Notify,
) {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        server::spawn_connection(stream, peer_addr, Arc::clone(&config));
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.notified() => {
                break;
            }
        }
    }
}
