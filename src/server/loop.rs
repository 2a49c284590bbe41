// Server loop module
// Accepts connections until shutdown, then drains in-flight connections

use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinSet;

use super::connection::{serve_connection, ConnectionSettings};
use crate::handler::Dispatcher;
use crate::logger;

/// Accept connections on `listener` and serve each in its own task.
///
/// When `shutdown` resolves the listener stops accepting and every open
/// connection is asked to close after its current request; the function
/// returns once they have all finished.
pub async fn start_server_loop(
    listener: TcpListener,
    dispatcher: Arc<Dispatcher>,
    settings: ConnectionSettings,
    shutdown: impl Future<Output = ()>,
) {
    let mut connections = JoinSet::new();
    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;

            () = &mut shutdown => {
                logger::log_info(&format!(
                    "Stopped accepting, draining {} connection(s)",
                    connections.len()
                ));
                break;
            }

            // Reap finished connections so the set stays small
            Some(_) = connections.join_next(), if !connections.is_empty() => {}

            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        logger::log_debug(&format!("Accepted connection from {peer_addr}"));
                        connections.spawn(serve_connection(
                            stream,
                            peer_addr,
                            Arc::clone(&dispatcher),
                            settings,
                            stop_rx.clone(),
                        ));
                    }
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }
        }
    }

    drop(listener);
    stop_tx.send_replace(true);
    while connections.join_next().await.is_some() {}
    logger::log_info("Server stopped");
}
