// Connection handling module
// Serves one accepted TCP connection through the dispatcher

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;
use tokio::sync::watch;

use crate::config::Config;
use crate::handler::Dispatcher;
use crate::logger;

/// Per-connection settings taken from the performance config
#[derive(Debug, Clone, Copy)]
pub struct ConnectionSettings {
    pub keep_alive: bool,
    pub timeout: Duration,
}

impl ConnectionSettings {
    pub const fn from_config(config: &Config) -> Self {
        Self {
            keep_alive: config.performance.keep_alive,
            timeout: config.connection_timeout(),
        }
    }
}

/// Serve every request on `stream` until the client closes it, the
/// connection outlives `settings.timeout`, or `shutdown` flips to `true`.
///
/// On shutdown the request in flight is finished and the connection is then
/// closed; an idle keep-alive connection closes at once.
///
/// The body of each request is type-erased and handed to the dispatcher
/// unread.
pub async fn serve_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    dispatcher: Arc<Dispatcher>,
    settings: ConnectionSettings,
    mut shutdown: watch::Receiver<bool>,
) {
    let io = TokioIo::new(stream);

    let mut builder = http1::Builder::new();
    builder.keep_alive(settings.keep_alive);

    let conn = builder.serve_connection(
        io,
        service_fn(move |req: hyper::Request<Incoming>| {
            let dispatcher = Arc::clone(&dispatcher);
            async move {
                let req = req.map(|body| body.boxed_unsync());
                Ok::<_, Infallible>(dispatcher.dispatch(req).await)
            }
        }),
    );
    tokio::pin!(conn);

    let served = async {
        let mut closing = false;
        loop {
            tokio::select! {
                result = conn.as_mut() => break result,
                _ = shutdown.wait_for(|stop| *stop), if !closing => {
                    closing = true;
                    conn.as_mut().graceful_shutdown();
                }
            }
        }
    };

    match tokio::time::timeout(settings.timeout, served).await {
        Ok(Ok(())) => {}
        Ok(Err(err)) => logger::log_connection_error(&err),
        Err(_) => logger::log_debug(&format!(
            "Connection from {peer_addr} closed after {}s timeout",
            settings.timeout.as_secs()
        )),
    }
}
