use std::sync::Arc;

use frontdoor::api::{init_data_store, ApiHandlers, NoopStore};
use frontdoor::config::Config;
use frontdoor::error::ServerError;
use frontdoor::logger;
use frontdoor::server::{self, ConnectionSettings};

fn main() -> Result<(), ServerError> {
    let cfg = Config::load()?;
    logger::init(&cfg)?;

    // Create the Tokio runtime, sizing the worker pool from config
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
        logger::log_info(&format!("Using {workers} worker threads"));
    } else {
        logger::log_info("Using default worker threads (CPU cores)");
    }

    let runtime = runtime_builder.build()?;
    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), ServerError> {
    // Opened once for its side effects; failure is logged, not fatal
    init_data_store(&NoopStore).await;

    let dispatcher = Arc::new(frontdoor::build_dispatcher(&cfg, ApiHandlers::new()));

    let addr = cfg.socket_addr()?;
    let listener = server::bind_listener(addr, cfg.server.backlog)?;
    logger::log_server_start(&addr, &cfg);

    server::start_server_loop(
        listener,
        dispatcher,
        ConnectionSettings::from_config(&cfg),
        server::shutdown_signal(),
    )
    .await;

    Ok(())
}
