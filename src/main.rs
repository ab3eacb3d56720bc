use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use tokio::sync::Notify;

mod config;
mod handler;
mod http;
mod json;
mod logger;
mod server;
mod store;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load_from("config")?;
    logger::init(&cfg)?;

    // Build the Tokio runtime, honoring the workers setting
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_listener(addr)?;

    let state = Arc::new(config::AppState::new(&cfg));
    let active_connections = Arc::new(AtomicUsize::new(0));
    let shutdown = Arc::new(Notify::new());

    server::start_signal_handler(Arc::clone(&shutdown));
    logger::log_server_start(&addr, &cfg);

    server::start_server_loop(listener, state, active_connections, shutdown).await;

    logger::log_server_stopped();
    Ok(())
}
