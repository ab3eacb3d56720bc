// Server module entry point
// Provides listener creation, the accept loop, and shutdown signals

pub mod connection;
pub mod listener;
pub mod signal;

// Rust does not allow `loop` as a module name (keyword), use server_loop
#[path = "loop.rs"]
pub mod server_loop;

// Re-export common entry points
pub use listener::create_listener;
pub use server_loop::start_server_loop;
pub use signal::start_signal_handler;
