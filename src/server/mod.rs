// Server module entry
// Listener setup, per-connection serving, accept loop and shutdown signals

pub mod connection;
pub mod listener;
pub mod signal;

// Rust does not allow `loop` as a module name (keyword), so use server_loop
#[path = "loop.rs"]
pub mod server_loop;

// Re-export commonly used items
pub use connection::ConnectionSettings;
pub use listener::bind_listener;
pub use server_loop::start_server_loop;
pub use signal::shutdown_signal;
