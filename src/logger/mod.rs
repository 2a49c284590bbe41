//! Logger module
//!
//! Provides logging utilities for the dispatcher including:
//! - Server lifecycle logging
//! - The per-request diagnostic trace
//! - Handler fault, error and warning logging
//! - File-based logging support

pub mod writer;

use serde::Deserialize;
use std::fmt;
use std::net::SocketAddr;

use crate::config::Config;

/// Log severity, ordered from most to least severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Error,
    Warn,
    Info,
    Debug,
}

impl Level {
    const fn tag(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.info_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
        config.logging.level,
    )
}

fn write(level: Level, message: &str) {
    if let Some(w) = writer::get() {
        w.write(level, message);
        return;
    }
    // Not initialized yet (startup, tests): plain stdio, debug suppressed
    match level {
        Level::Error | Level::Warn => eprintln!("{}", writer::stamp(level, message)),
        Level::Info => println!("{}", writer::stamp(level, message)),
        Level::Debug => {}
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write(Level::Info, "======================================");
    write(Level::Info, &format!("Server running at http://{addr}/"));
    write(Level::Info, &format!("Public dir: {}", config.paths.public_dir.display()));
    write(Level::Info, &format!("Uploads dir: {}", config.paths.uploads_dir.display()));
    if let Some(workers) = config.server.workers {
        write(Level::Info, &format!("Worker threads: {workers}"));
    }
    write(Level::Info, "Press Ctrl+C to stop the server.");
    write(Level::Info, "======================================");
}

/// Diagnostic trace written for every incoming request
pub fn log_request(method: &hyper::Method, url: &str) {
    write(Level::Info, &format!("{method} request for {url}"));
}

pub fn log_handler_fault(domain: &str, fault: &dyn fmt::Display) {
    write(Level::Error, &format!("[{domain}] handler fault: {fault}"));
}

pub fn log_connection_error(err: &impl fmt::Debug) {
    write(Level::Error, &format!("Failed to serve connection: {err:?}"));
}

pub fn log_info(message: &str) {
    write(Level::Info, message);
}

pub fn log_debug(message: &str) {
    write(Level::Debug, message);
}

pub fn log_error(message: &str) {
    write(Level::Error, message);
}

pub fn log_warning(message: &str) {
    write(Level::Warn, message);
}
