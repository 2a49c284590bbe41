//! Request handler module
//!
//! Dispatch plus the two static-file components it routes to.

pub mod assets;
pub mod dispatcher;
pub mod spa;
pub mod uploads;

// Re-export main entry points
pub use dispatcher::Dispatcher;
pub use spa::SpaServer;
pub use uploads::UploadsServer;
