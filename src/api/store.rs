//! Data store connection seam
//!
//! The store is opened once at startup for its side effects. The dispatcher
//! never touches it afterwards, so a failed connection is logged and startup
//! continues.

use super::handler::BoxFuture;
use crate::error::BoxError;
use crate::logger;

/// Backing store connection initializer
pub trait DataStore: Send + Sync {
    /// Short label used in log lines
    fn name(&self) -> &str;

    fn connect(&self) -> BoxFuture<Result<(), BoxError>>;
}

/// Store used when no backing store is configured
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopStore;

impl DataStore for NoopStore {
    fn name(&self) -> &str {
        "noop"
    }

    fn connect(&self) -> BoxFuture<Result<(), BoxError>> {
        Box::pin(async { Ok(()) })
    }
}

/// Connect `store` once; returns whether the connection succeeded.
pub async fn init_data_store(store: &dyn DataStore) -> bool {
    match store.connect().await {
        Ok(()) => {
            logger::log_info(&format!("Data store '{}' connected", store.name()));
            true
        }
        Err(e) => {
            logger::log_error(&format!(
                "Data store '{}' failed to connect: {e}",
                store.name()
            ));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingStore;

    impl DataStore for FailingStore {
        fn name(&self) -> &str {
            "failing"
        }

        fn connect(&self) -> BoxFuture<Result<(), BoxError>> {
            Box::pin(async { Err("connection refused".into()) })
        }
    }

    #[tokio::test]
    async fn test_init_reports_outcome() {
        assert!(init_data_store(&NoopStore).await);
        assert!(!init_data_store(&FailingStore).await);
    }
}
