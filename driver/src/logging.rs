use error_stack::ResultExt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use kernel::KernelError;

use crate::env;

static DEFAULT_FILTER: &str = "kernel=debug,application=debug,driver=debug";

/// Installs a global fmt subscriber filtered by `RUST_LOG`.
///
/// Fails if a global subscriber is already set.
pub fn init_tracing() -> error_stack::Result<(), KernelError> {
    let filter = env("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.into());
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_filter(tracing_subscriber::EnvFilter::new(filter)),
        )
        .try_init()
        .change_context_lazy(|| KernelError::Internal)
        .attach_printable_lazy(|| "Failed to install tracing subscriber")
}
