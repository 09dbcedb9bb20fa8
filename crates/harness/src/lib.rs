mod shop;

pub use shop::{TestShop, album, auction_lot, nevermind};

use tracing_subscriber::EnvFilter;

/// Route `tracing` output to the test runner's captured stdout. Safe to call
/// from every test; only the first call installs the subscriber.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}
