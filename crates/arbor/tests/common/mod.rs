//! Shared setup for the integration suite.

/// Route tracing output through the libtest capture. Safe to call from
/// every test; only the first call installs the subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}
