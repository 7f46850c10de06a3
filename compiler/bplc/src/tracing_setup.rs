//! Tracing subscriber for the `bplc` binary.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a hierarchical subscriber writing to stderr.
///
/// Does nothing unless `RUST_LOG` is set (e.g. `RUST_LOG=bpl_eval=trace`).
/// Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let tree = tracing_tree::HierarchicalLayer::new(2)
                .with_writer(std::io::stderr)
                .with_targets(true)
                .with_bracketed_fields(true);
            tracing_subscriber::registry()
                .with(EnvFilter::from_default_env())
                .with(tree)
                .init();
        }
    });
}
