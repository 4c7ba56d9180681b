use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `CESKY_LOG=cesky_eval=debug` (or `RUST_LOG`); `force_debug`
/// turns on debug output for every cesky crate when neither is set. Set
/// `CESKY_LOG_TREE=1` for indented, span-structured output.
pub fn init_tracing(force_debug: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let directives = std::env::var("CESKY_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .ok()
            .or_else(|| force_debug.then(|| "cesky_eval=debug,ceskyc=debug".to_string()));
        let Some(directives) = directives else {
            return;
        };
        let filter = EnvFilter::new(directives);

        if std::env::var("CESKY_LOG_TREE").is_ok_and(|v| v == "1") {
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}
