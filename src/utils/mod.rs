pub mod color;
pub mod persistence;

use std::sync::Once;

use tracing_subscriber::{filter::Directive, fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "saavr_core=info";

/// Initializes the global tracing subscriber with sensible defaults.
///
/// `RUST_LOG` is honoured; the crate's own events default to `info`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = DEFAULT_DIRECTIVE.parse::<Directive>() {
            filter = filter.add_directive(directive);
        }
        // A host may already have installed its own subscriber.
        let _ = fmt().with_env_filter(filter).try_init();
    });
}
