use tracing_subscriber::EnvFilter;

/// Workspace crate targets that receive log output.
const CRATE_TARGETS: &[&str] = &[
    "slr",
    "slr_calendar",
    "slr_effects",
    "slr_fit",
    "slr_forcing",
    "slr_models",
    "slr_series",
    "slr_stats",
    "slr_terms",
];

/// Level for a `-v` count: none -> warn, `-v` -> info, `-vv` -> debug,
/// more -> trace.
fn level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn directives(verbosity: u8) -> String {
    let level = level(verbosity);
    CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize tracing from the CLI verbosity; `RUST_LOG` overrides it.
///
/// Logs go to stderr so that reports written to stdout stay valid JSON.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
