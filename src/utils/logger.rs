use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Shape of the log lines written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    /// Structured output for log collectors; picked when results are printed as JSON.
    Json,
}

fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "tennis_mdp=debug,info"
    } else {
        "tennis_mdp=warn"
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the default filter.
pub fn init_logger(format: LogFormat, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));
    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Compact => registry.with(layer.compact()).init(),
        LogFormat::Json => registry.with(layer.json()).init(),
    }
}
