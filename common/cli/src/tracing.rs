use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use clap_verbosity_flag::{InfoLevel, Verbosity};
use tracing::info;
use tracing_log::AsTrace;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Log to stderr at the verbosity level, `RUST_LOG` directives take precedence when set.
///
/// With a trace file, everything down to `TRACE` is also written to the file.
pub fn configure_tracing(trace: Option<PathBuf>, verbose: Verbosity<InfoLevel>) -> anyhow::Result<()> {
    let level = verbose
        .log_level_filter()
        .as_trace();

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        );

    let trace_layer = match &trace {
        Some(path) => {
            let file = File::create(path)?;
            let layer = fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(file))
                .with_filter(LevelFilter::TRACE);
            Some(layer)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(trace_layer)
        .try_init()?;

    if let Some(path) = trace {
        info!("Tracing to file. path: {:?}", path);
    }

    Ok(())
}
