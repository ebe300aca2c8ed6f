use std::fs::OpenOptions;
use std::sync::Arc;

use tracing_subscriber::{
    fmt::{self, format::FmtSpan, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use crate::config::LoggingConfig;

/// Initialize logging from the `logging` config section.
///
/// `level` is any `EnvFilter` directive (`"info"`,
/// `"info,vimeo_addon_client=debug"`); a set `RUST_LOG` replaces it. Output is
/// pretty or JSON, to stdout or appended to `file_path`.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let configured = parse_filter(&config.level)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or(configured);

    let writer = make_writer(config.file_path.as_deref())?;
    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = if config.format == "json" {
        fmt::layer()
            .json()
            .with_span_events(FmtSpan::CLOSE)
            .with_current_span(true)
            .with_span_list(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(writer)
            .boxed()
    } else {
        fmt::layer()
            .pretty()
            .with_span_events(FmtSpan::CLOSE)
            .with_file(false)
            .with_line_number(true)
            .with_writer(writer)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .try_init()?;
    Ok(())
}

/// Parse a filter directive string
fn parse_filter(directives: &str) -> anyhow::Result<EnvFilter> {
    EnvFilter::try_new(directives)
        .map_err(|e| anyhow::anyhow!("Invalid logging.level {directives:?}: {e}"))
}

fn make_writer(file_path: Option<&str>) -> anyhow::Result<BoxMakeWriter> {
    match file_path {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Ok(BoxMakeWriter::new(Arc::new(file)))
        }
        None => Ok(BoxMakeWriter::new(std::io::stdout)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter_accepts_directives() {
        assert!(parse_filter("debug").is_ok());
        assert!(parse_filter("WARN").is_ok());
        assert!(parse_filter("info,vimeo_addon_client=debug").is_ok());
        assert!(parse_filter("vimeo_addon_core::addon=trace,warn").is_ok());
    }

    #[test]
    fn test_parse_filter_rejects_bad_level() {
        assert!(parse_filter("vimeo_addon_client=loud").is_err());
    }

    #[test]
    fn test_init_logging_rejects_bad_directive() {
        let config = LoggingConfig {
            level: "info,vimeo_addon_client=loud".to_string(),
            ..LoggingConfig::default()
        };
        assert!(init_logging(&config).is_err());
    }

    // The only test in this crate that installs the global subscriber.
    #[test]
    fn test_init_logging_with_directive_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("addon.log");
        let config = LoggingConfig {
            level: "info,vimeo_addon_client=debug".to_string(),
            format: "json".to_string(),
            file_path: Some(path.to_string_lossy().into_owned()),
        };

        init_logging(&config).unwrap();
        tracing::info!("logging initialized");
        assert!(path.exists());
    }
}
