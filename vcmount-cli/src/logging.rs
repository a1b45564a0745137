// SPDX-License-Identifier: GPL-3.0-only

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, ValueEnum)]
pub enum LoggingLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LoggingLevel {
    pub fn as_directive(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Filter used when `RUST_LOG` is not set: our crates at `level`, everything else at WARN.
pub fn default_filter(level: LoggingLevel) -> anyhow::Result<EnvFilter> {
    Ok(EnvFilter::new("warn")
        .add_directive(format!("vcmount={}", level.as_directive()).parse()?)
        .add_directive(format!("vcmount_sys={}", level.as_directive()).parse()?))
}

/// Install the stderr subscriber. `RUST_LOG` overrides `level`.
pub fn init(level: LoggingLevel) -> anyhow::Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => default_filter(level)?,
    };

    // stdout stays free for the child process; log lines read like "INFO message".
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_filter(env_filter);

    tracing_subscriber::registry().with(stderr_layer).try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_scopes_our_crates() {
        let filter = default_filter(LoggingLevel::Debug).expect("valid directives");
        let rendered = filter.to_string();
        assert!(rendered.contains("vcmount=debug"));
        assert!(rendered.contains("vcmount_sys=debug"));
        assert!(rendered.contains("warn"));
    }
}
