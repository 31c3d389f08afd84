use anyhow::Result;
use std::io;
use std::io::IsTerminal;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{self, time::ChronoUtc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// 0 = warn, 1 = debug (hyper noise suppressed), 2+ = trace.
/// `RUST_LOG` wins whenever it is set, except in quiet mode.
fn build_filter(verbose_level: u8, quiet: bool) -> EnvFilter {
    if quiet {
        return EnvFilter::new("error");
    }

    let default = match verbose_level {
        0 => "warn",
        1 => "debug,hyper::proto::h1=warn,hyper::client::pool=warn,reqwest=info",
        _ => "trace",
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Split `logs/nextwatch.log` into the directory and the rotation prefix `nextwatch`
fn rotation_target(log_path: &Path) -> Result<(&Path, &str)> {
    let log_dir = log_path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("Log file path has no parent directory"))?;
    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid log filename"))?;
    let prefix = file_name.rsplit_once('.').map_or(file_name, |(stem, _)| stem);
    Ok((log_dir, prefix))
}

/// Logs go to stderr so they never mix with command output on stdout.
/// With a log file they go there instead, rotated daily
/// (`nextwatch.2026-10-19`, ...).
pub fn init_logging(verbose_level: u8, quiet: bool, log_file: Option<&Path>) -> Result<()> {
    let json = std::env::var("RUST_LOG_JSON")
        .map(|v| v == "true")
        .unwrap_or_else(|_| !io::stdout().is_terminal());

    let registry = Registry::default().with(build_filter(verbose_level, quiet));

    match log_file {
        Some(log_path) => {
            let (log_dir, prefix) = rotation_target(log_path)?;
            std::fs::create_dir_all(log_dir)?;
            let appender = RollingFileAppender::new(Rotation::DAILY, log_dir, prefix);

            if json {
                registry
                    .with(fmt::layer().json().with_timer(ChronoUtc::rfc_3339()).with_writer(appender))
                    .try_init()?;
            } else {
                registry
                    .with(
                        fmt::layer()
                            .with_timer(ChronoUtc::rfc_3339())
                            .with_ansi(false)
                            .with_writer(appender),
                    )
                    .try_init()?;
            }
        }
        None => {
            if json {
                registry
                    .with(fmt::layer().json().with_timer(ChronoUtc::rfc_3339()).with_writer(io::stderr))
                    .try_init()?;
            } else {
                registry
                    .with(fmt::layer().with_timer(ChronoUtc::rfc_3339()).with_writer(io::stderr))
                    .try_init()?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_rotation_target() {
        let path = PathBuf::from("/var/log/nextwatch/nextwatch.log");
        let (dir, prefix) = rotation_target(&path).unwrap();
        assert_eq!(dir, Path::new("/var/log/nextwatch"));
        assert_eq!(prefix, "nextwatch");

        let bare = PathBuf::from("/tmp/nextwatch");
        assert_eq!(rotation_target(&bare).unwrap().1, "nextwatch");
    }
}
