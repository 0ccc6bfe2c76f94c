use std::path::PathBuf;

use snafu::{ResultExt, Snafu};
use tracing::Level;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt,
};

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to initialize rolling file appender in {directory}", directory = directory.display()))]
    InitFileAppender {
        source: InitError,
        directory: PathBuf,
    },

    #[snafu(display("failed to install global tracing subscriber"))]
    InstallSubscriber {
        source: tracing_subscriber::util::TryInitError,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

/// Returns the filter configured in the environment variable `env`, or `INFO` if the variable is
/// unset or invalid.
pub fn env_filter(env: &str) -> EnvFilter {
    EnvFilter::try_from_env(env).unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()))
}

/// Initializes `tracing` logging with the filter from the environment variable `env`.
///
/// Use the application name plus `_LOG` as variable name, e.g. `CONSOLE_OPERATOR_LOG`. If the
/// variable is not set, the maximum log level is `INFO`.
///
/// Log output is copied to a daily rotated file `{app_name}.log` if `{env}_DIRECTORY` points to a
/// directory.
pub fn initialize_logging(env: &str, app_name: &str, format: LogFormat) -> Result<(), Error> {
    let file_appender_directory = std::env::var_os(format!("{env}_DIRECTORY")).map(PathBuf::from);

    let file_layer = file_appender_directory
        .as_ref()
        .map(|directory| {
            RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_suffix(format!("{app_name}.log"))
                .max_log_files(6)
                .build(directory)
                .with_context(|_| InitFileAppenderSnafu {
                    directory: directory.clone(),
                })
        })
        .transpose()?
        .map(|appender| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(appender)
        });

    let stdout_layer = match format {
        LogFormat::Plain => tracing_subscriber::fmt::layer().boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer().json().boxed(),
    };

    Registry::default()
        .with(env_filter(env))
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .context(InstallSubscriberSnafu)?;

    // Logging is only available once the subscriber is installed
    match file_appender_directory {
        Some(directory) => tracing::info!(directory = %directory.display(), "file logging enabled"),
        None => tracing::debug!("file logging disabled, because no log directory set"),
    }

    Ok(())
}
