use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use redpanda_console_crd::logging::{self, LogFormat};
use snafu::{ResultExt, Snafu};

mod crd;

const LOG_ENV: &str = "XTASK_LOG";

#[derive(Debug, Snafu)]
enum Error {
    #[snafu(display("failed to initialize logging"))]
    InitLogging { source: logging::Error },

    #[snafu(display("failed to handle CRDs"))]
    Crd { source: crd::Error },
}

#[derive(Debug, Parser)]
#[command(about = "Development tasks of the Redpanda Console operator")]
struct Cli {
    /// Format of the log output on stdout.
    #[arg(long, env = "XTASK_LOG_FORMAT", value_enum, default_value_t)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(subcommand)]
    Crd(CrdCommand),
}

#[derive(Debug, Subcommand)]
enum CrdCommand {
    /// Print all CRDs to stdout.
    Print(CrdArgs),

    /// Write all CRDs into a directory, one file per CRD.
    Generate {
        /// Defaults to `crates/redpanda-console-crd/crds`.
        #[arg(long, short)]
        output_dir: Option<PathBuf>,

        #[command(flatten)]
        args: CrdArgs,
    },
}

#[derive(Debug, Args)]
struct CrdArgs {
    /// Operator version used to render documentation links.
    #[arg(long, env = "OPERATOR_VERSION", default_value = "0.0.0-dev")]
    operator_version: String,
}

#[snafu::report]
fn main() -> Result<(), Error> {
    let cli = Cli::parse();
    logging::initialize_logging(LOG_ENV, "xtask", cli.log_format).context(InitLoggingSnafu)?;

    match cli.command {
        Command::Crd(CrdCommand::Print(args)) => {
            crd::print(&args.operator_version).context(CrdSnafu)
        }
        Command::Crd(CrdCommand::Generate { output_dir, args }) => {
            crd::generate(output_dir.as_deref(), &args.operator_version).context(CrdSnafu)
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_generate() {
        let cli = Cli::parse_from([
            "xtask",
            "crd",
            "generate",
            "--output-dir",
            "deploy/crds",
            "--operator-version",
            "24.1.0",
        ]);

        let Command::Crd(CrdCommand::Generate { output_dir, args }) = cli.command else {
            panic!("expected generate command");
        };
        assert_eq!(output_dir, Some(PathBuf::from("deploy/crds")));
        assert_eq!(args.operator_version, "24.1.0");
    }

    #[test]
    fn registry_contains_console() {
        let registry = crd::registry().unwrap();
        assert!(registry.get("consoles.redpanda.vectorized.io").is_some());
    }
}
