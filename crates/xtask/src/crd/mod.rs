use std::path::{Path, PathBuf};

use redpanda_console_crd::registry::{self, SchemaRegistry};
use snafu::{OptionExt, ResultExt, Snafu};

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to register CRDs"))]
    RegisterCrds { source: registry::Error },

    #[snafu(display("failed to print CRDs"))]
    PrintCrds { source: registry::Error },

    #[snafu(display("failed to write CRDs"))]
    WriteCrds { source: registry::Error },

    #[snafu(display("failed to get manifest directory"))]
    GetManifestDirectory { source: std::env::VarError },

    #[snafu(display("failed to get parent directory of {path}", path = path.display()))]
    GetParentDirectory { path: PathBuf },
}

/// Builds the registry containing every CRD of the workspace.
pub fn registry() -> Result<SchemaRegistry, Error> {
    let mut registry = SchemaRegistry::new();
    redpanda_console_crd::register(&mut registry).context(RegisterCrdsSnafu)?;

    Ok(registry)
}

pub fn print(operator_version: &str) -> Result<(), Error> {
    registry()?.print(operator_version).context(PrintCrdsSnafu)
}

pub fn generate(output_dir: Option<&Path>, operator_version: &str) -> Result<(), Error> {
    let output_dir = match output_dir {
        Some(output_dir) => output_dir.to_path_buf(),
        None => default_output_dir()?,
    };

    let written = registry()?
        .write_to_directory(&output_dir, operator_version)
        .context(WriteCrdsSnafu)?;

    tracing::info!(count = written.len(), output_dir = %output_dir.display(), "generated CRDs");
    Ok(())
}

/// `crates/redpanda-console-crd/crds`, resolved relative to this crate.
fn default_output_dir() -> Result<PathBuf, Error> {
    let path = std::env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .context(GetManifestDirectorySnafu)?;

    Ok(path
        .parent()
        .with_context(|| GetParentDirectorySnafu { path: path.clone() })?
        .join("redpanda-console-crd/crds"))
}
