//! Explicit registration of the custom resources served by the operator.
//!
//! Nothing is registered implicitly. Processes create a [`SchemaRegistry`] during setup and
//! call [`register`](crate::register) (or [`SchemaRegistry::register`] for single types) once.
//!
//! ```
//! use redpanda_console_crd::registry::SchemaRegistry;
//!
//! let mut registry = SchemaRegistry::new();
//! redpanda_console_crd::register(&mut registry).unwrap();
//!
//! assert!(registry.get("consoles.redpanda.vectorized.io").is_some());
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use redpanda_console_shared::yaml::{self, SerializeOptions, YamlSchema};
use snafu::{OptionExt, ResultExt, Snafu, ensure};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("CRD {name:?} is registered already"))]
    DuplicateCrd { name: String },

    #[snafu(display("CRD of kind {kind:?} has no name"))]
    MissingCrdName { kind: String },

    #[snafu(display("failed to create output directory {path}", path = path.display()))]
    CreateOutputDirectory {
        source: std::io::Error,
        path: PathBuf,
    },

    #[snafu(display("failed to render CRD {name:?} as YAML"))]
    RenderCrd { source: yaml::Error, name: String },

    #[snafu(display("failed to write CRD to {path}", path = path.display()))]
    WriteCrd { source: yaml::Error, path: PathBuf },
}

/// The `CustomResourceDefinition`s of all registered custom resources, in registration order.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    crds: Vec<CustomResourceDefinition>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the CRD of `K`.
    pub fn register<K: kube::CustomResourceExt>(&mut self) -> Result<()> {
        self.register_crd(K::crd())
    }

    pub fn register_crd(&mut self, crd: CustomResourceDefinition) -> Result<()> {
        let name = crd.metadata.name.clone().context(MissingCrdNameSnafu {
            kind: crd.spec.names.kind.clone(),
        })?;
        ensure!(self.get(&name).is_none(), DuplicateCrdSnafu { name });

        tracing::debug!(crd.name = %name, "registered CRD");
        self.crds.push(crd);
        Ok(())
    }

    /// Returns the CRD with the given name, like `consoles.redpanda.vectorized.io`.
    pub fn get(&self, name: &str) -> Option<&CustomResourceDefinition> {
        self.crds
            .iter()
            .find(|crd| crd.metadata.name.as_deref() == Some(name))
    }

    pub fn crds(&self) -> &[CustomResourceDefinition] {
        &self.crds
    }

    pub fn len(&self) -> usize {
        self.crds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crds.is_empty()
    }

    /// Renders all CRDs as a stream of explicit YAML documents.
    pub fn to_yaml(&self, operator_version: &str) -> Result<String> {
        self.crds.iter().try_fold(String::new(), |mut output, crd| -> Result<String> {
            let document = crd
                .generate_yaml_schema(operator_version, SerializeOptions::default())
                .with_context(|_| RenderCrdSnafu {
                    name: crd_name(crd),
                })?;
            output.push_str(&document);
            Ok(output)
        })
    }

    /// Prints all CRDs to stdout.
    pub fn print(&self, operator_version: &str) -> Result<()> {
        for crd in &self.crds {
            crd.print_yaml_schema(operator_version, SerializeOptions::default())
                .with_context(|_| RenderCrdSnafu {
                    name: crd_name(crd),
                })?;
        }

        Ok(())
    }

    /// Writes every CRD to `<directory>/<Kind>.yaml`, creating `directory` if needed, and
    /// returns the written paths.
    pub fn write_to_directory(
        &self,
        directory: impl AsRef<Path>,
        operator_version: &str,
    ) -> Result<Vec<PathBuf>> {
        let directory = directory.as_ref();
        fs::create_dir_all(directory).context(CreateOutputDirectorySnafu { path: directory })?;

        self.crds
            .iter()
            .map(|crd| -> Result<PathBuf> {
                let path = directory.join(format!("{kind}.yaml", kind = crd.spec.names.kind));

                crd.write_yaml_schema(&path, operator_version, SerializeOptions::default())
                    .with_context(|_| WriteCrdSnafu { path: path.clone() })?;

                tracing::info!(path = %path.display(), "wrote CRD");
                Ok(path)
            })
            .collect()
    }
}

fn crd_name(crd: &CustomResourceDefinition) -> String {
    crd.metadata.name.clone().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use kube::CustomResourceExt;

    use super::*;
    use crate::crd::Console;

    #[test]
    fn register_console() {
        let mut registry = SchemaRegistry::new();
        assert!(registry.is_empty());

        crate::register(&mut registry).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry
                .get("consoles.redpanda.vectorized.io")
                .map(|crd| crd.spec.names.kind.as_str()),
            Some("Console")
        );
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut registry = SchemaRegistry::new();
        registry.register::<Console>().unwrap();

        let err = registry.register::<Console>().unwrap_err();
        assert!(
            matches!(err, Error::DuplicateCrd { ref name } if name == "consoles.redpanda.vectorized.io")
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn unnamed_crd_is_rejected() {
        let mut crd = Console::crd();
        crd.metadata.name = None;

        let err = SchemaRegistry::new().register_crd(crd).unwrap_err();
        assert!(matches!(err, Error::MissingCrdName { .. }));
    }

    #[test]
    fn render_yaml() {
        let mut registry = SchemaRegistry::new();
        crate::register(&mut registry).unwrap();

        let yaml = registry.to_yaml("0.0.0-dev").unwrap();
        assert!(yaml.starts_with("---\n"));
        assert!(yaml.contains("kind: CustomResourceDefinition"));
        assert!(yaml.contains("name: consoles.redpanda.vectorized.io"));
    }

    #[test]
    fn render_yaml_with_invalid_version_fails() {
        let mut registry = SchemaRegistry::new();
        crate::register(&mut registry).unwrap();

        let err = registry.to_yaml("nightly").unwrap_err();
        assert!(matches!(err, Error::RenderCrd { .. }));
    }

    #[test]
    fn write_to_directory() {
        let mut registry = SchemaRegistry::new();
        crate::register(&mut registry).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("crds");

        let written = registry.write_to_directory(&output, "24.1.0").unwrap();

        assert_eq!(written, vec![output.join("Console.yaml")]);
        let yaml = std::fs::read_to_string(&written[0]).unwrap();
        assert!(yaml.contains("group: redpanda.vectorized.io"));
    }
}
