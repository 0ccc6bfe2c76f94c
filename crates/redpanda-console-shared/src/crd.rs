use std::path::Path;

use snafu::{ResultExt, Snafu};

use crate::yaml::{SerializeOptions, YamlSchema};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to write CRD YAML schema to file"))]
    WriteToFile { source: crate::yaml::Error },

    #[snafu(display("failed to write CRD YAML schema to stdout"))]
    WriteToStdout { source: crate::yaml::Error },

    #[snafu(display("failed to generate CRD YAML schema"))]
    GenerateSchema { source: crate::yaml::Error },
}

/// YAML output of the `CustomResourceDefinition` belonging to a custom resource type.
///
/// The output is an explicit document (leading `---`) with the documentation URL placeholder
/// replaced according to `operator_version`.
pub trait CustomResourceExt: kube::CustomResourceExt {
    fn write_yaml_schema<P: AsRef<Path>>(path: P, operator_version: &str) -> Result<()> {
        Self::crd()
            .write_yaml_schema(path, operator_version, SerializeOptions::default())
            .context(WriteToFileSnafu)
    }

    fn print_yaml_schema(operator_version: &str) -> Result<()> {
        Self::crd()
            .print_yaml_schema(operator_version, SerializeOptions::default())
            .context(WriteToStdoutSnafu)
    }

    fn yaml_schema(operator_version: &str) -> Result<String> {
        Self::crd()
            .generate_yaml_schema(operator_version, SerializeOptions::default())
            .context(GenerateSchemaSnafu)
    }
}

impl<T> CustomResourceExt for T where T: kube::CustomResourceExt {}
