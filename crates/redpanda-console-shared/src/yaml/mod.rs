//! Rendering of serializable values, most notably CRDs, as YAML documents.
use std::{io::Write, path::Path, str::FromStr};

use semver::Version;
use snafu::{ResultExt, Snafu};

pub const DOCS_BASE_URL_PLACEHOLDER: &str = "DOCS_BASE_URL_PLACEHOLDER";
const REDPANDA_DOCS_BASE_URL: &str = "https://docs.redpanda.com";
const DEV_VERSION: &str = "0.0.0-dev";

type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to serialize YAML"))]
    SerializeYaml { source: serde_yaml::Error },

    #[snafu(display("failed to write YAML document separator"))]
    WriteDocumentSeparator { source: std::io::Error },

    #[snafu(display("failed to write YAML to file"))]
    WriteToFile { source: std::io::Error },

    #[snafu(display("failed to write YAML to stdout"))]
    WriteToStdout { source: std::io::Error },

    #[snafu(display("failed to parse operator version {input:?} as semantic version"))]
    ParseOperatorVersion {
        source: semver::Error,
        input: String,
    },

    #[snafu(display("serialized YAML is not valid UTF-8"))]
    ParseUtf8Bytes { source: std::string::FromUtf8Error },
}

/// Returns the documentation base URL matching `operator_version`.
///
/// Development builds (`0.0.0-dev`) link to the `current` docs, released versions link to the
/// `major.minor` docs.
pub fn docs_base_url(operator_version: &str) -> Result<String> {
    let docs_version = if operator_version == DEV_VERSION {
        "current".to_owned()
    } else {
        let version = Version::from_str(operator_version).context(ParseOperatorVersionSnafu {
            input: operator_version,
        })?;
        format!("{major}.{minor}", major = version.major, minor = version.minor)
    };

    Ok(format!("{REDPANDA_DOCS_BASE_URL}/{docs_version}"))
}

/// Options applied while serializing to YAML.
///
/// [`SerializeOptions::default()`] emits an explicit document and serializes enums as singleton
/// maps, which is what `kubectl apply` expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Adds leading triple dashes (`---`) to the output string.
    pub explicit_document: bool,

    /// Serialize enum variants as YAML maps using the variant name as the key.
    pub singleton_map: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            explicit_document: true,
            singleton_map: true,
        }
    }
}

/// YAML output for any [serializable](serde::Serialize) type.
///
/// Every operation replaces [`DOCS_BASE_URL_PLACEHOLDER`] with the docs URL of the provided
/// `operator_version`.
pub trait YamlSchema: Sized + serde::Serialize {
    fn generate_yaml_schema(
        &self,
        operator_version: &str,
        options: SerializeOptions,
    ) -> Result<String> {
        let mut buffer = Vec::new();
        serialize(&self, &mut buffer, options)?;

        let yaml = String::from_utf8(buffer).context(ParseUtf8BytesSnafu)?;
        let docs_url = docs_base_url(operator_version)?;

        Ok(yaml.replace(DOCS_BASE_URL_PLACEHOLDER, &docs_url))
    }

    fn write_yaml_schema<P: AsRef<Path>>(
        &self,
        path: P,
        operator_version: &str,
        options: SerializeOptions,
    ) -> Result<()> {
        let yaml = self.generate_yaml_schema(operator_version, options)?;
        std::fs::write(path, yaml).context(WriteToFileSnafu)
    }

    fn print_yaml_schema(&self, operator_version: &str, options: SerializeOptions) -> Result<()> {
        let yaml = self.generate_yaml_schema(operator_version, options)?;

        std::io::stdout()
            .lock()
            .write_all(yaml.as_bytes())
            .context(WriteToStdoutSnafu)
    }
}

impl<T> YamlSchema for T where T: serde::Serialize {}

/// Serializes `value` as YAML into `writer`.
pub fn serialize<T, W>(value: &T, mut writer: W, options: SerializeOptions) -> Result<()>
where
    T: serde::Serialize,
    W: Write,
{
    if options.explicit_document {
        writer
            .write_all(b"---\n")
            .context(WriteDocumentSeparatorSnafu)?;
    }

    let mut serializer = serde_yaml::Serializer::new(writer);

    if options.singleton_map {
        serde_yaml::with::singleton_map_recursive::serialize(value, &mut serializer)
            .context(SerializeYamlSnafu)
    } else {
        value.serialize(&mut serializer).context(SerializeYamlSnafu)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Topic {
        topic_name: String,
        description: String,
    }

    fn topic() -> Topic {
        Topic {
            topic_name: "orders".to_owned(),
            description: format!("See {DOCS_BASE_URL_PLACEHOLDER}/console"),
        }
    }

    #[rstest]
    #[case("0.0.0-dev", "https://docs.redpanda.com/current")]
    #[case("23.2.4", "https://docs.redpanda.com/23.2")]
    #[case("24.1.0-rc1", "https://docs.redpanda.com/24.1")]
    fn docs_url_for_version(#[case] version: &str, #[case] expected: &str) {
        assert_eq!(docs_base_url(version).unwrap(), expected);
    }

    #[test]
    fn docs_url_rejects_garbage_version() {
        let err = docs_base_url("latest").unwrap_err();
        assert!(matches!(err, Error::ParseOperatorVersion { .. }));
    }

    #[test]
    fn explicit_document_with_replaced_placeholder() {
        let yaml = topic()
            .generate_yaml_schema("0.0.0-dev", SerializeOptions::default())
            .unwrap();

        assert_eq!(
            yaml,
            "---\ntopicName: orders\ndescription: See https://docs.redpanda.com/current/console\n"
        );
    }

    #[test]
    fn implicit_document() {
        let options = SerializeOptions {
            explicit_document: false,
            singleton_map: false,
        };
        let yaml = topic().generate_yaml_schema("23.2.4", options).unwrap();

        assert!(yaml.starts_with("topicName: orders\n"));
        assert!(yaml.contains("https://docs.redpanda.com/23.2/console"));
    }

    #[test]
    fn write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("topic.yaml");

        topic()
            .write_yaml_schema(&path, "0.0.0-dev", SerializeOptions::default())
            .unwrap();

        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.starts_with("---\ntopicName: orders\n"));
    }
}
