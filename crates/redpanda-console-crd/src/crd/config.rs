//! Configuration of the Console application, embedded in the [`ConsoleSpec`](super::ConsoleSpec).
//!
//! Every field has a default, so only the settings which differ from the Console defaults have
//! to be specified. Durations are written like `10s` or `1m30s`.

use redpanda_console_shared::time::Duration;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConsoleConfig {
    /// Topic documentation rendered in the Console UI.
    pub topic_documentation: TopicDocumentationConfig,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TopicDocumentationConfig {
    pub enabled: bool,

    /// Git repository containing the Markdown documentation of the topics.
    pub git: GitConfig,
}

/// Kafka Connect clusters managed through the Console.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConnectConfig {
    pub enabled: bool,

    pub clusters: Vec<ConnectClusterConfig>,

    /// Timeout for the connectivity test run at Console startup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_timeout: Option<Duration>,

    /// Timeout for reading responses from the Connect REST API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_timeout: Option<Duration>,

    /// Timeout of a single request against the Connect REST API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<Duration>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConnectClusterConfig {
    /// Unique name of the cluster, shown in the UI.
    pub name: String,

    /// URL of the Connect REST API, for example `http://connect.redpanda.svc:8083`.
    pub url: String,

    pub tls: ConnectTlsConfig,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub username: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,

    /// Bearer token, used instead of basic authentication when set.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub token: String,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConnectTlsConfig {
    pub enabled: bool,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub ca_filepath: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub cert_filepath: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub key_filepath: String,

    pub insecure_skip_tls_verify: bool,
}

/// The HTTP server of the Console.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerConfig {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub listen_address: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub listen_port: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub graceful_shutdown_timeout: Option<Duration>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_timeout: Option<Duration>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_timeout: Option<Duration>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub idle_timeout: Option<Duration>,

    /// gzip compression level, 0 disables compression.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression_level: Option<u8>,

    /// Sub-path under which the Console is served, for example behind a reverse proxy.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub base_path: String,

    /// Use the `X-Forwarded-Prefix` header as base path.
    pub set_base_path_from_x_forwarded_prefix: bool,

    /// Strip the base path before routing requests.
    pub strip_prefix: bool,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoggerConfig {
    pub level: LogLevel,
}

#[derive(
    strum::Display, Clone, Copy, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

/// Deserialization of MessagePack encoded messages.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MsgpackConfig {
    pub enabled: bool,

    /// Topics whose messages are MessagePack encoded. Regular expressions are allowed.
    pub topic_names: Vec<String>,
}

/// Deserialization of Protobuf encoded messages.
///
/// Proto definitions can be provided via the schema registry, git or the filesystem.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProtoConfig {
    pub enabled: bool,

    pub schema_registry: SchemaRegistryConfig,

    pub git: GitConfig,

    pub file_system: FilesystemConfig,

    /// Proto types used per topic. Not required when the schema registry is used.
    pub mappings: Vec<TopicMapping>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchemaRegistryConfig {
    pub enabled: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_interval: Option<Duration>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TopicMapping {
    pub topic_name: String,

    /// Fully qualified proto type of the record key, for example `shop.v1.OrderKey`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub key_proto_type: String,

    /// Fully qualified proto type of the record value.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value_proto_type: String,
}

/// A git repository which is periodically pulled by the Console.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GitConfig {
    pub enabled: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_interval: Option<Duration>,

    pub repository: GitRepositoryConfig,

    pub basic_auth: GitBasicAuthConfig,

    pub ssh: GitSshConfig,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GitRepositoryConfig {
    pub url: String,

    /// Branch to check out, the default branch of the repository if empty.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub branch: String,

    /// Directory within the repository to search for files.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub base_directory: String,

    /// How many directory levels below the base directory are searched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<u32>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GitBasicAuthConfig {
    pub enabled: bool,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub username: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GitSshConfig {
    pub enabled: bool,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub username: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub private_key: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub private_key_filepath: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub passphrase: String,
}

/// Files loaded from the local filesystem of the Console container.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilesystemConfig {
    pub enabled: bool,

    pub paths: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_interval: Option<Duration>,
}
