//! The `Console` custom resource, which deploys Redpanda Console next to a Redpanda cluster.

use k8s_openapi::api::core::v1::ObjectReference;
use kube::{CustomResource, core::ObjectList};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{registry::SchemaRegistry, status::ConsoleStatus};

mod config;
mod deployment;

pub use config::*;
pub use deployment::*;

/// Desired state of a Redpanda Console.
#[derive(Clone, CustomResource, Debug, Deserialize, JsonSchema, PartialEq, Serialize)]
#[kube(
    group = "redpanda.vectorized.io",
    version = "v1alpha1",
    kind = "Console",
    plural = "consoles",
    status = "ConsoleStatus",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleSpec {
    pub console: ConsoleConfig,

    pub connect: ConnectConfig,

    pub server: ServerConfig,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logger: Option<LoggerConfig>,

    pub message_pack: MsgpackConfig,

    pub protobuf: ProtoConfig,

    /// Reference to the Redpanda `Cluster` whose Kafka settings are used by the Console.
    ///
    /// The namespace defaults to the namespace of the Console.
    pub cluster_key_ref: ObjectReference,

    /// Kafka client ID used by the Console.
    #[serde(default, rename = "clientID", skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    pub deployment: Deployment,

    /// Container image of the Console, without the tag.
    pub image: String,

    /// Image tag of the Console.
    pub version: String,
}

pub type ConsoleList = ObjectList<Console>;

impl Console {
    /// Name of the referenced Redpanda cluster.
    pub fn cluster_name(&self) -> Option<&str> {
        self.spec.cluster_key_ref.name.as_deref()
    }

    /// Namespace of the referenced Redpanda cluster, falling back to the Console's own namespace.
    pub fn cluster_namespace(&self) -> Option<&str> {
        self.spec
            .cluster_key_ref
            .namespace
            .as_deref()
            .or(self.metadata.namespace.as_deref())
    }

    /// Returns the status for modification, creating an empty one first if there is none.
    pub fn status_mut(&mut self) -> &mut ConsoleStatus {
        self.status.get_or_insert_default()
    }
}

/// Registers all custom resources of this crate with `registry`.
pub fn register(registry: &mut SchemaRegistry) -> crate::registry::Result<()> {
    registry.register::<Console>()
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use k8s_openapi::{apimachinery::pkg::apis::meta::v1::Time, jiff::Timestamp};
    use kube::{CustomResourceExt, Resource};

    use super::*;
    use crate::status::condition::{ConditionStatus, ConsoleConditionType};

    const CONSOLE_YAML: &str = indoc! {"
        apiVersion: redpanda.vectorized.io/v1alpha1
        kind: Console
        metadata:
          name: console
          namespace: redpanda
        spec:
          server:
            listenPort: 8080
            readTimeout: 30s
          logger:
            level: debug
          console:
            topicDocumentation:
              enabled: true
              git:
                enabled: true
                refreshInterval: 10m
                repository:
                  url: https://github.com/redpanda-data/console-docs
          connect:
            enabled: true
            clusters:
              - name: connect
                url: http://connect.redpanda.svc:8083
            requestTimeout: 6s
          messagePack: {}
          protobuf:
            enabled: true
            schemaRegistry:
              enabled: true
            mappings:
              - topicName: orders
                valueProtoType: shop.v1.Order
          clusterKeyRef:
            name: cluster
          clientID: console
          deployment:
            replicas: 2
            nodeSelector:
              kubernetes.io/os: linux
            resources:
              limits:
                memory: 512Mi
          image: docker.redpanda.com/redpandadata/console
          version: v2.3.1
    "};

    fn console() -> Console {
        serde_yaml::from_str(CONSOLE_YAML).expect("valid Console manifest")
    }

    #[test]
    fn deserialize_manifest() {
        let console = console();
        let spec = &console.spec;

        assert_eq!(spec.server.listen_port, Some(8080));
        assert_eq!(
            spec.server.read_timeout.map(|timeout| timeout.as_secs()),
            Some(30)
        );
        assert_eq!(spec.logger.as_ref().map(|logger| logger.level), Some(LogLevel::Debug));
        assert!(spec.console.topic_documentation.git.enabled);
        assert_eq!(spec.connect.clusters[0].name, "connect");
        assert_eq!(spec.protobuf.mappings[0].value_proto_type, "shop.v1.Order");
        assert!(spec.protobuf.mappings[0].key_proto_type.is_empty());
        assert!(!spec.message_pack.enabled);
        assert_eq!(spec.client_id.as_deref(), Some("console"));
        assert_eq!(spec.deployment.replicas, Some(2));
        assert_eq!(spec.deployment.node_selector["kubernetes.io/os"], "linux");
        assert_eq!(spec.version, "v2.3.1");
        assert!(console.status.is_none());
    }

    #[test]
    fn missing_image_is_rejected() {
        let manifest = CONSOLE_YAML.replace("  image: docker.redpanda.com/redpandadata/console\n", "");
        assert!(serde_yaml::from_str::<Console>(&manifest).is_err());
    }

    #[test]
    fn cluster_namespace_defaults_to_console_namespace() {
        let mut console = console();
        assert_eq!(console.cluster_name(), Some("cluster"));
        assert_eq!(console.cluster_namespace(), Some("redpanda"));

        console.spec.cluster_key_ref.namespace = Some("streaming".to_owned());
        assert_eq!(console.cluster_namespace(), Some("streaming"));
    }

    #[test]
    fn status_round_trip() {
        let mut console = console();
        let now = Time(Timestamp::from_second(1_700_000_000).unwrap());
        assert!(console.status_mut().set_condition_at(
            ConsoleConditionType::Available,
            ConditionStatus::True,
            "",
            "",
            now,
        ));

        let json = serde_json::to_value(&console).unwrap();
        assert_eq!(json["status"]["conditions"][0]["type"], "ConsoleAvailable");
        assert_eq!(json["status"]["conditions"][0]["status"], "True");
        assert_eq!(
            json["status"]["conditions"][0]["lastTransitionTime"],
            "2023-11-14T22:13:20Z"
        );
        assert!(json["status"]["conditions"][0].get("reason").is_none());

        let parsed: Console = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.status, console.status);
    }

    #[test]
    fn unset_optionals_are_omitted() {
        let json = serde_json::to_value(console().spec).unwrap();

        assert!(json["deployment"].get("strategy").is_none());
        assert!(json["deployment"].get("tolerations").is_none());
        assert!(json["server"].get("basePath").is_none());
        assert_eq!(json["server"]["readTimeout"], "30s");
    }

    #[test]
    fn crd_metadata() {
        let crd = Console::crd();

        assert_eq!(crd.metadata.name.as_deref(), Some("consoles.redpanda.vectorized.io"));
        assert_eq!(crd.spec.group, "redpanda.vectorized.io");
        assert_eq!(crd.spec.names.kind, "Console");
        assert_eq!(crd.spec.scope, "Namespaced");
        assert_eq!(crd.spec.versions.len(), 1);

        let version = &crd.spec.versions[0];
        assert_eq!(version.name, "v1alpha1");
        assert!(version
            .subresources
            .as_ref()
            .and_then(|subresources| subresources.status.as_ref())
            .is_some());

        assert_eq!(Console::api_version(&()), "redpanda.vectorized.io/v1alpha1");
    }

    #[test]
    fn crd_schema_required_fields() {
        let crd = serde_json::to_value(Console::crd()).unwrap();
        let spec_schema = &crd["spec"]["versions"][0]["schema"]["openAPIV3Schema"]["properties"]["spec"];

        let required: Vec<&str> = spec_schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|field| field.as_str())
            .collect();

        for field in [
            "clusterKeyRef",
            "connect",
            "console",
            "deployment",
            "image",
            "messagePack",
            "protobuf",
            "server",
            "version",
        ] {
            assert!(required.contains(&field), "{field} should be required");
        }
        assert!(!required.contains(&"logger"));
        assert!(!required.contains(&"clientID"));
    }

    #[test]
    fn deserialize_list() {
        let list: ConsoleList = serde_json::from_value(serde_json::json!({
            "apiVersion": "redpanda.vectorized.io/v1alpha1",
            "kind": "ConsoleList",
            "metadata": {},
            "items": [serde_yaml::from_str::<serde_json::Value>(CONSOLE_YAML).unwrap()],
        }))
        .unwrap();

        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].spec.image, "docker.redpanda.com/redpandadata/console");
    }
}
