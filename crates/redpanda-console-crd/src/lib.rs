//! Kubernetes custom resources of the Redpanda Console operator.
//!
//! - [`crd`] contains the `Console` custom resource and its configuration types.
//! - [`status`] contains the observed state and its conditions.
//! - [`registry`] collects the CRDs for printing or writing them to disk.

pub mod crd;
pub mod logging;
pub mod registry;
pub mod status;

pub use crd::register;

// External re-exports
pub use k8s_openapi;
pub use kube;
pub use schemars;
// Internal re-exports
pub use redpanda_console_shared as shared;
pub use redpanda_console_shared::{crd::CustomResourceExt, yaml::YamlSchema};
