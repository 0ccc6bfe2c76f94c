use delegate::delegate;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub mod condition;

use condition::{ConditionSet, ConditionStatus, ConsoleCondition, ConsoleConditionType};

/// Observed state of a [`Console`](crate::crd::Console).
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleStatus {
    /// Current state of the console.
    #[serde(default, skip_serializing_if = "ConditionSet::is_empty")]
    pub conditions: ConditionSet,
}

impl ConsoleStatus {
    delegate! {
        to self.conditions {
            /// Returns the condition of the given type, if any.
            pub fn condition(&self, type_: ConsoleConditionType) -> Option<&ConsoleCondition>;

            /// Returns the condition of the given type for in-place modification, if any.
            pub fn condition_mut(&mut self, type_: ConsoleConditionType) -> Option<&mut ConsoleCondition>;

            /// Inserts or updates a condition, see [`ConditionSet::set_condition`].
            pub fn set_condition(
                &mut self,
                type_: ConsoleConditionType,
                status: ConditionStatus,
                reason: &str,
                message: &str,
            ) -> bool;

            /// Inserts or updates a condition, see [`ConditionSet::set_condition_at`].
            pub fn set_condition_at(
                &mut self,
                type_: ConsoleConditionType,
                status: ConditionStatus,
                reason: &str,
                message: &str,
                now: Time,
            ) -> bool;
        }
    }

    /// Returns `true` if the [`ConsoleConditionType::Available`] condition is `True`.
    pub fn is_available(&self) -> bool {
        self.condition(ConsoleConditionType::Available)
            .is_some_and(|condition| condition.status == ConditionStatus::True)
    }
}
