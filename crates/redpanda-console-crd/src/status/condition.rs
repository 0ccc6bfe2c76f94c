//! Status conditions of a [`Console`](crate::crd::Console).
//!
//! Conditions are kept in a [`ConditionSet`], which holds at most one [`ConsoleCondition`] per
//! [`ConsoleConditionType`]. The set is only ever changed through
//! [`ConditionSet::set_condition`], which upserts a condition and bumps its
//! `lastTransitionTime` only if the status, reason or message actually changed. This makes
//! repeated reconciliations with the same outcome a no-op.

use std::slice::Iter;

use delegate::delegate;
use k8s_openapi::{apimachinery::pkg::apis::meta::v1::Time, jiff::Timestamp};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleCondition {
    /// Type of the condition.
    #[serde(rename = "type")]
    pub type_: ConsoleConditionType,

    /// Status of the condition, one of True, False, Unknown.
    pub status: ConditionStatus,

    /// Last time the condition transitioned from one status to another.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<Time>,

    /// Unique, one-word, CamelCase reason for the condition's last transition.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason: String,

    /// Human-readable message indicating details about the last transition.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

#[derive(
    strum::Display,
    Clone,
    Copy,
    Debug,
    Deserialize,
    Eq,
    Hash,
    JsonSchema,
    PartialEq,
    Serialize,
)]
pub enum ConsoleConditionType {
    /// All Console resources are created. This does not mean they are ready.
    #[serde(rename = "ConsoleAvailable")]
    #[strum(serialize = "ConsoleAvailable")]
    Available,
}

#[derive(
    strum::Display,
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Eq,
    Hash,
    JsonSchema,
    PartialEq,
    Serialize,
)]
#[serde(rename_all = "PascalCase")]
pub enum ConditionStatus {
    /// The resource is in the condition.
    True,

    /// The resource is not in the condition.
    False,

    /// It cannot be decided whether the resource is in the condition or not.
    #[default]
    Unknown,
}

/// An ordered list of [`ConsoleCondition`]s with at most one entry per type, serialized as a
/// plain array.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConditionSet(Vec<ConsoleCondition>);

impl ConditionSet {
    pub fn new() -> Self {
        Self::default()
    }

    delegate! {
        to self.0 {
            /// Returns the number of conditions.
            pub fn len(&self) -> usize;

            /// Returns if there are no conditions.
            pub fn is_empty(&self) -> bool;

            /// Iterates over the conditions in insertion order.
            pub fn iter(&self) -> Iter<'_, ConsoleCondition>;
        }
    }

    /// Returns the condition of the given type, if any.
    pub fn condition(&self, type_: ConsoleConditionType) -> Option<&ConsoleCondition> {
        self.0.iter().find(|condition| condition.type_ == type_)
    }

    /// Returns the condition of the given type for in-place modification, if any.
    pub fn condition_mut(&mut self, type_: ConsoleConditionType) -> Option<&mut ConsoleCondition> {
        self.0.iter_mut().find(|condition| condition.type_ == type_)
    }

    /// Inserts or updates the condition of the given type and returns whether anything changed.
    ///
    /// The `lastTransitionTime` is set to the current time if `status`, `reason` or `message`
    /// differ from the stored values, or if the condition did not exist yet. Otherwise the call
    /// leaves the condition untouched.
    pub fn set_condition(
        &mut self,
        type_: ConsoleConditionType,
        status: ConditionStatus,
        reason: &str,
        message: &str,
    ) -> bool {
        self.set_condition_at(type_, status, reason, message, Time(Timestamp::now()))
    }

    /// Same as [`ConditionSet::set_condition`], but uses `now` as the transition time.
    pub fn set_condition_at(
        &mut self,
        type_: ConsoleConditionType,
        status: ConditionStatus,
        reason: &str,
        message: &str,
        now: Time,
    ) -> bool {
        let Some(condition) = self.condition_mut(type_) else {
            tracing::debug!(condition_type = %type_, %status, reason, "adding condition");

            self.0.push(ConsoleCondition {
                type_,
                status,
                last_transition_time: Some(now),
                reason: reason.to_owned(),
                message: message.to_owned(),
            });
            return true;
        };

        let changed =
            condition.status != status || condition.reason != reason || condition.message != message;

        if changed {
            tracing::debug!(
                condition_type = %type_,
                from = %condition.status,
                to = %status,
                reason,
                "condition transitioned"
            );

            condition.last_transition_time = Some(now);
            condition.status = status;
            condition.reason = reason.to_owned();
            condition.message = message.to_owned();
        }

        changed
    }
}

impl<'a> IntoIterator for &'a ConditionSet {
    type IntoIter = Iter<'a, ConsoleCondition>;
    type Item = &'a ConsoleCondition;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<Vec<ConsoleCondition>> for ConditionSet {
    /// Builds a set from `conditions`, keeping the last entry of every duplicated type at the
    /// position of its first occurrence.
    fn from(conditions: Vec<ConsoleCondition>) -> Self {
        let mut set = Self::new();

        for condition in conditions {
            match set.condition_mut(condition.type_) {
                Some(existing) => *existing = condition,
                None => set.0.push(condition),
            }
        }

        set
    }
}

impl From<ConditionSet> for Vec<ConsoleCondition> {
    fn from(set: ConditionSet) -> Self {
        set.0
    }
}
