//! Bot-signature classification.
//!
//! Self-assignable onboarding roles are usually combined with at least one other
//! role by real members. An account holding nothing but roles drawn from one of
//! the watched combinations is treated as a likely bot. This is a heuristic and
//! false positives are expected; callers notify before they remove.

use std::collections::HashSet;

use crate::model::moderation::{Classification, EmptyRoleSetPolicy};

#[derive(Debug, Clone, Default)]
pub struct BotSignatureClassifier {
    watched_sets: Vec<HashSet<u64>>,
    empty_policy: EmptyRoleSetPolicy,
}

impl BotSignatureClassifier {
    pub fn new(watched_sets: Vec<HashSet<u64>>, empty_policy: EmptyRoleSetPolicy) -> Self {
        Self {
            watched_sets,
            empty_policy,
        }
    }

    /// Classifies a member by their current role set.
    ///
    /// `LikelyBot` iff `roles` is a subset of at least one watched set. An empty
    /// role set is a subset of everything, so it is resolved by the configured
    /// `EmptyRoleSetPolicy` instead. With no watched sets nobody is flagged.
    pub fn classify(&self, roles: &HashSet<u64>) -> Classification {
        if self.watched_sets.is_empty() {
            return Classification::Human;
        }

        if roles.is_empty() {
            return match self.empty_policy {
                EmptyRoleSetPolicy::Skip => Classification::Human,
                EmptyRoleSetPolicy::Flag => Classification::LikelyBot,
            };
        }

        if self
            .watched_sets
            .iter()
            .any(|watched| roles.is_subset(watched))
        {
            Classification::LikelyBot
        } else {
            Classification::Human
        }
    }
}
