use serde::{Deserialize, Serialize};

use crate::database::{Collection, UpdateCount};

/// Response for single-document inserts
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertResponse {
    pub success: bool,
    pub inserted_id: String,
}

impl InsertResponse {
    pub fn new(id: mongodb::bson::oid::ObjectId) -> Self {
        Self {
            success: true,
            inserted_id: id.to_hex(),
        }
    }
}

/// Response for single-collection updates
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    pub success: bool,
    pub matched_count: u64,
    pub modified_count: u64,
}

impl From<UpdateCount> for UpdateResponse {
    fn from(count: UpdateCount) -> Self {
        Self {
            success: count.matched > 0,
            matched_count: count.matched,
            modified_count: count.modified,
        }
    }
}

/// Response for single-collection deletes
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub success: bool,
    pub deleted_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WriteAction {
    Update,
    Delete,
}

/// How required steps combine into the single `acknowledged` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum SuccessPolicy {
    /// Every required step must affect at least one document.
    AllRequired,
    /// One required step affecting a document is enough.
    AnyRequired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WriteStatus {
    /// All required steps affected documents
    Complete,
    /// Some, not all
    Partial,
    #[serde(rename = "none")]
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct WriteStep {
    pub collection: String,
    pub action: WriteAction,
    pub affected: u64,
    /// Cleanup steps are reported but do not count towards the status.
    pub required: bool,
}

/// Result of a multi-collection write sequence.
///
/// The steps are independent single-collection writes issued in order; nothing
/// is rolled back, so a `Partial` status means some writes landed and others
/// did not.
#[derive(Debug, Clone)]
pub struct WriteOutcome {
    workflow: &'static str,
    policy: SuccessPolicy,
    steps: Vec<WriteStep>,
}

impl WriteOutcome {
    pub fn new(workflow: &'static str, policy: SuccessPolicy) -> Self {
        Self {
            workflow,
            policy,
            steps: Vec::new(),
        }
    }

    pub fn required(&mut self, collection: Collection, action: WriteAction, affected: u64) {
        self.push(collection, action, affected, true);
    }

    pub fn cleanup(&mut self, collection: Collection, action: WriteAction, affected: u64) {
        self.push(collection, action, affected, false);
    }

    fn push(&mut self, collection: Collection, action: WriteAction, affected: u64, required: bool) {
        log::debug!(
            "[{}] {:?} {} -> {} document(s)",
            self.workflow,
            action,
            collection.name(),
            affected
        );
        self.steps.push(WriteStep {
            collection: collection.name().to_string(),
            action,
            affected,
            required,
        });
    }

    pub fn steps(&self) -> &[WriteStep] {
        &self.steps
    }

    /// Required steps that affected at least one document
    pub fn completed(&self) -> usize {
        self.steps.iter().filter(|s| s.required && s.affected > 0).count()
    }

    pub fn total(&self) -> usize {
        self.steps.iter().filter(|s| s.required).count()
    }

    pub fn status(&self) -> WriteStatus {
        let completed = self.completed();
        if completed == 0 {
            WriteStatus::Unchanged
        } else if completed == self.total() {
            WriteStatus::Complete
        } else {
            WriteStatus::Partial
        }
    }

    pub fn acknowledged(&self) -> bool {
        match self.policy {
            SuccessPolicy::AllRequired => self.status() == WriteStatus::Complete,
            SuccessPolicy::AnyRequired => self.completed() > 0,
        }
    }

    /// Documents affected by the required step on `collection`
    pub fn affected(&self, collection: Collection) -> u64 {
        self.steps
            .iter()
            .filter(|s| s.required && s.collection == collection.name())
            .map(|s| s.affected)
            .sum()
    }

    pub fn summary(&self) -> WriteSummary {
        WriteSummary {
            workflow: self.workflow.to_string(),
            status: self.status(),
            completed: self.completed(),
            total: self.total(),
            acknowledged: self.acknowledged(),
            policy: self.policy,
            steps: self.steps().to_vec(),
        }
    }
}

/// Wire form of a `WriteOutcome`
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct WriteSummary {
    pub workflow: String,
    pub status: WriteStatus,
    pub completed: usize,
    pub total: usize,
    pub acknowledged: bool,
    pub policy: SuccessPolicy,
    pub steps: Vec<WriteStep>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(policy: SuccessPolicy, affected: &[u64]) -> WriteOutcome {
        let mut outcome = WriteOutcome::new("test", policy);
        for count in affected {
            outcome.required(Collection::Products, WriteAction::Delete, *count);
        }
        outcome
    }

    #[test]
    fn test_status_distinguishes_zero_one_two() {
        assert_eq!(outcome(SuccessPolicy::AllRequired, &[0, 0]).status(), WriteStatus::Unchanged);
        assert_eq!(outcome(SuccessPolicy::AllRequired, &[1, 0]).status(), WriteStatus::Partial);
        assert_eq!(outcome(SuccessPolicy::AllRequired, &[3, 1]).status(), WriteStatus::Complete);
    }

    #[test]
    fn test_policies_disagree_on_partial() {
        assert!(!outcome(SuccessPolicy::AllRequired, &[1, 0]).acknowledged());
        assert!(outcome(SuccessPolicy::AnyRequired, &[1, 0]).acknowledged());
        assert!(!outcome(SuccessPolicy::AnyRequired, &[0, 0]).acknowledged());
    }

    #[test]
    fn test_cleanup_steps_do_not_count() {
        let mut outcome = outcome(SuccessPolicy::AllRequired, &[1]);
        outcome.cleanup(Collection::Reports, WriteAction::Delete, 0);

        assert_eq!(outcome.total(), 1);
        assert_eq!(outcome.status(), WriteStatus::Complete);
        assert_eq!(outcome.steps().len(), 2);
    }

    #[test]
    fn test_summary_serializes_status_as_none() {
        let json = serde_json::to_value(outcome(SuccessPolicy::AllRequired, &[0]).summary()).unwrap();
        assert_eq!(json["status"], "none");
        assert_eq!(json["policy"], "allRequired");
    }

    #[test]
    fn test_summary_carries_cleanup_steps() {
        let mut outcome = outcome(SuccessPolicy::AllRequired, &[1]);
        outcome.cleanup(Collection::Orders, WriteAction::Delete, 2);

        let summary = outcome.summary();
        assert_eq!(summary.steps, outcome.steps());
        assert!(!summary.steps[1].required);
    }
}
