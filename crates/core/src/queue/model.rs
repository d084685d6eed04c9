//! Offline mutation queue models.

use serde::{Deserialize, Serialize};

/// Attempts budget per mutation: a mutation failing this many applies is
/// dropped from the queue for good.
pub const MUTATION_MAX_RETRIES: u32 = 5;

/// Write operations the remote data service supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationOperation {
    Insert,
    Update,
    Delete,
}

impl MutationOperation {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// One buffered write against a remote table.
///
/// For `update`/`delete` the payload must carry an `id` field identifying
/// the target row. `retry_count` only ever grows, until the mutation either
/// applies (entry removed) or exhausts [`MUTATION_MAX_RETRIES`] (entry
/// dropped).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuedMutation {
    pub id: String,
    pub table: String,
    pub operation: MutationOperation,
    pub payload: serde_json::Value,
    pub created_at: String,
    pub retry_count: u32,
}

/// Outcome summary of one flush pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlushReport {
    /// Mutations applied remotely and removed from the queue.
    pub applied: usize,
    /// Mutations that failed and stay queued for a later flush.
    pub retried: usize,
    /// Mutations dropped after exhausting their retry budget.
    pub dropped: usize,
}

#[cfg(test)]
mod model_tests {
    use super::*;

    #[test]
    fn operation_serialization_matches_backend_contract() {
        let actual = [
            MutationOperation::Insert,
            MutationOperation::Update,
            MutationOperation::Delete,
        ]
        .iter()
        .map(|op| serde_json::to_string(op).expect("serialize operation"))
        .collect::<Vec<_>>();

        assert_eq!(actual, vec!["\"insert\"", "\"update\"", "\"delete\""]);
    }

    #[test]
    fn queued_mutation_round_trips() {
        let mutation = QueuedMutation {
            id: "m-1".to_string(),
            table: "sessions".to_string(),
            operation: MutationOperation::Update,
            payload: serde_json::json!({ "id": "s-1", "notes": "ran hot" }),
            created_at: "2024-01-10T12:00:00Z".to_string(),
            retry_count: 2,
        };

        let bytes = serde_json::to_vec(&vec![mutation.clone()]).unwrap();
        let back: Vec<QueuedMutation> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back, vec![mutation]);
    }
}
