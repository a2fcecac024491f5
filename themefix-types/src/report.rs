use serde::{Deserialize, Serialize};

/// Result of evaluating every rule's detector, in registry order.
///
/// `ok` is true exactly when `problems` is empty; an empty report is the
/// sole pass condition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub ok: bool,

    #[serde(default)]
    pub problems: Vec<String>,
}

impl AuditReport {
    pub fn from_problems(problems: Vec<String>) -> Self {
        Self {
            ok: problems.is_empty(),
            problems,
        }
    }
}

/// Notes emitted by every rule's applicator, concatenated in registry order.
///
/// Every rule contributes at least one note per run, whether or not it
/// changed anything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixReport {
    #[serde(default)]
    pub notes: Vec<String>,
}
