use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use themefix_domain::{builtin_rules, FsRepoView, Rule};
use themefix_types::report::{AuditReport, FixReport};
use tracing::{debug, info};

/// The stabilization engine: the rule registry bound to a repository root.
///
/// Holds no cached file state; audit and fix read the tree fresh on every
/// call. One invocation per checkout at a time — the engine performs no
/// locking against concurrent runs.
pub struct Engine {
    root: Utf8PathBuf,
    rules: Vec<Box<dyn Rule>>,
}

impl Engine {
    pub fn new(root: Utf8PathBuf) -> Self {
        Self {
            root,
            rules: builtin_rules(),
        }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Evaluate every rule's detector in registry order. Read-only.
    ///
    /// Detectors never abort the audit: a detector error counts as "problem
    /// present" and becomes a problem entry naming the rule.
    pub fn audit(&self) -> AuditReport {
        let repo = FsRepoView::new(self.root.clone());
        let mut problems = Vec::new();

        for rule in &self.rules {
            match rule.detect(&repo) {
                Ok(true) => debug!(rule = rule.name(), "detector satisfied"),
                Ok(false) => problems.push(rule.problem()),
                Err(e) => {
                    debug!(rule = rule.name(), error = %format!("{e:#}"), "detector failed");
                    problems.push(format!("{}: detector failed: {e:#}", rule.name()));
                }
            }
        }

        info!(problems = problems.len(), "audit complete");
        AuditReport::from_problems(problems)
    }

    /// Run every rule's applicator in registry order, unconditionally.
    ///
    /// Detectors are advisory for audit only; applicators are already
    /// idempotent, so nothing consults them here. The first applicator
    /// error aborts the remaining rules and surfaces; earlier rules' writes
    /// stay in place.
    pub fn fix_all(&self) -> anyhow::Result<FixReport> {
        let repo = FsRepoView::new(self.root.clone());
        let mut notes = Vec::new();

        for rule in &self.rules {
            let mut rule_notes = rule
                .apply(&repo)
                .with_context(|| format!("apply rule `{}`", rule.name()))?;
            debug!(rule = rule.name(), notes = rule_notes.len(), "rule applied");
            notes.append(&mut rule_notes);
        }

        info!(notes = notes.len(), "fix-all complete");
        Ok(FixReport { notes })
    }
}
