use crate::ports::RepoView;
use camino::Utf8Path;

mod catalog;
mod header_icons;
mod jsonld;
mod locales;
mod trust_bar;

/// Stylesheet every CSS-appending rule targets.
pub(crate) const BASE_CSS: &str = "assets/base.css";

/// A single stabilization rule: a read-only detector paired with an
/// idempotent applicator.
///
/// Detectors never mutate. Applicators must be safe to call when the fix is
/// already in place, and always emit at least one note. The rule name
/// appears verbatim in both the audit problem and every fix note so the two
/// reports correlate.
pub trait Rule {
    fn name(&self) -> &'static str;

    /// One-line problem string used when `detect` reports the fix absent.
    fn problem(&self) -> String;

    /// Pure read over the current tree: is the fix already present?
    fn detect(&self, repo: &dyn RepoView) -> anyhow::Result<bool>;

    /// Apply the fix. Idempotent; returns the notes describing what (if
    /// anything) changed.
    fn apply(&self, repo: &dyn RepoView) -> anyhow::Result<Vec<String>>;
}

/// The registry. Order is total and deterministic; no rule depends on
/// another having run first.
pub fn builtin_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(jsonld::JsonLdRule),
        Box::new(catalog::CatalogRule),
        Box::new(trust_bar::TrustBarRule),
        Box::new(header_icons::HeaderIconsRule),
        Box::new(locales::LocalesRule),
    ]
}

/// Read a file through the view, or an empty string when it does not exist.
pub(crate) fn read_if_exists(repo: &dyn RepoView, rel: &Utf8Path) -> anyhow::Result<String> {
    if repo.exists(rel) {
        repo.read_to_string(rel)
    } else {
        Ok(String::new())
    }
}
