use crate::ports::RepoView;
use crate::rules::Rule;
use camino::Utf8Path;
use serde_json::json;
use themefix_edit::ensure_defaults;

/// Default display strings for the cart upsell and discount UI.
pub struct LocalesRule;

const LOCALE_FILE: &str = "locales/en.default.json";

fn default_strings() -> serde_json::Value {
    json!({
        "cart": {
            "upsells": {
                "heading": "You may also like",
                "add": "Add"
            },
            "discount": {
                "have_code": "Have a discount code?"
            }
        }
    })
}

impl Rule for LocalesRule {
    fn name(&self) -> &'static str {
        "locales"
    }

    fn problem(&self) -> String {
        format!("locales: missing {LOCALE_FILE}")
    }

    fn detect(&self, repo: &dyn RepoView) -> anyhow::Result<bool> {
        Ok(repo.exists(Utf8Path::new(LOCALE_FILE)))
    }

    fn apply(&self, repo: &dyn RepoView) -> anyhow::Result<Vec<String>> {
        let rel = Utf8Path::new(LOCALE_FILE);
        if !repo.exists(rel) {
            // A theme without the locale document gets no write; the audit
            // keeps reporting it until the file exists.
            return Ok(vec!["locales: file missing (skipped)".to_string()]);
        }
        ensure_defaults(repo.root(), rel, &default_strings())?;
        Ok(vec!["locales: ok".to_string()])
    }
}
