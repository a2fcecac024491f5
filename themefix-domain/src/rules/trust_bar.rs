use crate::ports::RepoView;
use crate::rules::{read_if_exists, Rule, BASE_CSS};
use camino::Utf8Path;
use regex::Regex;
use std::sync::LazyLock;
use themefix_edit::{append_once, rewrite_first_match};
use tracing::debug;

/// Horizontal trust-bar layout: CSS plus a one-time structural wrap of the
/// first template carrying the anchor phrases.
pub struct TrustBarRule;

const CSS_MARKER: &str = "MCP_USP";
const ANCHOR: &str = "SSL Secure";
const WRAP_MARKER: &str = "ast-usp__inner";

const USP_CSS: &str = r#"/* MCP_USP */
.ast-usp__inner{display:flex;align-items:center;justify-content:center;gap:22px;min-height:44px;}
.ast-usp__inner>*{display:inline-flex;align-items:center;gap:8px;white-space:nowrap;}
@media (max-width:640px){.ast-usp__inner{justify-content:flex-start;overflow-x:auto;-webkit-overflow-scrolling:touch;padding-bottom:6px;}.ast-usp__inner>*{flex:0 0 auto;}}
"#;

// Anchor region: from "SSL" through "Shipping" up to the next closing tag or
// end of line. First match wins; everything after the first wrapped file is
// left alone.
static STRIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?sm)(SSL.*?Shipping.*?)(</|$)").expect("trust-strip pattern"));

/// Wraps the SSL…Shipping strip of `content` in the styled container.
/// Returns `None` when the anchor phrase is absent or the file is already
/// wrapped.
pub(crate) fn wrap_trust_strip(content: &str) -> Option<String> {
    if !content.contains(ANCHOR) || content.contains(WRAP_MARKER) {
        return None;
    }
    STRIP_RE.captures(content)?;
    Some(
        STRIP_RE
            .replace(
                content,
                r#"<div class="ast-usp"><div class="page-width ast-usp__inner">$1</div></div>$2"#,
            )
            .into_owned(),
    )
}

impl Rule for TrustBarRule {
    fn name(&self) -> &'static str {
        "trust bar"
    }

    fn problem(&self) -> String {
        "trust bar: css marker missing".to_string()
    }

    fn detect(&self, repo: &dyn RepoView) -> anyhow::Result<bool> {
        let css = read_if_exists(repo, Utf8Path::new(BASE_CSS))?;
        Ok(css.contains(CSS_MARKER))
    }

    fn apply(&self, repo: &dyn RepoView) -> anyhow::Result<Vec<String>> {
        append_once(repo.root(), Utf8Path::new(BASE_CSS), CSS_MARKER, USP_CSS)?;

        let candidates = repo.find("**/*.liquid")?;
        let wrapped =
            rewrite_first_match(repo.root(), &candidates, WRAP_MARKER, wrap_trust_strip)?;
        if let Some(file) = &wrapped {
            debug!(file = %file, "wrapped trust strip");
        }

        let note = if wrapped.is_some() {
            "trust bar: wrapped + css"
        } else {
            "trust bar: css ok"
        };
        Ok(vec![note.to_string()])
    }
}

#[cfg(test)]
mod tests {
    use super::wrap_trust_strip;

    #[test]
    fn wraps_the_anchor_region() {
        let content = "<div>SSL Secure | Free Shipping</div>";
        let out = wrap_trust_strip(content).unwrap();
        assert!(out.starts_with(
            r#"<div><div class="ast-usp"><div class="page-width ast-usp__inner">SSL Secure | Free Shipping"#
        ));
        assert!(out.contains("</div></div></div>"));
    }

    #[test]
    fn wraps_up_to_end_of_line_when_no_closing_tag_follows() {
        let content = "SSL Secure - Fast Shipping\nmore text";
        let out = wrap_trust_strip(content).unwrap();
        assert!(out.contains(r#"ast-usp__inner">SSL Secure - Fast Shipping</div></div>"#));
        assert!(out.ends_with("more text"));
    }

    #[test]
    fn anchor_region_may_span_lines() {
        let content = "<p>SSL Secure</p>\n<p>Easy Returns</p>\n<p>Free Shipping</p>";
        let out = wrap_trust_strip(content).unwrap();
        assert!(out.contains("ast-usp__inner"));
        assert!(out.contains("Easy Returns"));
    }

    #[test]
    fn already_wrapped_content_is_skipped() {
        let content = r#"<div class="ast-usp__inner">SSL Secure Shipping</div>"#;
        assert_eq!(wrap_trust_strip(content), None);
    }

    #[test]
    fn content_without_anchor_is_skipped() {
        assert_eq!(wrap_trust_strip("<div>Free Shipping</div>"), None);
    }
}
