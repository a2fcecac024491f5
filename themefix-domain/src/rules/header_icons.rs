use crate::ports::RepoView;
use crate::rules::{read_if_exists, Rule, BASE_CSS};
use camino::Utf8Path;
use themefix_edit::append_once;

/// Header icon and menu-drawer styling. CSS only, no structural rewrite.
pub struct HeaderIconsRule;

const CSS_MARKER: &str = "MCP_HEADER_ICONS";

const ICON_CSS: &str = r#"/* MCP_HEADER_ICONS */
.header__icons .header__icon,.header__icons .menu-drawer__trigger{background:transparent!important;border:0!important;box-shadow:none!important;color:#fff;width:44px;height:44px;display:inline-flex;align-items:center;justify-content:center;}
.header__icon--cart .cart-count-bubble{position:absolute;top:4px;right:4px;background:#F7E06A;color:#111;min-width:16px;height:16px;line-height:16px;padding:0 4px;border-radius:999px;font-size:11px;}
.menu-drawer__inner-container{background:#0b0b0c;color:#fff;}
.menu-drawer__menu-item{color:#fff;}
"#;

impl Rule for HeaderIconsRule {
    fn name(&self) -> &'static str {
        "header icons"
    }

    fn problem(&self) -> String {
        "header icons: css marker missing".to_string()
    }

    fn detect(&self, repo: &dyn RepoView) -> anyhow::Result<bool> {
        let css = read_if_exists(repo, Utf8Path::new(BASE_CSS))?;
        Ok(css.contains(CSS_MARKER))
    }

    fn apply(&self, repo: &dyn RepoView) -> anyhow::Result<Vec<String>> {
        append_once(repo.root(), Utf8Path::new(BASE_CSS), CSS_MARKER, ICON_CSS)?;
        Ok(vec!["header icons: ok".to_string()])
    }
}
