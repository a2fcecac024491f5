use crate::ports::RepoView;
use crate::rules::Rule;
use camino::Utf8Path;
use regex::Regex;
use std::sync::LazyLock;
use themefix_edit::{append_once, rewrite_if_absent};

/// Injects the WebSite structured-data snippet and references it from the
/// theme layout.
pub struct JsonLdRule;

const SNIPPET: &str = "snippets/jsonld-website.liquid";
const LAYOUT: &str = "layout/theme.liquid";
const RENDER_LINE: &str = "{% render 'jsonld-website' %}";

const SNIPPET_BODY: &str = r#"<script type="application/ld+json">{
"@context":"https://schema.org","@type":"WebSite",
"url": {{ shop.url | json }},"name": {{ shop.name | json }},
"potentialAction":{"@type":"SearchAction",
"target": {{ shop.url | append: "/search?q={query}" | json }},
"query-input":"required name=query"}}</script>
"#;

static HEAD_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</head>").expect("head-close pattern"));

/// Inserts the render line immediately before the first closing head tag,
/// case-insensitively. Returns `None` when the layout has no head to close.
pub(crate) fn insert_head_render(content: &str) -> Option<String> {
    let m = HEAD_CLOSE.find(content)?;
    let mut out = String::with_capacity(content.len() + RENDER_LINE.len() + 12);
    out.push_str(&content[..m.start()]);
    out.push_str("  ");
    out.push_str(RENDER_LINE);
    out.push_str("\n</head>");
    out.push_str(&content[m.end()..]);
    Some(out)
}

impl Rule for JsonLdRule {
    fn name(&self) -> &'static str {
        "jsonld"
    }

    fn problem(&self) -> String {
        format!("jsonld: missing {SNIPPET}")
    }

    fn detect(&self, repo: &dyn RepoView) -> anyhow::Result<bool> {
        Ok(repo.exists(Utf8Path::new(SNIPPET)))
    }

    fn apply(&self, repo: &dyn RepoView) -> anyhow::Result<Vec<String>> {
        let mut notes = Vec::new();

        let snippet = Utf8Path::new(SNIPPET);
        if !repo.exists(snippet) {
            append_once(repo.root(), snippet, "application/ld+json", SNIPPET_BODY)?;
            notes.push(format!("created {SNIPPET}"));
        }

        if rewrite_if_absent(repo.root(), Utf8Path::new(LAYOUT), RENDER_LINE, insert_head_render)? {
            notes.push(format!("inserted render in {LAYOUT}"));
        }

        if notes.is_empty() {
            notes.push("jsonld ok".to_string());
        }
        Ok(notes)
    }
}
