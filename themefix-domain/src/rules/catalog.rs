use crate::ports::RepoView;
use crate::rules::{read_if_exists, Rule, BASE_CSS};
use camino::Utf8Path;
use themefix_edit::append_once;

/// Collection-grid layout plus the quick-add form on product cards.
pub struct CatalogRule;

const CSS_MARKER: &str = "MCP_COLLECTION";
const CARD_MARKER: &str = "MCP_QUICK_ADD";
const CARD_TEMPLATE: &str = "snippets/card-product.liquid";

const GRID_CSS: &str = r#"/* MCP_COLLECTION */
.template-collection .grid.product-grid{grid-template-columns:repeat(2,minmax(360px,1fr))!important;gap:28px!important;}
@media (max-width:989px){.template-collection .grid.product-grid{grid-template-columns:1fr!important;gap:20px!important;}}
.template-collection .card--product .card__inner .media{padding-top:120%!important;}
.card--product .media img{object-fit:cover;}
.card--product .card__content,.card--product .card__information{text-align:center!important;align-items:center;}
.card--product .price{justify-content:center;}
.card--product .card__cta{margin-top:10px;}
.card--product .card__cta .button{width:100%;}
"#;

const QUICK_ADD_BLOCK: &str = r#"{%- assign first_available = product.variants | where: 'available', true | first -%}
<div class="card__cta"><!-- MCP_QUICK_ADD -->
  {%- if product.has_only_default_variant and first_available -%}
    <form method="post" action="/cart/add" class="quick-add">
      <input type="hidden" name="id" value="{{ first_available.id }}">
      <button type="submit" class="button button--full">Add to cart</button>
    </form>
  {%- else -%}
    <a href="{{ product.url }}" class="button button--full button--secondary">View options</a>
  {%- endif -%}
</div>
"#;

impl Rule for CatalogRule {
    fn name(&self) -> &'static str {
        "catalog"
    }

    fn problem(&self) -> String {
        "catalog: grid css or quick-add marker missing".to_string()
    }

    fn detect(&self, repo: &dyn RepoView) -> anyhow::Result<bool> {
        let css = read_if_exists(repo, Utf8Path::new(BASE_CSS))?;
        let card = read_if_exists(repo, Utf8Path::new(CARD_TEMPLATE))?;
        Ok(css.contains(CSS_MARKER) && card.contains(CARD_MARKER))
    }

    fn apply(&self, repo: &dyn RepoView) -> anyhow::Result<Vec<String>> {
        append_once(repo.root(), Utf8Path::new(BASE_CSS), CSS_MARKER, GRID_CSS)?;

        let card = Utf8Path::new(CARD_TEMPLATE);
        let injected = if repo.exists(card) {
            append_once(repo.root(), card, CARD_MARKER, QUICK_ADD_BLOCK)?
        } else {
            false
        };

        let note = if injected {
            "catalog: quick-add injected"
        } else {
            "catalog: css ok"
        };
        Ok(vec![note.to_string()])
    }
}
