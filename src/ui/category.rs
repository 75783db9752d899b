use super::{attr, esc};
use crate::{model::Category, view::pages::CategorySummary, view::sample};

const DEFAULT_CATEGORY_IMAGE: &str =
    "https://images.unsplash.com/photo-1519389950473-47ba0277781c?w=1200&q=80";

fn posts_label(count: usize) -> String {
    if count == 1 {
        "1 post".to_string()
    } else {
        format!("{count} posts")
    }
}

/// 分类网格
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGridProps {
    pub categories: Vec<CategorySummary>,
}

impl Default for CategoryGridProps {
    fn default() -> Self {
        Self {
            categories: sample::categories()
                .into_iter()
                .map(|(category, count)| CategorySummary { category, count })
                .collect(),
        }
    }
}

pub fn category_card(summary: &CategorySummary) -> String {
    let c = &summary.category;
    format!(
        r#"<a class="category-card" href="/categories/{slug}">
<img src="{image}" alt="{alt}" loading="lazy">
<h3>{name}</h3>
<p>{description}</p>
<span class="count">{count}</span>
</a>"#,
        slug = attr(&c.slug),
        image = attr(c.image.as_deref().unwrap_or(DEFAULT_CATEGORY_IMAGE)),
        alt = attr(&c.name),
        name = esc(&c.name),
        description = esc(c.description.as_deref().unwrap_or_default()),
        count = posts_label(summary.count),
    )
}

pub fn category_grid(props: &CategoryGridProps) -> String {
    let cards: String = props.categories.iter().map(category_card).collect();
    format!(
        r#"<section class="categories">
<h1>Categories</h1>
<p class="lead">Browse articles by topic.</p>
<div class="grid">{cards}</div>
</section>"#
    )
}

/// 分类详情页头部
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryHeroProps {
    pub category: Category,
    pub count: usize,
}

impl Default for CategoryHeroProps {
    fn default() -> Self {
        Self {
            category: sample::category("web-development"),
            count: 6,
        }
    }
}

pub fn category_hero(props: &CategoryHeroProps) -> String {
    let c = &props.category;
    format!(
        r#"<header class="category-hero" style="background-image: url('{image}')">
<a class="back" href="/categories">All categories</a>
<h1>{name}</h1>
<p>{description}</p>
<span class="count">{count}</span>
</header>"#,
        image = attr(c.image.as_deref().unwrap_or(DEFAULT_CATEGORY_IMAGE)),
        name = esc(&c.name),
        description = esc(c.description.as_deref().unwrap_or_default()),
        count = posts_label(props.count),
    )
}
