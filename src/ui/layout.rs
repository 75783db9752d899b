use super::{PageContext, attr, esc};
use crate::seo::{Head, Seo};

const NAV: [(&str, &str); 5] = [
    ("/", "Home"),
    ("/blog", "Blog Posts"),
    ("/categories", "Categories"),
    ("/about", "About"),
    ("/contact", "Contact"),
];

const FOOTER_CATEGORIES: [(&str, &str); 4] = [
    ("technology", "Technology"),
    ("design", "Design"),
    ("business", "Business"),
    ("lifestyle", "Lifestyle"),
];

fn is_active(current: &str, href: &str) -> bool {
    if href == "/" {
        current == "/"
    } else {
        current == href || current.starts_with(&format!("{href}/"))
    }
}

fn header(ctx: &PageContext) -> String {
    let links: String = NAV
        .iter()
        .map(|&(href, label)| {
            let current = if is_active(ctx.path, href) {
                r#" aria-current="page""#
            } else {
                ""
            };
            format!(r#"<a href="{href}"{current}>{label}</a>"#)
        })
        .collect();

    let toggle_label = if ctx.theme.is_dark() {
        "Switch to light mode"
    } else {
        "Switch to dark mode"
    };

    format!(
        r#"<header class="site-header">
<a class="logo" href="/">{name}</a>
<nav>{links}</nav>
<input class="search" type="search" placeholder="Search..." aria-label="Search" disabled>
<form method="post" action="/theme" class="theme-toggle"><button type="submit" aria-label="{toggle_label}">{toggle_label}</button></form>
</header>"#,
        name = esc(&ctx.site.name),
    )
}

fn footer(ctx: &PageContext) -> String {
    let categories: String = FOOTER_CATEGORIES
        .iter()
        .map(|&(slug, name)| format!(r#"<li><a href="/categories/{slug}">{name}</a></li>"#))
        .collect();

    format!(
        r#"<footer class="site-footer">
<div class="grid">
<div><h3>{name}</h3><p>{description}</p></div>
<div><h3>Quick Links</h3><ul><li><a href="/">Home</a></li><li><a href="/blog">Blog</a></li><li><a href="/about">About Us</a></li><li><a href="/contact">Contact</a></li></ul></div>
<div><h3>Categories</h3><ul>{categories}</ul></div>
</div>
<p class="copyright">&copy; {year} {name}. All rights reserved.</p>
</footer>"#,
        name = esc(&ctx.site.name),
        description = esc(&ctx.site.description),
        year = chrono::Utc::now().format("%Y"),
    )
}

/// 渲染完整的 HTML 文档。
///
/// 根元素在深色主题下带 `dark` class；`<head>` 由 [`Seo`] 生成。
pub fn render_document(ctx: &PageContext, seo: &Seo, body: &str) -> String {
    let mut head = Head::new();
    seo.apply(&mut head);

    let class = ctx.theme.html_class();
    let class_attr = if class.is_empty() {
        String::new()
    } else {
        format!(r#" class="{}""#, attr(class))
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en"{class_attr}>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
{head}</head>
<body>
{header}
<main class="container">
{body}
</main>
{footer}
</body>
</html>
"#,
        head = head.render(),
        header = header(ctx),
        footer = footer(ctx),
    )
}
