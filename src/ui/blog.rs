use super::{attr, esc, format_date, read_time, sanitize};
use crate::{model::Post, view::sample};

const DEFAULT_CARD_IMAGE: &str =
    "https://images.unsplash.com/photo-1555066931-4365d14bab8c?w=800&q=80";

/// 文章卡片
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogCardProps {
    pub title: String,
    pub excerpt: String,
    pub date: String,
    pub read_time: String,
    pub author: String,
    pub category: String,
    pub image_url: String,
    pub slug: String,
}

impl Default for BlogCardProps {
    fn default() -> Self {
        Self {
            title: "How to Build a Modern Blog with React".to_string(),
            excerpt: "Learn the best practices for creating a high-performance blog using React and modern web technologies.".to_string(),
            date: "April 15, 2023".to_string(),
            read_time: "5 min read".to_string(),
            author: "Jane Doe".to_string(),
            category: "Development".to_string(),
            image_url: DEFAULT_CARD_IMAGE.to_string(),
            slug: "how-to-build-a-modern-blog".to_string(),
        }
    }
}

impl From<&Post> for BlogCardProps {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            date: format_date(post.published_at),
            read_time: read_time(&post.content),
            author: post.author_name().to_string(),
            category: post.category_name().unwrap_or_default().to_string(),
            image_url: post
                .featured_image
                .clone()
                .unwrap_or_else(|| DEFAULT_CARD_IMAGE.to_string()),
            slug: post.slug.clone(),
        }
    }
}

pub fn blog_card(props: &BlogCardProps) -> String {
    let href = format!("/blog/{}", props.slug);
    let badge = if props.category.is_empty() {
        String::new()
    } else {
        format!(r#"<span class="badge">{}</span>"#, esc(&props.category))
    };

    format!(
        r#"<article class="blog-card">
<div class="blog-card-image"><img src="{image}" alt="{alt}" loading="lazy">{badge}</div>
<h3><a href="{href}">{title}</a></h3>
<p class="excerpt">{excerpt}</p>
<div class="meta"><span class="author">{author}</span><span class="date">{date}</span><span class="read-time">{read_time}</span></div>
<a class="button button-outline" href="{href}">Read More</a>
</article>"#,
        image = attr(&props.image_url),
        alt = attr(&props.title),
        href = attr(&href),
        title = esc(&props.title),
        excerpt = esc(&props.excerpt),
        author = esc(&props.author),
        date = esc(&props.date),
        read_time = esc(&props.read_time),
    )
}

/// 文章网格
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogGridProps {
    pub title: String,
    pub posts: Vec<BlogCardProps>,
    pub show_pagination: bool,
}

impl Default for BlogGridProps {
    fn default() -> Self {
        Self {
            title: "Latest Blog Posts".to_string(),
            posts: sample::grid_posts().iter().map(BlogCardProps::from).collect(),
            show_pagination: true,
        }
    }
}

impl BlogGridProps {
    pub fn from_posts(title: impl Into<String>, posts: &[Post]) -> Self {
        Self {
            title: title.into(),
            posts: posts.iter().map(BlogCardProps::from).collect(),
            show_pagination: true,
        }
    }
}

pub fn blog_grid(props: &BlogGridProps) -> String {
    let cards: String = props.posts.iter().map(blog_card).collect();
    // 分页按钮暂不可用
    let pagination = if props.show_pagination {
        r#"<nav class="pagination" aria-label="Pagination"><button type="button" disabled>Previous</button><button type="button" disabled>Next</button></nav>"#
    } else {
        ""
    };

    let heading = if props.title.is_empty() {
        String::new()
    } else {
        format!("<h2>{}</h2>\n", esc(&props.title))
    };

    format!(
        r#"<section class="blog-grid">
{heading}<div class="grid">{cards}</div>
{pagination}
</section>"#
    )
}

/// 文章详情
#[derive(Debug, Clone, PartialEq)]
pub struct PostDetailProps {
    pub post: Post,
    pub related: Vec<Post>,
}

impl Default for PostDetailProps {
    fn default() -> Self {
        Self {
            post: sample::post(""),
            related: sample::related_posts(),
        }
    }
}

fn related_card(post: &Post) -> String {
    format!(
        r#"<li class="related-post"><a href="/blog/{slug}"><img src="{image}" alt="{alt}" loading="lazy"><h4>{title}</h4><p>{excerpt}</p><span class="date">{date}</span></a></li>"#,
        slug = attr(&post.slug),
        image = attr(post.featured_image.as_deref().unwrap_or(DEFAULT_CARD_IMAGE)),
        alt = attr(&post.title),
        title = esc(&post.title),
        excerpt = esc(&post.excerpt),
        date = esc(&format_date(post.published_at)),
    )
}

pub fn post_detail(props: &PostDetailProps) -> String {
    let post = &props.post;
    let image = post
        .featured_image
        .as_deref()
        .map(|src| {
            format!(
                r#"<figure class="hero"><img src="{}" alt="{}"></figure>"#,
                attr(src),
                attr(&post.title)
            )
        })
        .unwrap_or_default();
    let category = post
        .category
        .as_ref()
        .map(|c| {
            format!(
                r#"<a class="badge" href="/categories/{}">{}</a>"#,
                attr(&c.slug),
                esc(&c.name)
            )
        })
        .unwrap_or_default();
    let related = if props.related.is_empty() {
        String::new()
    } else {
        let items: String = props.related.iter().map(related_card).collect();
        format!(
            r#"<section class="related"><h2>Related Posts</h2><ul>{items}</ul></section>"#
        )
    };
    let author = post.author_name();

    format!(
        r#"<article class="post-detail">
<a class="back" href="/blog">Back to all posts</a>
{image}
<div class="post-header">{category}
<h1>{title}</h1>
<div class="meta"><span class="author">{author}</span><span class="date">{date}</span><span class="read-time">{read_time}</span></div>
</div>
<div class="post-content prose">{content}</div>
<aside class="author-bio"><h3>About {author}</h3></aside>
</article>
{related}"#,
        title = esc(&post.title),
        author = esc(author),
        date = esc(&format_date(post.published_at)),
        read_time = esc(&read_time(&post.content)),
        content = sanitize(&post.content),
    )
}
