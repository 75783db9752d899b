use std::collections::HashMap;

use super::{
    model::{Loadable, PageModel, Shown, load},
    sample,
};
use crate::{
    gateway::Gateway,
    model::{Category, Post},
};

/// 相关文章最多展示的数量
pub const RELATED_LIMIT: usize = 3;

const POST_FAILED: &str = "Failed to load blog post.";
const CATEGORY_FAILED: &str = "Failed to load category and posts.";
const POSTS_FAILED: &str = "Failed to load blog posts.";
const CATEGORIES_FAILED: &str = "Failed to load categories.";
const FORM_CATEGORIES_FAILED: &str = "Failed to load categories. Using default categories instead.";

/// 从全部文章中挑选相关文章：排除当前文章，按后端返回的顺序取前三篇
pub fn related_posts(current_id: &str, all: Vec<Post>) -> Vec<Post> {
    all.into_iter()
        .filter(|p| p.id != current_id)
        .take(RELATED_LIMIT)
        .collect()
}

/// 列表为空时换成示例内容
fn non_empty_or(
    posts: Vec<Post>,
    fallback: impl FnOnce() -> Vec<Post>,
    reason: &str,
) -> Shown<Vec<Post>> {
    if posts.is_empty() {
        Shown::sample(fallback(), reason)
    } else {
        Shown::live(posts)
    }
}

/// 文章列表页：`/`、`/blog`
#[derive(Debug, Clone)]
pub struct BlogIndexPage {
    pub error: Option<String>,
    pub posts: Shown<Vec<Post>>,
}

pub async fn blog_index<G: Gateway>(gateway: &G) -> BlogIndexPage {
    let mut model: PageModel<&str, Vec<Post>> = PageModel::new();
    load(&mut model, "posts", POSTS_FAILED, |_| gateway.list_posts()).await;

    let mut posts = model.content(sample::grid_posts);
    if posts.data.is_empty() {
        posts = Shown::sample(sample::grid_posts(), "No posts have been published yet.");
    }
    BlogIndexPage {
        error: model.state().error().map(str::to_string),
        posts,
    }
}

/// 文章详情及其相关文章
#[derive(Debug, Clone, PartialEq)]
pub struct PostWithRelated {
    pub post: Post,
    pub related: Vec<Post>,
}

/// 文章详情页：`/blog/{slug}`
#[derive(Debug, Clone)]
pub struct PostPage {
    pub slug: String,
    pub error: Option<String>,
    pub post: Shown<Post>,
    pub related: Shown<Vec<Post>>,
}

/// 组装文章详情页。
///
/// 先按 slug 取文章，再取全部文章计算相关文章；任何一步失败都进入失败状态，
/// 页面展示占位文章并标注为示例。
pub async fn post_detail<G: Gateway>(gateway: &G, slug: &str) -> PostPage {
    let mut model: PageModel<String, PostWithRelated> = PageModel::new();
    let state = load(&mut model, slug.to_string(), POST_FAILED, |slug| async move {
        let post = gateway.post_by_slug(&slug).await?;
        let all = gateway.list_posts().await?;
        let related = related_posts(&post.id, all);
        Ok(PostWithRelated { post, related })
    })
    .await;

    match state {
        Loadable::Ready(data) => PostPage {
            slug: slug.to_string(),
            error: None,
            post: Shown::live(data.post.clone()),
            related: non_empty_or(
                data.related.clone(),
                sample::related_posts,
                "No other posts yet.",
            ),
        },
        Loadable::Failed(msg) => PostPage {
            slug: slug.to_string(),
            error: Some(msg.clone()),
            post: Shown::sample(sample::post(slug), msg.clone()),
            related: Shown::sample(sample::related_posts(), msg.clone()),
        },
        Loadable::Loading => PostPage {
            slug: slug.to_string(),
            error: None,
            post: Shown::sample(sample::post(slug), "Loading..."),
            related: Shown::sample(sample::related_posts(), "Loading..."),
        },
    }
}

/// 分类及其文章数
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummary {
    pub category: Category,
    pub count: usize,
}

/// 分类列表页：`/categories`
#[derive(Debug, Clone)]
pub struct CategoryIndexPage {
    pub error: Option<String>,
    pub categories: Shown<Vec<CategorySummary>>,
}

fn count_posts(categories: Vec<Category>, posts: &[Post]) -> Vec<CategorySummary> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for id in posts.iter().filter_map(|p| p.category_id.as_deref()) {
        *counts.entry(id).or_default() += 1;
    }
    categories
        .into_iter()
        .map(|category| CategorySummary {
            count: counts.get(category.id.as_str()).copied().unwrap_or(0),
            category,
        })
        .collect()
}

fn sample_summaries() -> Vec<CategorySummary> {
    sample::categories()
        .into_iter()
        .map(|(category, count)| CategorySummary { category, count })
        .collect()
}

pub async fn category_index<G: Gateway>(gateway: &G) -> CategoryIndexPage {
    let mut model: PageModel<&str, Vec<CategorySummary>> = PageModel::new();
    let state = load(&mut model, "categories", CATEGORIES_FAILED, |_| async move {
        let categories = gateway.list_categories().await?;
        let posts = gateway.list_posts().await?;
        Ok(count_posts(categories, &posts))
    })
    .await;

    match state {
        Loadable::Ready(list) if !list.is_empty() => CategoryIndexPage {
            error: None,
            categories: Shown::live(list.clone()),
        },
        Loadable::Ready(_) => CategoryIndexPage {
            error: None,
            categories: Shown::sample(sample_summaries(), "No categories have been created yet."),
        },
        Loadable::Failed(msg) => CategoryIndexPage {
            error: Some(msg.clone()),
            categories: Shown::sample(sample_summaries(), msg.clone()),
        },
        Loadable::Loading => CategoryIndexPage {
            error: None,
            categories: Shown::sample(sample_summaries(), "Loading..."),
        },
    }
}

/// 分类详情页：`/categories/{slug}`
#[derive(Debug, Clone)]
pub struct CategoryPage {
    pub slug: String,
    pub error: Option<String>,
    pub category: Shown<Category>,
    pub posts: Shown<Vec<Post>>,
}

/// 组装分类详情页。
///
/// 分类取不到时依次退回内置分类、"Category Not Found" 占位；
/// 文章为空或失败时展示示例文章。
pub async fn category_detail<G: Gateway>(gateway: &G, slug: &str) -> CategoryPage {
    let mut model: PageModel<String, (Category, Vec<Post>)> = PageModel::new();
    let state = load(&mut model, slug.to_string(), CATEGORY_FAILED, |slug| async move {
        let category = gateway.category_by_slug(&slug).await?;
        let posts = gateway.posts_by_category(&slug).await?;
        Ok((category, posts))
    })
    .await;

    match state {
        Loadable::Ready((category, posts)) => {
            let fallback = || sample::category_posts(category);
            CategoryPage {
                slug: slug.to_string(),
                error: None,
                posts: non_empty_or(posts.clone(), fallback, "No posts in this category yet."),
                category: Shown::live(category.clone()),
            }
        }
        Loadable::Failed(msg) => {
            let category = sample::category(slug);
            CategoryPage {
                slug: slug.to_string(),
                error: Some(msg.clone()),
                posts: Shown::sample(sample::category_posts(&category), msg.clone()),
                category: Shown::sample(category, msg.clone()),
            }
        }
        Loadable::Loading => {
            let category = sample::category(slug);
            CategoryPage {
                slug: slug.to_string(),
                error: None,
                posts: Shown::sample(sample::category_posts(&category), "Loading..."),
                category: Shown::sample(category, "Loading..."),
            }
        }
    }
}

/// 新建文章页：`/blog/new`
#[derive(Debug, Clone)]
pub struct NewPostPage {
    /// 分类加载失败时的提示
    pub warning: Option<String>,
    pub categories: Shown<Vec<Category>>,
}

pub async fn new_post<G: Gateway>(gateway: &G) -> NewPostPage {
    let mut model: PageModel<&str, Vec<Category>> = PageModel::new();
    load(&mut model, "categories", FORM_CATEGORIES_FAILED, |_| {
        gateway.list_categories()
    })
    .await;

    let mut categories = model.content(sample::form_categories);
    if categories.data.is_empty() {
        categories = Shown::sample(sample::form_categories(), "No categories available.");
    }
    NewPostPage {
        warning: model.state().error().map(str::to_string),
        categories,
    }
}
