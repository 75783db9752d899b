//! 占位示例内容
//!
//! 后端不可用或没有数据时页面展示这些内容，并标注为示例。

use chrono::{DateTime, TimeZone, Utc};

use crate::model::{AuthorRef, Category, CategoryRef, Post};

const SAMPLE_CONTENT: &str = r#"<p>Building a modern blog requires careful planning and the right technology stack. In this guide we walk through creating a responsive, SEO-friendly blog.</p>
<h2>Getting Started</h2>
<p>A component-based architecture makes it easy to create reusable UI elements, perfect for a blog where consistency is key.</p>
<h2>Creating the Blog Structure</h2>
<p>A well-structured blog typically includes:</p>
<ul>
<li>A homepage with featured posts</li>
<li>Individual post pages</li>
<li>Category pages</li>
<li>An about page</li>
<li>A contact form</li>
</ul>
<h2>Optimizing for SEO</h2>
<ul>
<li>Use semantic HTML elements</li>
<li>Implement proper heading hierarchy</li>
<li>Add meta tags for each page</li>
<li>Optimize images with alt text</li>
</ul>
<h2>Conclusion</h2>
<p>Following these steps you will be well on your way to a blog that looks great and performs well in search rankings.</p>"#;

fn date(y: i32, m: u32, d: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).single()
}

fn author(name: &str, avatar_seed: &str) -> Option<AuthorRef> {
    Some(AuthorRef {
        username: None,
        full_name: Some(name.to_string()),
        avatar_url: Some(format!(
            "https://api.dicebear.com/7.x/avataaars/svg?seed={avatar_seed}"
        )),
    })
}

/// (id, 标题, slug, 摘要, 配图, 日期, 作者)
type Row = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    (i32, u32, u32),
    &'static str,
);

fn post_from(row: &Row, category: Option<CategoryRef>) -> Post {
    let (id, title, slug, excerpt, image, (y, m, d), author_name) = *row;
    Post {
        id: format!("sample-{id}"),
        title: title.to_string(),
        slug: slug.to_string(),
        excerpt: excerpt.to_string(),
        content: String::new(),
        featured_image: Some(image.to_string()),
        category_id: None,
        author_id: None,
        published_at: date(y, m, d),
        author: author(author_name, &author_name.to_lowercase().replace(' ', "")),
        category,
    }
}

const GRID: [Row; 6] = [
    (
        "1",
        "Getting Started with React and TypeScript",
        "getting-started-with-react-typescript",
        "Learn how to set up a new project with React and TypeScript to build type-safe applications.",
        "https://images.unsplash.com/photo-1633356122544-f134324a6cee?w=800&q=80",
        (2023, 6, 15),
        "Jane Smith",
    ),
    (
        "2",
        "Mastering Tailwind CSS for Rapid UI Development",
        "mastering-tailwind-css",
        "Discover how to leverage Tailwind CSS to build beautiful user interfaces quickly and efficiently.",
        "https://images.unsplash.com/photo-1618761714954-0b8cd0026356?w=800&q=80",
        (2023, 7, 22),
        "John Doe",
    ),
    (
        "3",
        "Building SEO-Friendly Websites with Next.js",
        "seo-friendly-websites-nextjs",
        "Learn the best practices for creating SEO-optimized websites using Next.js and React.",
        "https://images.unsplash.com/photo-1555066931-4365d14bab8c?w=800&q=80",
        (2023, 8, 10),
        "Alex Johnson",
    ),
    (
        "4",
        "State Management in Modern React Applications",
        "state-management-react",
        "Compare different state management solutions for React and learn when to use each one.",
        "https://images.unsplash.com/photo-1517694712202-14dd9538aa97?w=800&q=80",
        (2023, 9, 5),
        "Emily Chen",
    ),
    (
        "5",
        "Creating Accessible Web Applications",
        "creating-accessible-web-applications",
        "Understand the importance of accessibility and learn how to implement it in your web projects.",
        "https://images.unsplash.com/photo-1573867639040-6dd25fa5f597?w=800&q=80",
        (2023, 10, 18),
        "Michael Johnson",
    ),
    (
        "6",
        "The Future of Web Development: What's Coming in 2024",
        "future-web-development-2024",
        "Explore upcoming trends and technologies that will shape the future of web development.",
        "https://images.unsplash.com/photo-1581276879432-15e50529f34b?w=800&q=80",
        (2023, 11, 30),
        "Sarah Williams",
    ),
];

const RELATED: [Row; 3] = [
    (
        "r1",
        "10 Tailwind CSS Tips Every Developer Should Know",
        "tailwind-css-tips",
        "Boost your productivity with these essential Tailwind CSS tips and tricks.",
        "https://images.unsplash.com/photo-1587620962725-abab7fe55159?w=600&q=80",
        (2023, 5, 20),
        "Author",
    ),
    (
        "r2",
        "React Performance Optimization Techniques",
        "react-performance-optimization",
        "Learn how to optimize your React applications for better performance and user experience.",
        "https://images.unsplash.com/photo-1633356122102-3fe601e05bd2?w=600&q=80",
        (2023, 4, 12),
        "Author",
    ),
    (
        "r3",
        "Building Accessible Web Applications",
        "building-accessible-web-applications",
        "A comprehensive guide to creating web applications that are accessible to all users.",
        "https://images.unsplash.com/photo-1581291518633-83b4ebd1d83e?w=600&q=80",
        (2023, 3, 5),
        "Author",
    ),
];

const CATEGORY_POSTS: [Row; 6] = [
    (
        "c1",
        "Getting Started with React Hooks",
        "getting-started-with-react-hooks",
        "Learn how to use React Hooks to simplify your components and manage state effectively.",
        "https://images.unsplash.com/photo-1633356122544-f134324a6cee?w=800&q=80",
        (2023, 4, 15),
        "Jane Smith",
    ),
    (
        "c2",
        "The Future of Web Development",
        "future-of-web-development",
        "Explore the upcoming trends and technologies that will shape the future of web development.",
        "https://images.unsplash.com/photo-1498050108023-c5249f4df085?w=800&q=80",
        (2023, 6, 10),
        "John Doe",
    ),
    (
        "c3",
        "Mastering CSS Grid Layout",
        "mastering-css-grid-layout",
        "A comprehensive guide to using CSS Grid for creating complex and responsive layouts.",
        "https://images.unsplash.com/photo-1517180102446-f3ece451e9d8?w=800&q=80",
        (2023, 7, 5),
        "Alex Johnson",
    ),
    (
        "c4",
        "Optimizing Website Performance",
        "optimizing-website-performance",
        "Learn techniques to improve your website's loading speed and overall performance.",
        "https://images.unsplash.com/photo-1460925895917-afdab827c52f?w=800&q=80",
        (2023, 8, 22),
        "Emily Chen",
    ),
    (
        "c5",
        "Introduction to TypeScript",
        "introduction-to-typescript",
        "Discover how TypeScript can improve your JavaScript development experience with static typing.",
        "https://images.unsplash.com/photo-1555066931-4365d14bab8c?w=800&q=80",
        (2023, 9, 14),
        "Michael Johnson",
    ),
    (
        "c6",
        "Building Accessible Web Forms",
        "building-accessible-web-forms",
        "Best practices for creating forms that are usable by everyone, including people with disabilities.",
        "https://images.unsplash.com/photo-1581291518633-83b4ebd1d83e?w=800&q=80",
        (2023, 10, 3),
        "Sarah Williams",
    ),
];

/// (slug, 名称, 描述, 图片, 文章数)
const CATEGORIES: [(&str, &str, &str, &str, usize); 6] = [
    (
        "web-development",
        "Web Development",
        "Articles about frontend and backend web development technologies and practices.",
        "https://images.unsplash.com/photo-1517694712202-14dd9538aa97?w=1200&q=80",
        12,
    ),
    (
        "design",
        "Design",
        "Insights on UI/UX design, graphic design, and creative processes.",
        "https://images.unsplash.com/photo-1561070791-2526d30994b5?w=1200&q=80",
        8,
    ),
    (
        "technology",
        "Technology",
        "The latest news and trends in technology and innovation.",
        "https://images.unsplash.com/photo-1519389950473-47ba0277781c?w=1200&q=80",
        15,
    ),
    (
        "business",
        "Business",
        "Strategies for business growth, entrepreneurship, and professional development.",
        "https://images.unsplash.com/photo-1460925895917-afdab827c52f?w=1200&q=80",
        7,
    ),
    (
        "lifestyle",
        "Lifestyle",
        "Articles about productivity, work-life balance, and personal growth.",
        "https://images.unsplash.com/photo-1511988617509-a57c8a288659?w=1200&q=80",
        9,
    ),
    (
        "programming",
        "Programming",
        "Deep dives into programming languages, frameworks, and coding best practices.",
        "https://images.unsplash.com/photo-1555066931-4365d14bab8c?w=1200&q=80",
        11,
    ),
];

/// 文章详情页的占位文章，保留请求的 slug
pub fn post(slug: &str) -> Post {
    let slug = if slug.is_empty() {
        "how-to-build-modern-blog"
    } else {
        slug
    };
    Post {
        id: "sample-post".to_string(),
        title: "How to Build a Modern Blog with React and Tailwind CSS".to_string(),
        slug: slug.to_string(),
        excerpt: "Learn how to build a modern, SEO-friendly blog using React and Tailwind CSS with this comprehensive guide.".to_string(),
        content: SAMPLE_CONTENT.to_string(),
        featured_image: Some(
            "https://images.unsplash.com/photo-1555066931-4365d14bab8c?w=1200&q=80".to_string(),
        ),
        category_id: None,
        author_id: None,
        published_at: date(2023, 6, 15),
        author: author("Jane Smith", "jane"),
        category: Some(CategoryRef {
            name: "Web Development".to_string(),
            slug: "web-development".to_string(),
        }),
    }
}

/// 相关文章的占位列表
pub fn related_posts() -> Vec<Post> {
    RELATED.iter().map(|r| post_from(r, None)).collect()
}

/// 文章列表页的占位列表
pub fn grid_posts() -> Vec<Post> {
    GRID.iter().map(|r| post_from(r, None)).collect()
}

/// 分类详情页的占位文章，分类取当前分类
pub fn category_posts(category: &Category) -> Vec<Post> {
    let category_ref = CategoryRef {
        name: category.name.clone(),
        slug: category.slug.clone(),
    };
    CATEGORY_POSTS
        .iter()
        .map(|r| post_from(r, Some(category_ref.clone())))
        .collect()
}

/// 内置分类及其展示用的文章数
pub fn categories() -> Vec<(Category, usize)> {
    CATEGORIES
        .iter()
        .map(|&(slug, name, description, image, count)| {
            (
                Category {
                    id: slug.to_string(),
                    name: name.to_string(),
                    slug: slug.to_string(),
                    description: Some(description.to_string()),
                    image: Some(image.to_string()),
                },
                count,
            )
        })
        .collect()
}

/// 按 slug 查找内置分类，找不到时返回 "Category Not Found" 占位
pub fn category(slug: &str) -> Category {
    categories()
        .into_iter()
        .map(|(c, _)| c)
        .find(|c| c.slug == slug)
        .unwrap_or_else(|| Category {
            id: String::new(),
            name: "Category Not Found".to_string(),
            slug: slug.to_string(),
            description: Some("This category does not exist.".to_string()),
            image: Some(
                "https://images.unsplash.com/photo-1519389950473-47ba0277781c?w=1200&q=80"
                    .to_string(),
            ),
        })
}

/// 新建文章表单的默认分类
pub fn form_categories() -> Vec<Category> {
    ["Development", "Design", "Technology", "Business", "Lifestyle"]
        .iter()
        .enumerate()
        .map(|(i, name)| Category {
            id: (i + 1).to_string(),
            name: name.to_string(),
            slug: name.to_lowercase(),
            description: None,
            image: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_post_keeps_requested_slug() {
        assert_eq!(post("missing-post").slug, "missing-post");
        assert_eq!(post("").slug, "how-to-build-modern-blog");
    }

    #[test]
    fn test_category_fallbacks() {
        assert_eq!(category("design").name, "Design");
        let unknown = category("knitting");
        assert_eq!(unknown.name, "Category Not Found");
        assert_eq!(unknown.slug, "knitting");
    }

    #[test]
    fn test_category_posts_carry_category() {
        let posts = category_posts(&category("design"));
        assert_eq!(posts.len(), 6);
        assert!(posts.iter().all(|p| p.category_name() == Some("Design")));
    }

    #[test]
    fn test_sample_lists() {
        assert_eq!(grid_posts().len(), 6);
        assert_eq!(related_posts().len(), 3);
        assert_eq!(form_categories().len(), 5);
        assert_eq!(categories().len(), 6);
    }
}
