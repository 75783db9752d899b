use super::{attr, banner, esc};
use crate::{
    form::{NewPostForm, ValidationErrors},
    model::Category,
    view::sample,
};

/// 新建文章表单
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlogFormProps {
    /// 上次提交的值，重新渲染时保留
    pub values: NewPostForm,
    pub errors: ValidationErrors,
    pub categories: Vec<Category>,
    /// 分类加载失败等非阻塞提示
    pub warning: Option<String>,
    /// 提交失败的提示
    pub failure: Option<String>,
}

impl BlogFormProps {
    /// 空表单，使用默认分类
    pub fn blank() -> Self {
        Self {
            categories: sample::form_categories(),
            ..Self::default()
        }
    }
}

struct Field<'a> {
    name: &'static str,
    label: &'static str,
    help: &'static str,
    placeholder: &'static str,
    value: &'a str,
}

fn field_error(errors: &ValidationErrors, name: &str) -> String {
    errors
        .message_for(name)
        .map(|m| format!(r#"<p class="field-error" id="{name}-error">{}</p>"#, esc(m)))
        .unwrap_or_default()
}

fn input(field: &Field, errors: &ValidationErrors) -> String {
    format!(
        r#"<div class="field"><label for="{name}">{label}</label><input id="{name}" name="{name}" type="text" placeholder="{placeholder}" value="{value}"><p class="help">{help}</p>{error}</div>"#,
        name = field.name,
        label = field.label,
        placeholder = attr(field.placeholder),
        value = attr(field.value),
        help = field.help,
        error = field_error(errors, field.name),
    )
}

fn textarea(field: &Field, rows: u32, errors: &ValidationErrors) -> String {
    format!(
        r#"<div class="field"><label for="{name}">{label}</label><textarea id="{name}" name="{name}" rows="{rows}" placeholder="{placeholder}">{value}</textarea><p class="help">{help}</p>{error}</div>"#,
        name = field.name,
        label = field.label,
        placeholder = attr(field.placeholder),
        value = esc(field.value),
        help = field.help,
        error = field_error(errors, field.name),
    )
}

fn category_select(props: &BlogFormProps) -> String {
    let selected = props.values.category_id.as_str();
    let options: String = props
        .categories
        .iter()
        .map(|c| {
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                attr(&c.id),
                if c.id == selected { " selected" } else { "" },
                esc(&c.name)
            )
        })
        .collect();

    format!(
        r#"<div class="field"><label for="category_id">Category</label><select id="category_id" name="category_id"><option value=""{}>Select a category</option>{}</select><p class="help">Choose the category that best fits your post.</p>{}</div>"#,
        if selected.is_empty() { " selected" } else { "" },
        options,
        field_error(&props.errors, "category_id"),
    )
}

pub fn blog_form(props: &BlogFormProps) -> String {
    let v = &props.values;
    let errors = &props.errors;

    let title = input(
        &Field {
            name: "title",
            label: "Title",
            help: "Create a compelling title for your blog post.",
            placeholder: "Enter blog title",
            value: &v.title,
        },
        errors,
    );
    let excerpt = textarea(
        &Field {
            name: "excerpt",
            label: "Excerpt",
            help: "A short summary that appears in blog listings.",
            placeholder: "Brief summary of your post",
            value: &v.excerpt,
        },
        3,
        errors,
    );
    let image = input(
        &Field {
            name: "featured_image",
            label: "Featured Image URL",
            help: "Enter the URL of an image to display with your post.",
            placeholder: "https://example.com/image.jpg",
            value: &v.featured_image,
        },
        errors,
    );
    let content = textarea(
        &Field {
            name: "content",
            label: "Content",
            help: "You can use HTML tags for formatting.",
            placeholder: "Write your blog post content here...",
            value: &v.content,
        },
        12,
        errors,
    );

    let warning = props
        .warning
        .as_deref()
        .map(|message| {
            banner::banner(&banner::BannerProps {
                kind: banner::BannerKind::Warning,
                message: message.to_string(),
            })
        })
        .unwrap_or_default();

    format!(
        r#"<section class="blog-form card">
<h1>Create New Blog Post</h1>
{warning}{failure}
<form method="post" action="/blog/new" novalidate>
{title}
{excerpt}
{image}
{category}
{content}
<div class="actions"><button type="submit">Publish Post</button><a class="button button-outline" href="/blog">Cancel</a></div>
</form>
</section>"#,
        failure = banner::error_banner(props.failure.as_deref()),
        category = category_select(props),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_form() {
        let html = blog_form(&BlogFormProps::blank());
        assert!(html.contains("Create New Blog Post"));
        assert_eq!(html.matches("<option value=\"").count(), 6);
        assert!(!html.contains("field-error"));
    }

    #[test]
    fn test_errors_and_values_are_retained() {
        let values = NewPostForm {
            title: "Hey".to_string(),
            content: "<b>short</b>".to_string(),
            excerpt: "tiny".to_string(),
            featured_image: "nope\"".to_string(),
            category_id: "3".to_string(),
        };
        let errors = values.validate().expect_err("invalid");
        let html = blog_form(&BlogFormProps {
            values,
            errors,
            ..BlogFormProps::blank()
        });

        assert_eq!(html.matches("class=\"field-error\"").count(), 4);
        assert!(html.contains(r#"value="Hey""#));
        assert!(html.contains("&lt;b&gt;short&lt;/b&gt;</textarea>"));
        assert!(html.contains(r#"value="nope&quot;""#));
        assert!(html.contains(r#"<option value="3" selected>Technology</option>"#));
    }
}
