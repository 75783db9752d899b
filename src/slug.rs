use std::sync::LazyLock;

use regex::Regex;

static STRIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s_-]").expect("valid slug strip pattern"));
static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_-]+").expect("valid slug separator pattern"));

/// 由标题生成 URL 安全的 slug。
///
/// 1. 转小写
/// 2. 删除 ASCII 字母、数字、空白、`_`、`-` 以外的字符
/// 3. 连续的空白、`_`、`-` 合并为一个 `-`
/// 4. 去掉首尾的 `-`
///
/// 结果只包含 `[a-z0-9-]`。
///
/// ```
/// assert_eq!(blogmaster::slug::slugify("How To Build a Blog!"), "how-to-build-a-blog");
/// ```
pub fn slugify(title: &str) -> String {
    let lower = title.to_lowercase();
    let stripped = STRIP.replace_all(&lower, "");
    let joined = SEPARATORS.replace_all(&stripped, "-");
    joined.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("How To Build a Blog!"), "how-to-build-a-blog");
        assert_eq!(slugify("Hello, World"), "hello-world");
        assert_eq!(slugify("Don't Panic"), "dont-panic");
    }

    #[test]
    fn test_slugify_collapses_whitespace() {
        assert_eq!(slugify("  many   spaces\there\n "), "many-spaces-here");
        assert_eq!(slugify("snake_case and - dashes"), "snake-case-and-dashes");
    }

    #[test]
    fn test_slugify_output_charset() {
        let titles = [
            "Rust 2024: What's New?",
            "Ünïcödé Tïtlé",
            "C++ vs. C#",
            "100% Pure (Organic) Content",
            "中文标题 mixed",
            "!!!",
        ];

        for t in titles {
            let slug = slugify(t);
            assert!(
                slug.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
                "{t:?} -> {slug:?}"
            );
            assert!(!slug.starts_with('-') && !slug.ends_with('-'), "{slug:?}");
            assert!(!slug.contains("--"), "{slug:?}");
        }
    }
}
