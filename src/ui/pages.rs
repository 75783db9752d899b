//! 静态页面。

use super::{attr, esc};

struct TeamMember {
    name: &'static str,
    role: &'static str,
    bio: &'static str,
    avatar_seed: &'static str,
    email: &'static str,
}

const TEAM: [TeamMember; 4] = [
    TeamMember {
        name: "Jane Smith",
        role: "Founder & Editor-in-Chief",
        bio: "Jane has over 10 years of experience in digital publishing and content strategy. She founded BlogMaster with the vision of creating a platform that combines quality content with exceptional user experience.",
        avatar_seed: "jane",
        email: "jane@example.com",
    },
    TeamMember {
        name: "John Doe",
        role: "Lead Developer",
        bio: "John is a full-stack developer with expertise in React and modern web technologies. He ensures that BlogMaster stays at the cutting edge of web development practices.",
        avatar_seed: "john",
        email: "john@example.com",
    },
    TeamMember {
        name: "Emily Chen",
        role: "Content Strategist",
        bio: "Emily specializes in SEO and content strategy. She works closely with our writers to ensure all content is optimized for search engines while maintaining high editorial standards.",
        avatar_seed: "emily",
        email: "emily@example.com",
    },
    TeamMember {
        name: "Michael Johnson",
        role: "UX Designer",
        bio: "Michael brings his passion for user-centered design to create intuitive and engaging experiences for BlogMaster readers. He constantly works on improving the site's usability and visual appeal.",
        avatar_seed: "michael",
        email: "michael@example.com",
    },
];

const VALUES: [(&str, &str); 3] = [
    (
        "Quality Content",
        "We believe in substance over quantity. Every article we publish is thoroughly researched, well-written, and provides genuine value to our readers.",
    ),
    (
        "User Experience",
        "We're committed to creating a seamless, enjoyable reading experience across all devices, with clean design and intuitive navigation.",
    ),
    (
        "Continuous Improvement",
        "We constantly seek feedback and use it to improve our content, design, and functionality to better serve our community.",
    ),
];

fn team_card(member: &TeamMember) -> String {
    format!(
        r#"<div class="card team-member">
<img class="avatar" src="https://api.dicebear.com/7.x/avataaars/svg?seed={seed}" alt="{alt}">
<h3>{name}</h3>
<p class="role">{role}</p>
<p>{bio}</p>
<a href="mailto:{email}" aria-label="Email">{email}</a>
</div>"#,
        seed = attr(member.avatar_seed),
        alt = attr(member.name),
        name = esc(member.name),
        role = esc(member.role),
        bio = esc(member.bio),
        email = attr(member.email),
    )
}

pub fn about_page() -> String {
    let values: String = VALUES
        .iter()
        .map(|(title, text)| {
            format!(
                r#"<div class="card"><h3>{}</h3><p>{}</p></div>"#,
                esc(title),
                esc(text)
            )
        })
        .collect();
    let team: String = TEAM.iter().map(team_card).collect();

    format!(
        r#"<section class="about">
<div class="hero">
<h1>About BlogMaster</h1>
<p class="lead">We're a team of passionate writers, developers, and designers dedicated to bringing you the best content on web development, design, and technology.</p>
</div>
<h2>Our Story</h2>
<div class="grid two">
<div>
<p>Founded in 2020, BlogMaster began as a small project with a big vision: to create a platform where quality content meets exceptional user experience. We noticed that many blogs were either visually appealing but lacked substance, or content-rich but difficult to navigate.</p>
<p>Our team set out to bridge this gap by building a blog platform that prioritizes both content quality and user experience. We believe that valuable information should be accessible, engaging, and presented in a way that respects the reader's time and attention.</p>
</div>
<div>
<p>Today, BlogMaster has grown into a trusted resource for thousands of readers seeking insights on web development, design, technology, and business. Our articles are crafted by experts in their fields and undergo rigorous editorial review to ensure accuracy and relevance.</p>
<p>As we continue to grow, our commitment remains the same: to provide our readers with content that informs, inspires, and helps them succeed in their professional journeys.</p>
</div>
</div>
<hr>
<h2>Our Values</h2>
<div class="grid three">{values}</div>
<hr>
<h2>Meet Our Team</h2>
<div class="grid four">{team}</div>
</section>"#
    )
}

pub fn contact_page() -> String {
    r#"<section class="contact">
<h1>Contact Us</h1>
<p class="lead">Have a question, a story idea or feedback about BlogMaster? We'd love to hear from you.</p>
<div class="grid two">
<div class="card">
<h2>Get in touch</h2>
<p>Email: <a href="mailto:hello@blogmaster.com">hello@blogmaster.com</a></p>
<p>Follow us on <a href="https://twitter.com" target="_blank" rel="noopener noreferrer">Twitter</a> and <a href="https://github.com" target="_blank" rel="noopener noreferrer">GitHub</a>.</p>
</div>
<div class="card">
<h2>Write for us</h2>
<p>We're always looking for experts in web development, design, technology and business. Send us a short pitch and a link to your previous work.</p>
</div>
</div>
</section>"#
        .to_string()
}

/// 404 页面，`path` 为请求的路径
pub fn not_found_page(path: &str) -> String {
    format!(
        r#"<section class="not-found">
<h1>404</h1>
<p>The page <code>{}</code> could not be found.</p>
<a class="button" href="/">Back to home</a>
</section>"#,
        esc(path)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_about_lists_team_and_values() {
        let html = about_page();
        assert!(html.contains("About BlogMaster"));
        assert_eq!(html.matches("class=\"card team-member\"").count(), 4);
        assert!(html.contains("Continuous Improvement"));
        assert!(html.contains("Founder &amp; Editor-in-Chief"));
    }

    #[test]
    fn test_not_found_escapes_path() {
        let html = not_found_page("/<x>");
        assert!(html.contains("/&lt;x&gt;"));
        assert!(contact_page().contains("Contact Us"));
    }
}
