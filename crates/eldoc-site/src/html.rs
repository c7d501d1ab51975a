//! HTML output for a composed [`Frame`].
//!
//! Keeps the class names the site stylesheet targets: `header`, `side-nav`,
//! `nav-item`, `active`, `footer`.

use std::fmt::Write;

use crate::view::{Footer, Frame, Header, Link, NavLink, SideNav};

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Render the app root for a frame.
#[must_use]
pub fn render_frame(frame: &Frame) -> String {
    let mut html = String::with_capacity(4096);

    html.push_str("<div class=\"app\">\n");
    render_header(&mut html, &frame.header);

    html.push_str("<div class=\"main container\">\n");
    render_side_nav(&mut html, &frame.side_nav);
    html.push_str("<div class=\"content\">\n");
    if let Some(content) = &frame.content {
        let _ = writeln!(
            html,
            "<div class=\"page page-{}\">",
            escape_html(&content.page)
        );
        html.push_str(&content.html);
        html.push_str("</div>\n");
    }
    html.push_str("</div>\n</div>\n");

    render_footer(&mut html, &frame.footer);
    html.push_str("</div>\n");
    html
}

/// Render a standalone HTML document around a frame.
#[must_use]
pub fn render_document(frame: &Frame, lang: Option<&str>) -> String {
    let mut html = String::with_capacity(8192);
    html.push_str("<!DOCTYPE html>\n");
    match lang {
        Some(lang) => {
            let _ = writeln!(html, "<html lang=\"{}\">", escape_html(lang));
        }
        None => html.push_str("<html>\n"),
    }
    html.push_str("<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape_html(&frame.header.title));
    html.push_str("</head>\n<body>\n");
    html.push_str(&render_frame(frame));
    html.push_str("</body>\n</html>\n");
    html
}

fn render_header(html: &mut String, header: &Header) {
    html.push_str("<header class=\"header\">\n<div class=\"container\">\n");
    let _ = writeln!(
        html,
        "<h1><img src=\"assets/logo.svg\" alt=\"{}\"></h1>",
        escape_html(&header.title)
    );

    html.push_str("<ul class=\"nav\">\n");
    for link in &header.links {
        html.push_str("<li class=\"nav-item\">");
        render_link(html, link);
        html.push_str("</li>\n");
    }

    html.push_str("<li class=\"nav-item nav-lang\">");
    for (i, toggle) in header.locales.iter().enumerate() {
        if i > 0 {
            html.push_str(" / ");
        }
        let class = if toggle.active { " class=\"active\"" } else { "" };
        let _ = write!(
            html,
            "<a href=\"{}\"{class}>{}</a>",
            escape_html(&toggle.href),
            escape_html(&toggle.label)
        );
    }
    html.push_str("</li>\n</ul>\n</div>\n</header>\n");
}

fn render_side_nav(html: &mut String, nav: &SideNav) {
    html.push_str("<nav class=\"side-nav\">\n<ul>\n");

    html.push_str("<li class=\"nav-item\">\n");
    let _ = writeln!(html, "<a>{}</a>", escape_html(&nav.documents_title));
    render_nav_links(html, &nav.documents);
    html.push_str("</li>\n");

    html.push_str("<li class=\"nav-item\">\n");
    let _ = writeln!(html, "<a>{}</a>", escape_html(&nav.components_title));
    for group in &nav.groups {
        html.push_str("<div class=\"nav-group\">\n");
        let _ = writeln!(
            html,
            "<div class=\"nav-group__title\">{}</div>",
            escape_html(&group.name)
        );
        render_nav_links(html, &group.links);
        html.push_str("</div>\n");
    }
    html.push_str("</li>\n");

    html.push_str("</ul>\n</nav>\n");
}

fn render_nav_links(html: &mut String, links: &[NavLink]) {
    html.push_str("<ul class=\"pure-menu-list sub-nav\">\n");
    for link in links {
        let class = if link.active { " class=\"active\"" } else { "" };
        let _ = writeln!(
            html,
            "<li class=\"nav-item\"><a href=\"{}\"{class}>{}</a></li>",
            escape_html(&link.href),
            escape_html(&link.label)
        );
    }
    html.push_str("</ul>\n");
}

fn render_footer(html: &mut String, footer: &Footer) {
    html.push_str("<footer class=\"footer\">\n<div class=\"container\">\n");
    html.push_str("<div class=\"footer-main\">\n");
    let _ = writeln!(
        html,
        "<p class=\"footer-main-title\">{}</p>",
        escape_html(&footer.title)
    );
    for link in &footer.links {
        html.push_str("<span class=\"footer-main-link\">");
        render_link(html, link);
        html.push_str("</span>\n");
    }
    html.push_str("</div>\n");
    let _ = writeln!(
        html,
        "<div class=\"footer-social\"><a href=\"{}\" target=\"_blank\">GitHub</a></div>",
        escape_html(&footer.repository_url)
    );
    html.push_str("</div>\n</footer>\n");
}

fn render_link(html: &mut String, link: &Link) {
    let class = if link.active { " class=\"active\"" } else { "" };
    match &link.href {
        Some(href) => {
            let _ = write!(
                html,
                "<a href=\"{}\"{class}>{}</a>",
                escape_html(href),
                escape_html(&link.label)
            );
        }
        None => {
            let _ = write!(html, "<a{class}>{}</a>", escape_html(&link.label));
        }
    }
}
