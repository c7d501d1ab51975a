//! Page modules: the renderable units behind registry keys.
//!
//! A page receives exactly one piece of external configuration, the
//! [`MarkdownLabels`] used on the show/hide toggle of its code demos.

use eldoc_i18n::{LocaleKey, LocaleStore};
use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd, html};

use crate::html::escape_html;

/// Labels for the source toggle on code demos.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MarkdownLabels {
    /// Label shown while the source is collapsed.
    pub show: String,
    /// Label shown while the source is expanded.
    pub hide: String,
}

impl MarkdownLabels {
    /// Labels from `markdown.show` / `markdown.hide` in the current locale.
    ///
    /// Missing strings become empty labels.
    #[must_use]
    pub fn from_store(store: &LocaleStore) -> Self {
        Self {
            show: store
                .text_or_blank(&LocaleKey::new("markdown", "show"))
                .to_owned(),
            hide: store
                .text_or_blank(&LocaleKey::new("markdown", "hide"))
                .to_owned(),
        }
    }
}

/// A renderable page behind a registry key.
pub trait PageModule: Send + Sync {
    /// Render the page body to HTML.
    fn render(&self, labels: &MarkdownLabels) -> String;
}

/// Markdown page rendered with `pulldown-cmark`.
///
/// Every fenced or indented code block is wrapped in a demo block with a
/// toggle carrying both labels.
#[derive(Clone, Debug)]
pub struct MarkdownPage {
    source: String,
}

impl MarkdownPage {
    /// Page from markdown source.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Page holding only a heading, for keys without a source file.
    #[must_use]
    pub fn placeholder(title: &str) -> Self {
        Self::new(format!("## {title}\n"))
    }

    /// Markdown source.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl PageModule for MarkdownPage {
    fn render(&self, labels: &MarkdownLabels) -> String {
        let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
        let parser = Parser::new_ext(&self.source, options);

        let control = demo_control(labels);
        let events = parser.flat_map(|event| match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let open = demo_open(&kind);
                vec![Event::Html(open.into()), Event::Start(Tag::CodeBlock(kind))]
            }
            Event::End(TagEnd::CodeBlock) => vec![
                Event::End(TagEnd::CodeBlock),
                Event::Html(CowStr::from(control.clone())),
            ],
            other => vec![other],
        });

        let mut out = String::with_capacity(self.source.len() * 3 / 2);
        html::push_html(&mut out, events);
        out
    }
}

fn demo_open(kind: &CodeBlockKind<'_>) -> String {
    match kind {
        CodeBlockKind::Fenced(lang) if !lang.is_empty() => format!(
            r#"<div class="demo-block demo-{}"><div class="demo-block-source">"#,
            escape_html(lang.split_whitespace().next().unwrap_or_default())
        ),
        _ => r#"<div class="demo-block"><div class="demo-block-source">"#.to_owned(),
    }
}

fn demo_control(labels: &MarkdownLabels) -> String {
    format!(
        r#"</div><div class="demo-block-control" data-show="{show}" data-hide="{hide}">{show}</div></div>"#,
        show = escape_html(&labels.show),
        hide = escape_html(&labels.hide),
    )
}
