use iocraft::prelude::*;

use crate::color::{Color as AppColor, ColorDepth};
use crate::filter::BoardQuery;

// ---------------------------------------------------------------------------
// Footer component — structured status bar
// ---------------------------------------------------------------------------

pub struct RenderedFooter {
    pub username: String,
    pub context_text: String,
    pub query_text: String,
    pub notice: Option<String>,
    pub help_hint: String,
    pub actor_fg: Color,
    pub text_fg: Color,
    pub notice_fg: Color,
    pub border_fg: Color,
    pub separator_fg: Color,
}

/// Configuration for building the footer.
pub struct FooterBuildConfig<'a> {
    pub username: &'a str,
    pub shown: usize,
    pub total: usize,
    pub query: &'a BoardQuery,
    pub notice: Option<&'a str>,
    pub panel_open: bool,
    pub depth: ColorDepth,
    pub actor_color: Option<AppColor>,
    pub text_color: Option<AppColor>,
    pub notice_color: Option<AppColor>,
    pub border_color: Option<AppColor>,
}

impl RenderedFooter {
    pub fn build(cfg: &FooterBuildConfig<'_>) -> Self {
        let depth = cfg.depth;
        let text_fg = cfg
            .text_color
            .map_or(Color::DarkGrey, |c| c.to_crossterm_color(depth));
        let help_hint = if cfg.panel_open {
            "\u{2191}\u{2193} select \u{00b7} Enter apply \u{00b7} Esc close".to_owned()
        } else {
            "Tab search \u{00b7} j/k move \u{00b7} r refresh \u{00b7} q quit".to_owned()
        };

        Self {
            username: cfg.username.to_owned(),
            context_text: format!("{}/{} PRs", cfg.shown, cfg.total),
            query_text: summarize_query(cfg.query),
            notice: cfg.notice.map(str::to_owned),
            help_hint,
            actor_fg: cfg
                .actor_color
                .map_or(Color::Cyan, |c| c.to_crossterm_color(depth)),
            text_fg,
            notice_fg: cfg
                .notice_color
                .map_or(Color::Red, |c| c.to_crossterm_color(depth)),
            border_fg: cfg
                .border_color
                .map_or(Color::DarkGrey, |c| c.to_crossterm_color(depth)),
            separator_fg: text_fg,
        }
    }
}

/// Compact `field:"text"` summary of the non-empty search queries.
fn summarize_query(query: &BoardQuery) -> String {
    let mut parts = Vec::new();
    if !query.user.is_empty() {
        parts.push(format!("user:\"{}\"", query.user));
    }
    if !query.repo.is_empty() {
        parts.push(format!("repo:\"{}\"", query.repo));
    }
    if !query.title.is_empty() {
        parts.push(format!("title:\"{}\"", query.title));
    }
    parts.join(" ")
}

#[derive(Default, Props)]
pub struct FooterProps {
    pub footer: Option<RenderedFooter>,
}

#[component]
pub fn Footer(props: &mut FooterProps) -> impl Into<AnyElement<'static>> {
    let Some(f) = props.footer.take() else {
        return element! { View }.into_any();
    };

    let separator = "  \u{2022}  ";
    let mut contents = Vec::new();
    if !f.username.is_empty() {
        contents.push(MixedTextContent::new(&f.username).color(f.actor_fg));
        contents.push(MixedTextContent::new(separator).color(f.separator_fg));
    }
    contents.push(MixedTextContent::new(&f.context_text).color(f.text_fg));
    if !f.query_text.is_empty() {
        contents.push(MixedTextContent::new(separator).color(f.separator_fg));
        contents.push(MixedTextContent::new(&f.query_text).color(f.text_fg));
    }
    if let Some(ref notice) = f.notice {
        contents.push(MixedTextContent::new(separator).color(f.separator_fg));
        contents.push(MixedTextContent::new(notice).color(f.notice_fg));
    }

    element! {
        View(
            border_style: BorderStyle::Single,
            border_edges: Edges::Top,
            border_color: f.border_fg,
            padding_left: 1,
            padding_right: 1,
        ) {
            View(flex_grow: 1.0) {
                MixedText(contents: contents, wrap: TextWrap::NoWrap)
            }
            Text(content: f.help_hint.clone(), color: f.text_fg, wrap: TextWrap::NoWrap)
        }
    }
    .into_any()
}
