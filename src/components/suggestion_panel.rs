use iocraft::prelude::*;

use crate::color::{Color as AppColor, ColorDepth};
use crate::search::Rect;

// ---------------------------------------------------------------------------
// Pre-rendered suggestion panel
// ---------------------------------------------------------------------------

pub struct RenderedSuggestionRow {
    pub text: String,
    pub fg: Color,
    pub bg: Color,
}

/// Pre-rendered dropdown data (owned, 'static-safe). Positioned in absolute
/// screen cells so the rows land exactly where pointer classification
/// expects them.
pub struct RenderedSuggestionPanel {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub rows: Vec<RenderedSuggestionRow>,
    pub screen_width: u32,
    pub screen_height: u32,
}

/// Configuration for building a suggestion panel.
pub struct PanelBuildConfig<'a> {
    pub items: &'a [String],
    pub highlight: usize,
    /// Panel region from the bar layout; its height caps the visible rows.
    pub rect: Rect,
    pub screen: (u16, u16),
    pub depth: ColorDepth,
    pub item_color: Option<AppColor>,
    pub highlight_color: Option<AppColor>,
    pub highlight_bg: Option<AppColor>,
}

impl RenderedSuggestionPanel {
    pub fn build(cfg: &PanelBuildConfig<'_>) -> Self {
        let depth = cfg.depth;
        let item_fg = cfg
            .item_color
            .map_or(Color::Grey, |c| c.to_crossterm_color(depth));
        let highlight_fg = cfg
            .highlight_color
            .map_or(Color::White, |c| c.to_crossterm_color(depth));
        let highlight_bg = cfg
            .highlight_bg
            .map_or(Color::DarkGrey, |c| c.to_crossterm_color(depth));

        let rows = cfg
            .items
            .iter()
            .take(usize::from(cfg.rect.height))
            .enumerate()
            .map(|(i, item)| {
                let is_highlighted = i == cfg.highlight;
                let marker = if is_highlighted { "\u{25b6} " } else { "  " };
                RenderedSuggestionRow {
                    text: format!("{marker}{item}"),
                    fg: if is_highlighted { highlight_fg } else { item_fg },
                    bg: if is_highlighted {
                        highlight_bg
                    } else {
                        Color::Reset
                    },
                }
            })
            .collect();

        Self {
            x: u32::from(cfg.rect.x),
            y: u32::from(cfg.rect.y),
            width: u32::from(cfg.rect.width),
            rows,
            screen_width: u32::from(cfg.screen.0),
            screen_height: u32::from(cfg.screen.1),
        }
    }
}

// ---------------------------------------------------------------------------
// SuggestionPanel component
// ---------------------------------------------------------------------------

#[derive(Default, Props)]
pub struct SuggestionPanelProps {
    pub panel: Option<RenderedSuggestionPanel>,
}

#[component]
pub fn SuggestionPanel(props: &mut SuggestionPanelProps) -> impl Into<AnyElement<'static>> {
    let Some(panel) = props.panel.take() else {
        return element! { View }.into_any();
    };
    if panel.rows.is_empty() {
        return element! { View }.into_any();
    }

    element! {
        View(
            width: panel.screen_width,
            height: panel.screen_height,
            position: Position::Absolute,
        ) {
            View(
                margin_left: panel.x,
                margin_top: panel.y,
                width: panel.width,
                flex_direction: FlexDirection::Column,
            ) {
                #(panel.rows.into_iter().enumerate().map(|(i, row)| {
                    element! {
                        View(key: i, background_color: row.bg, width: 100pct) {
                            Text(content: row.text, color: row.fg, wrap: TextWrap::NoWrap)
                        }
                    }.into_any()
                }))
            }
        }
    }
    .into_any()
}
