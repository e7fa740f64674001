use iocraft::prelude::*;

use crate::color::{Color as AppColor, ColorDepth};
use crate::search::{BAR_HEIGHT, BarLayout, FieldTag, SearchState};

// ---------------------------------------------------------------------------
// Pre-rendered search bar
// ---------------------------------------------------------------------------

pub struct RenderedSearchField {
    pub placeholder: String,
    /// Query text; carries a trailing block cursor while the field is open.
    pub text: String,
    pub width: u32,
    pub text_fg: Color,
    pub placeholder_fg: Color,
    pub border_fg: Color,
}

pub struct RenderedSearchBar {
    pub fields: Vec<RenderedSearchField>,
}

/// Configuration for building a search bar with themed colors.
pub struct SearchBarBuildConfig<'a> {
    pub state: &'a SearchState,
    pub layout: &'a BarLayout,
    pub depth: ColorDepth,
    pub text_color: Option<AppColor>,
    pub prompt_color: Option<AppColor>,
    pub border_color: Option<AppColor>,
    pub open_border_color: Option<AppColor>,
}

impl RenderedSearchBar {
    /// Pre-render the three input boxes from the widget state. Box widths
    /// come from the same layout that pointer classification uses.
    pub fn build(cfg: &SearchBarBuildConfig<'_>) -> Self {
        let depth = cfg.depth;
        let text_fg = cfg
            .text_color
            .map_or(Color::White, |c| c.to_crossterm_color(depth));
        let prompt_fg = cfg
            .prompt_color
            .map_or(Color::Cyan, |c| c.to_crossterm_color(depth));
        let border_fg = cfg
            .border_color
            .map_or(Color::DarkGrey, |c| c.to_crossterm_color(depth));
        let open_border_fg = cfg
            .open_border_color
            .map_or(Color::Cyan, |c| c.to_crossterm_color(depth));

        let fields = FieldTag::ALL
            .iter()
            .map(|&tag| {
                let field = cfg.state.field(tag);
                let is_open = cfg.state.visibility.is_open(tag);
                let text = if is_open {
                    format!("{}\u{2588}", field.query) // append full block cursor
                } else {
                    field.query.clone()
                };
                RenderedSearchField {
                    placeholder: tag.placeholder().to_owned(),
                    text,
                    width: u32::from(cfg.layout.field_rect(tag).width),
                    text_fg,
                    placeholder_fg: prompt_fg,
                    border_fg: if is_open { open_border_fg } else { border_fg },
                }
            })
            .collect();

        Self { fields }
    }
}

// ---------------------------------------------------------------------------
// SearchBar component
// ---------------------------------------------------------------------------

#[derive(Default, Props)]
pub struct SearchBarProps {
    pub bar: Option<RenderedSearchBar>,
}

#[component]
pub fn SearchBar(props: &mut SearchBarProps) -> impl Into<AnyElement<'static>> {
    let Some(bar) = props.bar.take() else {
        return element! { View }.into_any();
    };

    element! {
        View(flex_direction: FlexDirection::Row, height: u32::from(BAR_HEIGHT)) {
            #(bar.fields.into_iter().enumerate().map(|(i, field)| {
                let (content, color) = if field.text.is_empty() {
                    (field.placeholder, field.placeholder_fg)
                } else {
                    (field.text, field.text_fg)
                };
                element! {
                    View(
                        key: i,
                        width: field.width,
                        height: u32::from(BAR_HEIGHT),
                        border_style: BorderStyle::Single,
                        border_color: field.border_fg,
                        padding_left: 1,
                        padding_right: 1,
                    ) {
                        Text(content: content, color: color, wrap: TextWrap::NoWrap)
                    }
                }.into_any()
            }))
        }
    }
    .into_any()
}
