use iocraft::prelude::*;

use crate::color::{Color as AppColor, ColorDepth};
use crate::util::truncate_to_width;

// ---------------------------------------------------------------------------
// Columns and cells
// ---------------------------------------------------------------------------

/// One column of the board. Cells are positional: row index N renders under
/// column N.
#[derive(Debug, Clone)]
pub struct Column {
    pub header: String,
    /// Share of the flexible space (0.0..1.0); ignored for fixed columns.
    pub width_pct: f32,
    pub align: TextAlign,
    /// Absolute width in cells; takes the column out of the flexible pool.
    pub fixed_width: Option<u16>,
}

/// A single cell value to display.
#[derive(Debug, Clone)]
pub struct Cell {
    pub text: String,
    pub color: Option<AppColor>,
    pub bold: bool,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
            bold: false,
        }
    }

    pub fn colored(text: impl Into<String>, color: AppColor) -> Self {
        Self {
            text: text.into(),
            color: Some(color),
            bold: false,
        }
    }
}

/// One board row: cells in column order.
pub type Row = Vec<Cell>;

// ---------------------------------------------------------------------------
// Pre-rendered table (owned, 'static-safe)
// ---------------------------------------------------------------------------

pub struct RenderedTable {
    pub headers: Vec<RenderedCell>,
    pub rows: Vec<RenderedRow>,
    pub width: u32,
    pub separator: bool,
    pub header_fg: Color,
    pub border_fg: Color,
    /// Shown instead of rows when there are none.
    pub empty_message: Option<String>,
}

pub struct RenderedRow {
    pub key: usize,
    pub bg: Option<Color>,
    pub cells: Vec<RenderedCell>,
}

pub struct RenderedCell {
    pub text: String,
    pub fg: Color,
    pub weight: Weight,
    pub width: u32,
    pub align: TextAlign,
}

/// Configuration for building a `RenderedTable`.
pub struct TableBuildConfig<'a> {
    pub columns: &'a [Column],
    pub rows: &'a [Row],
    pub cursor: usize,
    pub scroll_offset: usize,
    pub visible_rows: usize,
    pub total_width: u16,
    pub depth: ColorDepth,
    pub selected_bg: Option<AppColor>,
    pub header_color: Option<AppColor>,
    pub border_color: Option<AppColor>,
    pub show_separator: bool,
    pub empty_message: Option<&'a str>,
}

impl RenderedTable {
    /// Pre-render the scroll window into owned cells. Text wider than its
    /// column is cut with an ellipsis.
    pub fn build(cfg: &TableBuildConfig<'_>) -> Self {
        let depth = cfg.depth;
        let widths = compute_column_widths(cfg.columns, cfg.total_width);
        let selected_bg = cfg.selected_bg.map(|c| c.to_crossterm_color(depth));
        let header_fg = cfg
            .header_color
            .map_or(Color::White, |c| c.to_crossterm_color(depth));

        let headers = cfg
            .columns
            .iter()
            .zip(&widths)
            .map(|(col, &w)| RenderedCell {
                text: col.header.clone(),
                fg: header_fg,
                weight: Weight::Bold,
                width: u32::from(w),
                align: col.align,
            })
            .collect();

        let window = cfg
            .rows
            .iter()
            .enumerate()
            .skip(cfg.scroll_offset)
            .take(cfg.visible_rows);
        let rows = window
            .map(|(idx, row)| RenderedRow {
                key: idx,
                bg: selected_bg.filter(|_| idx == cfg.cursor),
                cells: render_cells(row, cfg.columns, &widths, depth),
            })
            .collect();

        Self {
            headers,
            rows,
            width: u32::from(cfg.total_width),
            separator: cfg.show_separator,
            header_fg,
            border_fg: cfg
                .border_color
                .map_or(Color::DarkGrey, |c| c.to_crossterm_color(depth)),
            empty_message: cfg
                .empty_message
                .filter(|_| cfg.rows.is_empty())
                .map(String::from),
        }
    }
}

fn render_cells(
    row: &Row,
    columns: &[Column],
    widths: &[u16],
    depth: ColorDepth,
) -> Vec<RenderedCell> {
    columns
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (col, &w))| {
            let cell = row.get(i);
            RenderedCell {
                text: cell.map_or_else(String::new, |c| {
                    truncate_to_width(&c.text, usize::from(w))
                }),
                fg: cell
                    .and_then(|c| c.color)
                    .map_or(Color::Reset, |c| c.to_crossterm_color(depth)),
                weight: match cell {
                    Some(c) if c.bold => Weight::Bold,
                    _ => Weight::Normal,
                },
                width: u32::from(w),
                align: col.align,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// BoardTable component
// ---------------------------------------------------------------------------

#[derive(Default, Props)]
pub struct BoardTableProps {
    pub table: Option<RenderedTable>,
}

#[component]
pub fn BoardTable(props: &mut BoardTableProps) -> impl Into<AnyElement<'static>> {
    let Some(table) = props.table.take() else {
        return element! { View }.into_any();
    };

    let header_border = if table.separator {
        BorderStyle::Single
    } else {
        BorderStyle::None
    };

    element! {
        View(flex_direction: FlexDirection::Column, width: table.width) {
            View(
                border_style: header_border,
                border_edges: Edges::Bottom,
                border_color: table.border_fg,
            ) {
                #(table.headers.into_iter().enumerate().map(|(i, hc)| {
                    element! {
                        View(key: i, width: hc.width) {
                            Text(
                                content: hc.text,
                                color: hc.fg,
                                weight: hc.weight,
                                wrap: TextWrap::NoWrap,
                                align: hc.align,
                            )
                        }
                    }
                }))
            }

            #(table.empty_message.into_iter().map(|msg| {
                element! {
                    View(padding_top: 1, padding_left: 2) {
                        Text(content: msg, color: Color::DarkGrey)
                    }
                }
            }))
            #(table.rows.into_iter().map(|row| {
                element! {
                    View(key: row.key, background_color: row.bg) {
                        #(row.cells.into_iter().enumerate().map(|(ci, cell)| {
                            element! {
                                View(key: ci, width: cell.width) {
                                    Text(
                                        content: cell.text,
                                        color: cell.fg,
                                        weight: cell.weight,
                                        wrap: TextWrap::NoWrap,
                                        align: cell.align,
                                    )
                                }
                            }
                        }))
                    }
                }
            }))
        }
    }
    .into_any()
}

// ---------------------------------------------------------------------------
// Column width computation
// ---------------------------------------------------------------------------

/// Distribute `total` cells: fixed columns first, then the flexible ones in
/// proportion to their percentages. The last flexible column absorbs the
/// rounding remainder so the widths sum to `total` exactly (whenever the
/// fixed columns fit at all).
fn compute_column_widths(columns: &[Column], total: u16) -> Vec<u16> {
    let fixed: u16 = columns.iter().filter_map(|c| c.fixed_width).sum();
    let flex_space = total.saturating_sub(fixed);

    let flexible = columns.iter().filter(|c| c.fixed_width.is_none()).count();
    let pct_sum: f32 = columns
        .iter()
        .filter(|c| c.fixed_width.is_none())
        .map(|c| c.width_pct)
        .sum();

    let mut left = flex_space;
    let mut seen = 0usize;
    columns
        .iter()
        .map(|col| {
            let Some(fixed_width) = col.fixed_width else {
                seen += 1;
                if seen == flexible {
                    return std::mem::take(&mut left);
                }
                #[allow(clippy::cast_precision_loss)]
                let share = if pct_sum > 0.0 {
                    col.width_pct / pct_sum
                } else {
                    1.0 / flexible as f32
                };
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let w = ((f32::from(flex_space) * share).round() as u16).min(left);
                left -= w;
                return w;
            };
            fixed_width
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_columns() -> Vec<Column> {
        vec![
            Column {
                header: "#".to_owned(),
                width_pct: 0.0,
                align: TextAlign::Right,
                fixed_width: Some(6),
            },
            Column {
                header: "Title".to_owned(),
                width_pct: 0.55,
                align: TextAlign::Left,
                fixed_width: None,
            },
            Column {
                header: "Author".to_owned(),
                width_pct: 0.45,
                align: TextAlign::Left,
                fixed_width: None,
            },
        ]
    }

    #[test]
    fn fixed_columns_keep_their_width() {
        let widths = compute_column_widths(&make_columns(), 100);
        assert_eq!(widths[0], 6);
        let flexible: u16 = widths[1..].iter().sum();
        assert_eq!(flexible, 94, "flexible columns fill the space exactly");
        assert!(widths[1] > widths[2], "title should be wider than author");
    }

    #[test]
    fn narrow_terminal_does_not_underflow() {
        let widths = compute_column_widths(&make_columns(), 4);
        assert_eq!(widths[0], 6);
        assert!(widths[1..].iter().all(|&w| w == 0));
    }

    #[test]
    fn build_truncates_cell_text_to_column_width() {
        let columns = vec![Column {
            header: "Title".to_owned(),
            width_pct: 1.0,
            align: TextAlign::Left,
            fixed_width: Some(8),
        }];
        let rows = vec![vec![Cell::plain("a very long pull request title")]];
        let cfg = TableBuildConfig {
            columns: &columns,
            rows: &rows,
            cursor: 0,
            scroll_offset: 0,
            visible_rows: 5,
            total_width: 8,
            depth: ColorDepth::TrueColor,
            selected_bg: None,
            header_color: None,
            border_color: None,
            show_separator: false,
            empty_message: None,
        };
        let table = RenderedTable::build(&cfg);
        let text = &table.rows[0].cells[0].text;
        assert!(text.ends_with('\u{2026}'), "expected ellipsis, got {text}");
    }

    #[test]
    fn build_clamps_scroll_past_end() {
        let columns = make_columns();
        let rows: Vec<Row> = Vec::new();
        let cfg = TableBuildConfig {
            columns: &columns,
            rows: &rows,
            cursor: 0,
            scroll_offset: 10,
            visible_rows: 5,
            total_width: 80,
            depth: ColorDepth::TrueColor,
            selected_bg: None,
            header_color: None,
            border_color: None,
            show_separator: true,
            empty_message: Some("nothing here"),
        };
        let table = RenderedTable::build(&cfg);
        assert!(table.rows.is_empty());
        assert_eq!(table.empty_message.as_deref(), Some("nothing here"));
    }

    #[test]
    fn missing_trailing_cells_render_blank() {
        let columns = make_columns();
        let rows = vec![vec![Cell::plain("#1")]];
        let cfg = TableBuildConfig {
            columns: &columns,
            rows: &rows,
            cursor: 0,
            scroll_offset: 0,
            visible_rows: 5,
            total_width: 60,
            depth: ColorDepth::TrueColor,
            selected_bg: None,
            header_color: None,
            border_color: None,
            show_separator: true,
            empty_message: None,
        };
        let table = RenderedTable::build(&cfg);
        assert_eq!(table.rows[0].cells.len(), 3);
        assert!(table.rows[0].cells[1].text.is_empty());
    }
}
