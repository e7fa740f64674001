use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossterm::event::{MouseButton, MouseEventKind};
use iocraft::prelude::*;

use crate::color::ColorDepth;
use crate::components::board_table::{
    BoardTable, Cell, Column, RenderedTable, Row, TableBuildConfig,
};
use crate::components::footer::{Footer, FooterBuildConfig, RenderedFooter};
use crate::components::search_bar::{RenderedSearchBar, SearchBar, SearchBarBuildConfig};
use crate::components::suggestion_panel::{
    PanelBuildConfig, RenderedSuggestionPanel, SuggestionPanel,
};
use crate::config::types::AppConfig;
use crate::engine::{EngineHandle, Event, Request};
use crate::filter::{BoardQuery, filter_board};
use crate::search::{BAR_HEIGHT, BarLayout, FieldTag, SearchState};
use crate::theme::ResolvedTheme;
use crate::types::{CandidateLists, PrState, PullRequest};

// ---------------------------------------------------------------------------
// Board columns and row conversion
// ---------------------------------------------------------------------------

fn board_columns() -> Vec<Column> {
    let column = |header: &str, width_pct, align, fixed_width| Column {
        header: header.to_owned(),
        width_pct,
        align,
        fixed_width,
    };
    vec![
        column("#", 0.0, TextAlign::Right, Some(6)),
        column(" Title", 0.50, TextAlign::Left, None),
        column("Repository", 0.30, TextAlign::Left, None),
        column("Author", 0.20, TextAlign::Left, None),
        column("Updated", 0.0, TextAlign::Right, Some(8)),
    ]
}

/// Cells in `board_columns` order.
fn pr_to_row(pr: &PullRequest, theme: &ResolvedTheme, date_format: &str) -> Row {
    let number_color = match pr.state {
        PrState::Open => theme.text_success,
        PrState::Merged => theme.text_secondary,
        PrState::Closed => theme.text_error,
    };
    vec![
        Cell::colored(format!("#{}", pr.number), number_color),
        Cell::colored(format!(" {}", pr.title), theme.text_primary),
        Cell::colored(&pr.repo, theme.text_secondary),
        Cell::colored(&pr.author, theme.text_actor),
        Cell::colored(
            crate::util::format_date(&pr.updated_at, date_format),
            theme.text_faint,
        ),
    ]
}

// ---------------------------------------------------------------------------
// Key handling
// ---------------------------------------------------------------------------

/// Handle a key while `tag`'s suggestion panel is open: edit that field's
/// query, move the highlight, commit a suggestion, or close.
#[allow(clippy::too_many_arguments)]
fn handle_search_key(
    code: KeyCode,
    modifiers: KeyModifiers,
    tag: FieldTag,
    mut search: State<SearchState>,
    candidates: &CandidateLists,
    panel_capacity: u16,
    notify: &mut dyn FnMut(FieldTag, &str),
    mut should_exit: State<bool>,
) {
    match code {
        KeyCode::Esc => {
            let mut st = search.read().clone();
            st.visibility.close_all();
            search.set(st);
        }
        KeyCode::Tab => {
            let mut st = search.read().clone();
            st.activate(tag.next());
            search.set(st);
        }
        KeyCode::BackTab => {
            let mut st = search.read().clone();
            st.activate(tag.prev());
            search.set(st);
        }
        KeyCode::Down => {
            let mut st = search.read().clone();
            let shown = shown_rows(&st, tag, panel_capacity);
            st.highlight_next(tag, shown);
            search.set(st);
        }
        KeyCode::Up => {
            let mut st = search.read().clone();
            let shown = shown_rows(&st, tag, panel_capacity);
            st.highlight_prev(tag, shown);
            search.set(st);
        }
        KeyCode::Enter => {
            let mut st = search.read().clone();
            let field = st.field(tag);
            match field.filtered.get(field.highlight).cloned() {
                Some(value) => st.select(tag, &value, notify),
                // Nothing to commit: keep the typed text, just close.
                None => st.visibility.close_if_open(tag),
            }
            search.set(st);
        }
        KeyCode::Backspace => {
            let mut st = search.read().clone();
            let mut text = st.field(tag).query.clone();
            text.pop();
            st.input(tag, &text, candidates, notify);
            search.set(st);
        }
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            should_exit.set(true);
        }
        KeyCode::Char(ch) if !modifiers.contains(KeyModifiers::CONTROL) => {
            let mut st = search.read().clone();
            let mut text = st.field(tag).query.clone();
            text.push(ch);
            st.input(tag, &text, candidates, notify);
            search.set(st);
        }
        _ => {}
    }
}

/// Handle a key while no panel is open: table navigation and app control.
#[allow(clippy::too_many_arguments)]
fn handle_board_key(
    code: KeyCode,
    modifiers: KeyModifiers,
    mut search: State<SearchState>,
    mut cursor: State<usize>,
    mut scroll_offset: State<usize>,
    row_count: usize,
    visible_rows: usize,
    mut loaded: State<bool>,
    mut should_exit: State<bool>,
) {
    match code {
        KeyCode::Char('q') => should_exit.set(true),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            should_exit.set(true);
        }
        KeyCode::Tab => {
            let mut st = search.read().clone();
            st.activate(FieldTag::User);
            search.set(st);
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if row_count > 0 {
                let next = (cursor.get() + 1).min(row_count - 1);
                cursor.set(next);
                if next >= scroll_offset.get() + visible_rows {
                    scroll_offset.set(next + 1 - visible_rows);
                }
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            let next = cursor.get().saturating_sub(1);
            cursor.set(next);
            if next < scroll_offset.get() {
                scroll_offset.set(next);
            }
        }
        KeyCode::Char('r') => loaded.set(false),
        _ => {}
    }
}

/// Visible row count of `tag`'s panel: its filtered list capped by the rows
/// that fit on screen. Shared by rendering, pointer classification, and
/// highlight navigation so all three agree.
fn shown_rows(st: &SearchState, tag: FieldTag, panel_capacity: u16) -> usize {
    st.field(tag)
        .filtered
        .len()
        .min(usize::from(panel_capacity))
}

// ---------------------------------------------------------------------------
// Root App component
// ---------------------------------------------------------------------------

#[derive(Default, Props)]
pub struct AppProps<'a> {
    pub config: Option<&'a AppConfig>,
    pub engine: Option<&'a EngineHandle>,
    pub theme: Option<&'a ResolvedTheme>,
    pub color_depth: ColorDepth,
}

#[component]
#[allow(clippy::too_many_lines)]
pub fn App<'a>(props: &AppProps<'a>, mut hooks: Hooks) -> impl Into<AnyElement<'a>> {
    let (width, height) = hooks.use_terminal_size();
    let mut system = hooks.use_context_mut::<SystemContext>();
    let should_exit = hooks.use_state(|| false);

    let theme = props.theme.cloned().unwrap_or_else(ResolvedTheme::fallback);
    let depth = props.color_depth;
    let config = props.config;
    let date_format = config
        .map_or("relative", |c| c.defaults.date_format.as_str())
        .to_owned();
    let show_separator = config.is_none_or(|c| c.theme.ui.table.show_separator);
    let username = config
        .and_then(|c| c.github.username.clone())
        .or_else(|| std::env::var("USER").ok())
        .unwrap_or_default();

    // Search widget state. The three raw texts are the per-field change
    // callbacks' targets; the board filters by them further down.
    let search = hooks.use_state(SearchState::default);
    let mut search_user = hooks.use_state(String::new);
    let mut search_repo = hooks.use_state(String::new);
    let mut search_title = hooks.use_state(String::new);

    // Board state.
    let mut board = hooks.use_state(Vec::<PullRequest>::new);
    let mut candidates = hooks.use_state(CandidateLists::default);
    let cursor = hooks.use_state(|| 0usize);
    let mut scroll_offset = hooks.use_state(|| 0usize);
    let mut notice = hooks.use_state(|| Option::<String>::None);

    // Event channel: engine sends events back to this view.
    let event_channel = hooks.use_state(|| {
        let (tx, rx) = std::sync::mpsc::channel::<Event>();
        (tx, Arc::new(Mutex::new(rx)))
    });
    let (event_tx, event_rx_arc) = event_channel.read().clone();
    let engine: Option<EngineHandle> = props.engine.cloned();

    let mut loaded = hooks.use_state(|| false);
    let mut in_flight = hooks.use_state(|| false);

    if !loaded.get()
        && !in_flight.get()
        && let Some(ref eng) = engine
    {
        in_flight.set(true);
        eng.send(Request::FetchBoard {
            reply_tx: event_tx.clone(),
        });
    }

    // Poll engine events and update local state.
    {
        let rx_for_poll = event_rx_arc.clone();
        let mut search_for_poll = search;
        hooks.use_future(async move {
            loop {
                smol::Timer::after(Duration::from_millis(100)).await;
                let events: Vec<Event> = {
                    let rx = rx_for_poll.lock().unwrap();
                    let mut evts = Vec::new();
                    while let Ok(evt) = rx.try_recv() {
                        evts.push(evt);
                    }
                    evts
                };
                for evt in events {
                    match evt {
                        Event::BoardFetched { prs } => {
                            let lists = CandidateLists::from_board(&prs);
                            // A fresh authoritative snapshot resets every
                            // field's suggestions to the full list, even
                            // mid-typing.
                            let mut st = search_for_poll.read().clone();
                            st.replace_candidates(&lists);
                            search_for_poll.set(st);
                            candidates.set(lists);
                            board.set(prs);
                            notice.set(None);
                            loaded.set(true);
                            in_flight.set(false);
                        }
                        Event::FetchError { context, message } => {
                            notice.set(Some(format!("{context}: {message}")));
                            loaded.set(true);
                            in_flight.set(false);
                        }
                    }
                }
            }
        });
    }

    // Exit handling.
    if should_exit.get() {
        system.exit();
    }

    // Board filtering by the three raw search texts.
    let query = BoardQuery {
        user: search_user.read().clone(),
        repo: search_repo.read().clone(),
        title: search_title.read().clone(),
    };
    let prs = board.read();
    let matching = filter_board(&prs, &query);
    let rows: Vec<Row> = matching
        .iter()
        .map(|&i| pr_to_row(&prs[i], &theme, &date_format))
        .collect();
    let row_count = rows.len();
    let total_count = prs.len();
    drop(prs);

    let visible_rows = usize::from(height.saturating_sub(7)).max(1);
    let cursor_render = cursor.get().min(row_count.saturating_sub(1));
    let layout = BarLayout::new(width);
    let panel_capacity = height.saturating_sub(BAR_HEIGHT + 2);

    // Terminal events: keys route to the open panel's field or to the board;
    // every mouse press is classified against the bar layout. The hook is
    // released when this component unmounts.
    {
        let candidates_snapshot = candidates.read().clone();
        let mut search = search;
        hooks.use_terminal_events(move |event| {
            let mut notify = |tag: FieldTag, text: &str| match tag {
                FieldTag::User => search_user.set(text.to_owned()),
                FieldTag::Repo => search_repo.set(text.to_owned()),
                FieldTag::Title => search_title.set(text.to_owned()),
            };
            match event {
                TerminalEvent::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) if kind != KeyEventKind::Release => {
                    let open = search.read().visibility.open_tag();
                    match open {
                        Some(tag) => handle_search_key(
                            code,
                            modifiers,
                            tag,
                            search,
                            &candidates_snapshot,
                            panel_capacity,
                            &mut notify,
                            should_exit,
                        ),
                        None => handle_board_key(
                            code,
                            modifiers,
                            search,
                            cursor,
                            scroll_offset,
                            row_count,
                            visible_rows,
                            loaded,
                            should_exit,
                        ),
                    }
                }
                TerminalEvent::FullscreenMouse(mouse) => match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        let open = {
                            let st = search.read();
                            st.visibility.open_tag().map(|tag| {
                                #[allow(clippy::cast_possible_truncation)]
                                let shown = shown_rows(&st, tag, panel_capacity) as u16;
                                (tag, shown)
                            })
                        };
                        let hit = layout.hit(mouse.column, mouse.row, open);
                        let mut st = search.read().clone();
                        st.pointer_down(hit, &mut notify);
                        search.set(st);
                    }
                    MouseEventKind::ScrollDown => {
                        if scroll_offset.get() + visible_rows < row_count {
                            scroll_offset.set(scroll_offset.get() + 1);
                        }
                    }
                    MouseEventKind::ScrollUp => {
                        scroll_offset.set(scroll_offset.get().saturating_sub(1));
                    }
                    _ => {}
                },
                _ => {}
            }
        });
    }

    // Pre-render everything the element tree needs.
    let st = search.read();
    let bar = RenderedSearchBar::build(&SearchBarBuildConfig {
        state: &st,
        layout: &layout,
        depth,
        text_color: Some(theme.text_primary),
        prompt_color: Some(theme.search_prompt),
        border_color: Some(theme.border_faint),
        open_border_color: Some(theme.search_highlight),
    });

    let panel = st.visibility.open_tag().map(|tag| {
        let field = st.field(tag);
        #[allow(clippy::cast_possible_truncation)]
        let shown = shown_rows(&st, tag, panel_capacity) as u16;
        RenderedSuggestionPanel::build(&PanelBuildConfig {
            items: &field.filtered,
            highlight: field.highlight,
            rect: layout.panel_rect(tag, shown),
            screen: (width, height),
            depth,
            item_color: Some(theme.text_secondary),
            highlight_color: Some(theme.search_highlight),
            highlight_bg: Some(theme.bg_selected),
        })
    });
    let panel_open = st.visibility.open_tag().is_some();
    drop(st);

    let columns = board_columns();
    let table = RenderedTable::build(&TableBuildConfig {
        columns: &columns,
        rows: &rows,
        cursor: cursor_render,
        scroll_offset: scroll_offset.get(),
        visible_rows,
        total_width: width,
        depth,
        selected_bg: Some(theme.bg_selected),
        header_color: Some(theme.text_primary),
        border_color: Some(theme.border_faint),
        show_separator,
        empty_message: Some(if loaded.get() {
            "No matching pull requests"
        } else {
            "Loading\u{2026}"
        }),
    });

    let notice_text = notice.read().clone();
    let footer = RenderedFooter::build(&FooterBuildConfig {
        username: &username,
        shown: row_count,
        total: total_count,
        query: &query,
        notice: notice_text.as_deref(),
        panel_open,
        depth,
        actor_color: Some(theme.text_actor),
        text_color: Some(theme.text_faint),
        notice_color: Some(theme.text_error),
        border_color: Some(theme.border_faint),
    });

    element! {
        View(
            width: u32::from(width),
            height: u32::from(height),
            flex_direction: FlexDirection::Column,
        ) {
            SearchBar(bar: Some(bar))
            View(flex_grow: 1.0, flex_direction: FlexDirection::Column) {
                BoardTable(table: Some(table))
            }
            Footer(footer: Some(footer))
            SuggestionPanel(panel: panel)
        }
    }
}
