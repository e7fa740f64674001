// components module — pure rendering: every component takes pre-rendered,
// fully owned data and emits elements; logic lives in the owning view.

pub mod board_table;
pub mod footer;
pub mod search_bar;
pub mod suggestion_panel;
