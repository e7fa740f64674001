use crate::filter::filter_suggestions;
use crate::types::CandidateLists;

// ---------------------------------------------------------------------------
// Field identity
// ---------------------------------------------------------------------------

/// Identity of one of the three search fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTag {
    User,
    Repo,
    Title,
}

impl FieldTag {
    pub const ALL: [FieldTag; 3] = [FieldTag::User, FieldTag::Repo, FieldTag::Title];

    pub fn label(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Repo => "Repo",
            Self::Title => "Title",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::User => "Search by user",
            Self::Repo => "Search by repository",
            Self::Title => "Search by PR title",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::User => 0,
            Self::Repo => 1,
            Self::Title => 2,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::User => Self::Repo,
            Self::Repo => Self::Title,
            Self::Title => Self::User,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::User => Self::Title,
            Self::Repo => Self::User,
            Self::Title => Self::Repo,
        }
    }
}

// ---------------------------------------------------------------------------
// Panel visibility
// ---------------------------------------------------------------------------

/// Which field's suggestion panel is open, if any.
///
/// A single value shared by all three fields. Holding it as one
/// `Option<FieldTag>` makes "at most one panel open" true by construction;
/// all transitions go through the three methods below.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelVisibility {
    open: Option<FieldTag>,
}

impl PanelVisibility {
    /// Open `tag`'s panel, closing any other in the same step. Last caller
    /// wins; there is no intermediate closed state.
    pub fn open(&mut self, tag: FieldTag) {
        self.open = Some(tag);
    }

    pub fn close_all(&mut self) {
        self.open = None;
    }

    /// Close only if `tag`'s panel is the open one. A stale close request
    /// from a field that has already been superseded is a no-op.
    pub fn close_if_open(&mut self, tag: FieldTag) {
        if self.open == Some(tag) {
            self.open = None;
        }
    }

    pub fn open_tag(self) -> Option<FieldTag> {
        self.open
    }

    pub fn is_open(self, tag: FieldTag) -> bool {
        self.open == Some(tag)
    }
}

// ---------------------------------------------------------------------------
// Per-field state
// ---------------------------------------------------------------------------

/// State owned by a single search field.
#[derive(Debug, Clone, Default)]
pub struct FieldState {
    /// Raw text as typed (or as set by a selection). Never derived from the
    /// candidate lists.
    pub query: String,
    /// The suggestions currently shown for this field.
    pub filtered: Vec<String>,
    /// Keyboard cursor into `filtered`.
    pub highlight: usize,
}

// ---------------------------------------------------------------------------
// Search widget state
// ---------------------------------------------------------------------------

/// Aggregate state of the search bar: three fields plus the shared panel
/// visibility. Operations on one tag never touch another tag's field.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    fields: [FieldState; 3],
    pub visibility: PanelVisibility,
}

impl SearchState {
    pub fn field(&self, tag: FieldTag) -> &FieldState {
        &self.fields[tag.index()]
    }

    fn field_mut(&mut self, tag: FieldTag) -> &mut FieldState {
        &mut self.fields[tag.index()]
    }

    /// Activate a field: open its panel (and thereby close any other).
    /// Query text is untouched.
    pub fn activate(&mut self, tag: FieldTag) {
        self.visibility.open(tag);
    }

    /// Replace a field's text wholesale. Recomputes the filtered suggestions
    /// from the current candidate snapshot and notifies the parent with the
    /// raw text, all within the same interaction.
    pub fn input(
        &mut self,
        tag: FieldTag,
        text: &str,
        candidates: &CandidateLists,
        notify: &mut dyn FnMut(FieldTag, &str),
    ) {
        let field = self.field_mut(tag);
        field.query = text.to_owned();
        field.filtered = filter_suggestions(candidates.for_tag(tag), text);
        field.highlight = 0;
        notify(tag, text);
    }

    /// Commit a suggestion: the field's text becomes `value`, the parent is
    /// notified, and this field's panel closes (only if it is still the open
    /// one).
    pub fn select(
        &mut self,
        tag: FieldTag,
        value: &str,
        notify: &mut dyn FnMut(FieldTag, &str),
    ) {
        self.field_mut(tag).query = value.to_owned();
        notify(tag, value);
        self.visibility.close_if_open(tag);
    }

    /// The parent delivered a fresh candidate snapshot: every field's
    /// suggestions revert to the full, unfiltered list. This deliberately
    /// wins over an in-progress filter; the query text is kept as typed.
    pub fn replace_candidates(&mut self, candidates: &CandidateLists) {
        for tag in FieldTag::ALL {
            let field = self.field_mut(tag);
            field.filtered = candidates.for_tag(tag).to_vec();
            field.highlight = 0;
        }
    }

    /// Move the keyboard cursor down, wrapping over the first `count` rows.
    pub fn highlight_next(&mut self, tag: FieldTag, count: usize) {
        if count == 0 {
            return;
        }
        let field = self.field_mut(tag);
        field.highlight = (field.highlight + 1) % count;
    }

    /// Move the keyboard cursor up, wrapping over the first `count` rows.
    pub fn highlight_prev(&mut self, tag: FieldTag, count: usize) {
        if count == 0 {
            return;
        }
        let field = self.field_mut(tag);
        field.highlight = if field.highlight == 0 {
            count - 1
        } else {
            field.highlight - 1
        };
    }

    /// Apply a classified pointer-down interaction.
    ///
    /// A press on a field's input box opens that panel (same transition as
    /// `activate`, so the two paths agree); a press on an open panel row
    /// selects that suggestion; a press anywhere else closes whatever is
    /// open.
    pub fn pointer_down(&mut self, hit: Hit, notify: &mut dyn FnMut(FieldTag, &str)) {
        match hit {
            Hit::Field(tag) => self.activate(tag),
            Hit::Suggestion(tag, idx) => {
                if let Some(value) = self.field(tag).filtered.get(idx).cloned() {
                    self.select(tag, &value, notify);
                }
            }
            Hit::Outside => self.visibility.close_all(),
        }
    }
}

// ---------------------------------------------------------------------------
// Hit testing
// ---------------------------------------------------------------------------

/// Height of the bordered input row, in terminal rows.
pub const BAR_HEIGHT: u16 = 3;

/// Classification of a pointer-down interaction against the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// One of the three input boxes.
    Field(FieldTag),
    /// A visible row of the open suggestion panel.
    Suggestion(FieldTag, usize),
    /// Anything not recognized as part of the widget.
    Outside,
}

/// A cell-grid rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn contains(self, column: u16, row: u16) -> bool {
        column >= self.x
            && column < self.x.saturating_add(self.width)
            && row >= self.y
            && row < self.y.saturating_add(self.height)
    }
}

/// On-screen geometry of the search bar.
///
/// The same layout drives both rendering and pointer classification, so the
/// press-to-open path and the rendered boxes cannot disagree.
#[derive(Debug, Clone, Copy)]
pub struct BarLayout {
    fields: [Rect; 3],
}

impl BarLayout {
    /// Three input boxes spanning the top of the screen, side by side.
    /// The last box absorbs the division remainder.
    pub fn new(total_width: u16) -> Self {
        let w = total_width / 3;
        let last = total_width.saturating_sub(2 * w);
        let boxed = |x, width| Rect {
            x,
            y: 0,
            width,
            height: BAR_HEIGHT,
        };
        Self {
            fields: [boxed(0, w), boxed(w, w), boxed(2 * w, last)],
        }
    }

    pub fn field_rect(&self, tag: FieldTag) -> Rect {
        self.fields[tag.index()]
    }

    /// The dropdown region directly under a field's box.
    pub fn panel_rect(&self, tag: FieldTag, rows: u16) -> Rect {
        let f = self.field_rect(tag);
        Rect {
            x: f.x,
            y: f.y + f.height,
            width: f.width,
            height: rows,
        }
    }

    /// Classify a pointer position. `open` carries the open panel's tag and
    /// its visible row count, if a panel is showing.
    pub fn hit(&self, column: u16, row: u16, open: Option<(FieldTag, u16)>) -> Hit {
        for tag in FieldTag::ALL {
            if self.field_rect(tag).contains(column, row) {
                return Hit::Field(tag);
            }
        }
        if let Some((tag, rows)) = open
            && rows > 0
        {
            let panel = self.panel_rect(tag, rows);
            if panel.contains(column, row) {
                return Hit::Suggestion(tag, usize::from(row - panel.y));
            }
        }
        Hit::Outside
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visibility_starts_closed() {
        let vis = PanelVisibility::default();
        assert_eq!(vis.open_tag(), None);
        for tag in FieldTag::ALL {
            assert!(!vis.is_open(tag));
        }
    }

    #[test]
    fn open_is_last_caller_wins() {
        let mut vis = PanelVisibility::default();
        vis.open(FieldTag::User);
        vis.open(FieldTag::Repo);
        vis.open(FieldTag::Title);
        assert_eq!(vis.open_tag(), Some(FieldTag::Title));
        assert!(!vis.is_open(FieldTag::User));
        assert!(!vis.is_open(FieldTag::Repo));
    }

    #[test]
    fn close_if_open_ignores_other_tags() {
        let mut vis = PanelVisibility::default();
        vis.open(FieldTag::Repo);
        vis.close_if_open(FieldTag::User);
        assert_eq!(vis.open_tag(), Some(FieldTag::Repo));
        vis.close_if_open(FieldTag::Repo);
        assert_eq!(vis.open_tag(), None);
    }

    #[test]
    fn tag_cycle_is_closed() {
        for tag in FieldTag::ALL {
            assert_eq!(tag.next().prev(), tag);
        }
        assert_eq!(FieldTag::Title.next(), FieldTag::User);
    }

    #[test]
    fn layout_boxes_tile_the_bar() {
        let layout = BarLayout::new(90);
        for tag in FieldTag::ALL {
            let r = layout.field_rect(tag);
            assert_eq!(r.width, 30);
            assert_eq!(r.height, BAR_HEIGHT);
        }
        assert_eq!(layout.field_rect(FieldTag::Repo).x, 30);
        assert_eq!(layout.field_rect(FieldTag::Title).x, 60);
    }

    #[test]
    fn layout_last_box_absorbs_remainder() {
        let layout = BarLayout::new(100);
        assert_eq!(layout.field_rect(FieldTag::Title).width, 34);
    }

    #[test]
    fn hit_classifies_each_box() {
        let layout = BarLayout::new(90);
        assert_eq!(layout.hit(0, 0, None), Hit::Field(FieldTag::User));
        assert_eq!(layout.hit(45, 2, None), Hit::Field(FieldTag::Repo));
        assert_eq!(layout.hit(89, 1, None), Hit::Field(FieldTag::Title));
    }

    #[test]
    fn hit_below_bar_is_outside_when_no_panel() {
        let layout = BarLayout::new(90);
        assert_eq!(layout.hit(10, BAR_HEIGHT, None), Hit::Outside);
        assert_eq!(layout.hit(10, 20, None), Hit::Outside);
    }

    #[test]
    fn hit_on_open_panel_rows() {
        let layout = BarLayout::new(90);
        let open = Some((FieldTag::Repo, 3));
        assert_eq!(
            layout.hit(35, BAR_HEIGHT, open),
            Hit::Suggestion(FieldTag::Repo, 0)
        );
        assert_eq!(
            layout.hit(35, BAR_HEIGHT + 2, open),
            Hit::Suggestion(FieldTag::Repo, 2)
        );
        // Just past the last row, or under a different field: outside.
        assert_eq!(layout.hit(35, BAR_HEIGHT + 3, open), Hit::Outside);
        assert_eq!(layout.hit(5, BAR_HEIGHT, open), Hit::Outside);
    }

    #[test]
    fn highlight_wraps_both_ways() {
        let mut st = SearchState::default();
        st.highlight_next(FieldTag::User, 3);
        st.highlight_next(FieldTag::User, 3);
        assert_eq!(st.field(FieldTag::User).highlight, 2);
        st.highlight_next(FieldTag::User, 3);
        assert_eq!(st.field(FieldTag::User).highlight, 0);
        st.highlight_prev(FieldTag::User, 3);
        assert_eq!(st.field(FieldTag::User).highlight, 2);
        // Zero rows: no movement, no panic.
        st.highlight_next(FieldTag::Repo, 0);
        assert_eq!(st.field(FieldTag::Repo).highlight, 0);
    }
}
