use flowhub::filter::filter_suggestions;
use flowhub::search::{BAR_HEIGHT, BarLayout, FieldTag, Hit, SearchState};
use flowhub::types::CandidateLists;

fn lists(user: &[&str], repo: &[&str], title: &[&str]) -> CandidateLists {
    let own = |items: &[&str]| items.iter().map(|s| (*s).to_owned()).collect();
    CandidateLists {
        user: own(user),
        repo: own(repo),
        title: own(title),
    }
}

/// Records every (tag, text) pair the widget reports to its parent.
fn recording(log: &mut Vec<(FieldTag, String)>) -> impl FnMut(FieldTag, &str) + '_ {
    |tag: FieldTag, text: &str| log.push((tag, text.to_owned()))
}

#[test]
fn typing_filters_and_notifies_with_raw_text() {
    let candidates = lists(&["alice", "bob"], &[], &[]);
    let mut st = SearchState::default();
    st.replace_candidates(&candidates);
    st.activate(FieldTag::User);

    let mut log = Vec::new();
    st.input(FieldTag::User, "a", &candidates, &mut recording(&mut log));
    st.input(FieldTag::User, "al", &candidates, &mut recording(&mut log));

    let field = st.field(FieldTag::User);
    assert_eq!(field.query, "al");
    assert_eq!(field.filtered, vec!["alice".to_owned()]);
    assert_eq!(
        log,
        vec![
            (FieldTag::User, "a".to_owned()),
            (FieldTag::User, "al".to_owned()),
        ]
    );
}

#[test]
fn clicking_another_field_switches_panels_in_one_step() {
    let mut st = SearchState::default();
    st.activate(FieldTag::User);
    assert!(st.visibility.is_open(FieldTag::User));

    // Direct press on the repo input: User -> Repo with no intermediate None.
    let mut log = Vec::new();
    st.pointer_down(Hit::Field(FieldTag::Repo), &mut recording(&mut log));
    assert_eq!(st.visibility.open_tag(), Some(FieldTag::Repo));
    assert!(log.is_empty(), "activation must not notify the parent");
}

#[test]
fn outside_press_closes_the_open_panel() {
    let mut st = SearchState::default();
    st.activate(FieldTag::User);

    let mut log = Vec::new();
    st.pointer_down(Hit::Outside, &mut recording(&mut log));
    assert_eq!(st.visibility.open_tag(), None);
    assert!(log.is_empty());
}

#[test]
fn selecting_a_suggestion_sets_text_notifies_and_closes() {
    let candidates = lists(&["alice", "bob"], &[], &[]);
    let mut st = SearchState::default();
    st.replace_candidates(&candidates);
    st.activate(FieldTag::User);

    let mut log = Vec::new();
    st.input(FieldTag::User, "al", &candidates, &mut recording(&mut log));
    st.pointer_down(Hit::Suggestion(FieldTag::User, 0), &mut recording(&mut log));

    assert_eq!(st.field(FieldTag::User).query, "alice");
    assert_eq!(st.visibility.open_tag(), None);
    assert_eq!(log.last().unwrap(), &(FieldTag::User, "alice".to_owned()));
}

#[test]
fn selection_close_is_scoped_to_its_own_field() {
    let candidates = lists(&["alice"], &["org/api"], &[]);
    let mut st = SearchState::default();
    st.replace_candidates(&candidates);

    // The repo panel was opened after the user field's selection started;
    // the stale close must not hide it.
    st.activate(FieldTag::Repo);
    let mut log = Vec::new();
    st.select(FieldTag::User, "alice", &mut recording(&mut log));
    assert_eq!(st.visibility.open_tag(), Some(FieldTag::Repo));
}

#[test]
fn candidate_replacement_discards_in_progress_filter() {
    let candidates = lists(&["alice", "bob"], &[], &[]);
    let mut st = SearchState::default();
    st.replace_candidates(&candidates);

    let mut log = Vec::new();
    st.input(FieldTag::User, "al", &candidates, &mut recording(&mut log));
    assert_eq!(st.field(FieldTag::User).filtered.len(), 1);

    // A larger list arrives mid-typing: the filtered view reverts to the
    // full new list while the query text stays "al".
    let bigger = lists(&["alice", "bob", "carol", "dave"], &[], &[]);
    st.replace_candidates(&bigger);

    let field = st.field(FieldTag::User);
    assert_eq!(field.query, "al");
    assert_eq!(field.filtered, bigger.user);
    // No parent notification for a replacement.
    assert_eq!(log.len(), 1);
}

#[test]
fn replacement_applies_to_every_field_unconditionally() {
    let candidates = lists(&["alice"], &["org/api"], &["Fix login"]);
    let mut st = SearchState::default();
    let mut log = Vec::new();
    st.input(FieldTag::Repo, "zzz", &candidates, &mut recording(&mut log));
    assert!(st.field(FieldTag::Repo).filtered.is_empty());

    st.replace_candidates(&candidates);
    for tag in FieldTag::ALL {
        assert_eq!(st.field(tag).filtered, candidates.for_tag(tag));
    }
}

#[test]
fn fields_are_independent() {
    let candidates = lists(&["alice"], &["org/api", "org/web"], &[]);
    let mut st = SearchState::default();
    st.replace_candidates(&candidates);

    let mut log = Vec::new();
    st.input(FieldTag::User, "ali", &candidates, &mut recording(&mut log));
    let repo = st.field(FieldTag::Repo);
    assert_eq!(repo.query, "");
    assert_eq!(repo.filtered.len(), 2, "other fields keep their full list");
}

#[test]
fn open_sequence_always_reports_exactly_the_last_tag() {
    let mut st = SearchState::default();
    for &tag in &[
        FieldTag::User,
        FieldTag::Title,
        FieldTag::Title,
        FieldTag::Repo,
    ] {
        st.activate(tag);
        let open: Vec<FieldTag> = FieldTag::ALL
            .into_iter()
            .filter(|&t| st.visibility.is_open(t))
            .collect();
        assert_eq!(open, vec![tag]);
    }
}

#[test]
fn pointer_path_and_activation_path_agree() {
    let layout = BarLayout::new(90);
    let candidates = lists(&["alice"], &[], &[]);

    for tag in FieldTag::ALL {
        let rect = layout.field_rect(tag);

        let mut via_pointer = SearchState::default();
        via_pointer.replace_candidates(&candidates);
        let hit = layout.hit(rect.x + 1, rect.y + 1, None);
        via_pointer.pointer_down(hit, &mut |_, _| {});

        let mut via_activate = SearchState::default();
        via_activate.replace_candidates(&candidates);
        via_activate.activate(tag);

        assert_eq!(
            via_pointer.visibility.open_tag(),
            via_activate.visibility.open_tag()
        );
    }
}

#[test]
fn panel_press_selects_the_pressed_row() {
    let layout = BarLayout::new(90);
    let candidates = lists(&[], &["org/api", "org/infra", "org/web"], &[]);
    let mut st = SearchState::default();
    st.replace_candidates(&candidates);
    st.activate(FieldTag::Repo);

    let repo_rect = layout.field_rect(FieldTag::Repo);
    let open = Some((FieldTag::Repo, 3u16));
    let hit = layout.hit(repo_rect.x + 2, BAR_HEIGHT + 1, open);
    assert_eq!(hit, Hit::Suggestion(FieldTag::Repo, 1));

    let mut log = Vec::new();
    st.pointer_down(hit, &mut recording(&mut log));
    assert_eq!(st.field(FieldTag::Repo).query, "org/infra");
    assert_eq!(st.visibility.open_tag(), None);
}

#[test]
fn out_of_range_suggestion_press_is_ignored() {
    let candidates = lists(&["alice"], &[], &[]);
    let mut st = SearchState::default();
    st.replace_candidates(&candidates);
    st.activate(FieldTag::User);

    let mut log = Vec::new();
    st.pointer_down(Hit::Suggestion(FieldTag::User, 9), &mut recording(&mut log));
    assert_eq!(st.field(FieldTag::User).query, "");
    assert!(log.is_empty());
    // The panel stays open; nothing was committed.
    assert_eq!(st.visibility.open_tag(), Some(FieldTag::User));
}

#[test]
fn filter_identity_and_containment_hold() {
    let candidates: Vec<String> = ["alice", "Bob", "carol"]
        .iter()
        .map(|s| (*s).to_owned())
        .collect();
    assert_eq!(filter_suggestions(&candidates, ""), candidates);
    for result in filter_suggestions(&candidates, "o") {
        assert!(result.to_lowercase().contains('o'));
    }
}
