use crate::types::PullRequest;

// ---------------------------------------------------------------------------
// Suggestion filtering
// ---------------------------------------------------------------------------

/// Filter a candidate list by a query string (case-insensitive substring
/// match). An empty query returns the candidates verbatim; matches keep
/// their original relative order.
pub fn filter_suggestions(candidates: &[String], query: &str) -> Vec<String> {
    if query.is_empty() {
        return candidates.to_vec();
    }
    let lower = query.to_lowercase();
    candidates
        .iter()
        .filter(|c| c.to_lowercase().contains(&lower))
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Board filtering
// ---------------------------------------------------------------------------

/// The three raw search texts, as last reported by the search bar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardQuery {
    pub user: String,
    pub repo: String,
    pub title: String,
}

impl BoardQuery {
    pub fn is_empty(&self) -> bool {
        self.user.is_empty() && self.repo.is_empty() && self.title.is_empty()
    }
}

/// Filter board rows by the three field queries, conjunctively.
/// Each non-empty query must match its field case-insensitively as a
/// substring. Returns indices of matching PRs.
pub fn filter_board(prs: &[PullRequest], query: &BoardQuery) -> Vec<usize> {
    if query.is_empty() {
        return (0..prs.len()).collect();
    }
    let user = query.user.to_lowercase();
    let repo = query.repo.to_lowercase();
    let title = query.title.to_lowercase();
    prs.iter()
        .enumerate()
        .filter(|(_, pr)| {
            (user.is_empty() || pr.author.to_lowercase().contains(&user))
                && (repo.is_empty() || pr.repo.to_lowercase().contains(&repo))
                && (title.is_empty() || pr.title.to_lowercase().contains(&title))
        })
        .map(|(i, _)| i)
        .collect()
}
