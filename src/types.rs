use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::search::FieldTag;

// ---------------------------------------------------------------------------
// Board data
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrState {
    #[default]
    Open,
    Merged,
    Closed,
}

/// A pull request row as served by the engine.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    /// Author login.
    pub author: String,
    /// Full repository name, e.g. `"owner/repo"`.
    pub repo: String,
    #[serde(default)]
    pub state: PrState,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Candidate lists
// ---------------------------------------------------------------------------

/// The authoritative suggestion pools, one per search field. Owned by the
/// board view; the search widget only ever holds the most recent snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateLists {
    pub user: Vec<String>,
    pub repo: Vec<String>,
    pub title: Vec<String>,
}

impl CandidateLists {
    /// Derive the three pools from a board: distinct authors, distinct
    /// repository names, and titles, each sorted.
    pub fn from_board(prs: &[PullRequest]) -> Self {
        let mut user: Vec<String> = prs.iter().map(|pr| pr.author.clone()).collect();
        user.sort();
        user.dedup();

        let mut repo: Vec<String> = prs.iter().map(|pr| pr.repo.clone()).collect();
        repo.sort();
        repo.dedup();

        let mut title: Vec<String> = prs.iter().map(|pr| pr.title.clone()).collect();
        title.sort();
        title.dedup();

        Self { user, repo, title }
    }

    pub fn for_tag(&self, tag: FieldTag) -> &[String] {
        match tag {
            FieldTag::User => &self.user,
            FieldTag::Repo => &self.repo,
            FieldTag::Title => &self.title,
        }
    }
}
