use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::types::{PrState, PullRequest};

use super::interface::{Engine, EngineHandle, Event, Request};

/// An engine that serves a pre-loaded board without any network calls.
///
/// The board comes either from a JSON fixture file or from the built-in demo
/// data. This is the only engine: network transport is out of scope for this
/// tool, so the data source is always local.
pub struct FixtureEngine {
    pub prs: Vec<PullRequest>,
}

impl Engine for FixtureEngine {
    fn start(self) -> EngineHandle {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<Request>();
        std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().expect("fixture tokio runtime");
            rt.block_on(self.run_loop(rx));
        });
        EngineHandle::new(tx)
    }
}

impl FixtureEngine {
    /// Load a board from a JSON file: an array of pull requests.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading fixture {}", path.display()))?;
        let prs: Vec<PullRequest> = serde_json::from_str(&contents)
            .with_context(|| format!("parsing fixture JSON from {}", path.display()))?;
        Ok(Self { prs })
    }

    /// Built-in demo board, used when no fixture is configured.
    pub fn demo() -> Self {
        let now = Utc::now();
        let pr = |number, author: &str, repo: &str, title: &str, state, hours_ago| PullRequest {
            number,
            title: title.to_owned(),
            author: author.to_owned(),
            repo: repo.to_owned(),
            state,
            updated_at: now - Duration::hours(hours_ago),
        };
        let open = PrState::Open;
        Self {
            prs: vec![
                pr(412, "mgarcia", "acme/platform", "Add retry budget to the sync queue", open, 2),
                pr(409, "tchen", "acme/platform", "Fix pagination cursor on the audit log", open, 5),
                pr(408, "mgarcia", "acme/web", "Migrate settings page to the new form kit", open, 9),
                pr(405, "jokinen", "acme/web", "Drop the legacy session cookie fallback", PrState::Merged, 26),
                pr(398, "priyak", "acme/infra", "Bump the staging cluster to three nodes", open, 31),
                pr(396, "tchen", "acme/infra", "Rotate the artifact registry credentials", PrState::Closed, 50),
                pr(391, "jokinen", "acme/platform", "Speed up cold start by caching the schema", open, 74),
                pr(388, "priyak", "acme/web", "Fix focus ring on the review dialog", PrState::Merged, 120),
            ],
        }
    }

    async fn run_loop(self, mut rx: UnboundedReceiver<Request>) {
        while let Some(req) = rx.recv().await {
            match req {
                Request::FetchBoard { reply_tx } => {
                    tracing::debug!(count = self.prs.len(), "serving board fixture");
                    let _ = reply_tx.send(Event::BoardFetched {
                        prs: self.prs.clone(),
                    });
                }
                Request::Shutdown => break,
            }
        }
    }
}
