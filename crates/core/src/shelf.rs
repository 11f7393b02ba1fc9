//! Grouping of works into status shelves for the library page.

use crate::work::{Work, WorkStatus};

/// One shelf of the library: every work sharing a status.
#[derive(Debug, Clone, PartialEq)]
pub struct Shelf {
    pub status: WorkStatus,
    pub works: Vec<Work>,
}

impl Shelf {
    pub fn title(&self) -> &'static str {
        self.status.shelf_title()
    }

    /// Kebab-case slug, e.g. `in-progress`.
    pub fn slug(&self) -> String {
        self.status.as_str().to_lowercase().replace('_', "-")
    }
}

/// Split `works` into the three shelves in display order (To Explore,
/// In Progress, Finished). Works without a status appear on no shelf.
pub fn group_into_shelves(works: &[Work]) -> Vec<Shelf> {
    WorkStatus::ALL
        .into_iter()
        .map(|status| Shelf {
            status,
            works: works
                .iter()
                .filter(|w| w.status == Some(status))
                .cloned()
                .collect(),
        })
        .collect()
}

/// Case-insensitive substring match on title or creator. A blank query
/// matches everything.
pub fn matches_search(work: &Work, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    [work.title.as_deref(), work.creator.as_deref()]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
}
