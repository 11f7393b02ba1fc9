//! Library page: every work, grouped into status shelves.
//!
//! The page starts out showing the sample library. Server data replaces
//! it once loaded; if loading fails the previously shown works stay on
//! screen and the error is surfaced as a warning.

use shelflife_client::{CallContext, ShelfLifeApi};
use shelflife_core::sample::sample_library;
use shelflife_core::shelf::{group_into_shelves, matches_search, Shelf};
use shelflife_core::work::Work;

use crate::mount::View;

/// Warning shown under a load error while fallback data is displayed.
pub const FALLBACK_NOTICE: &str = "Showing sample data while the server is unavailable.";

#[derive(Debug, Clone, PartialEq)]
pub struct LibraryState {
    pub works: Vec<Work>,
    pub loading: bool,
    pub error: Option<String>,
}

impl LibraryState {
    /// Shelves in display order, restricted to works matching `search`.
    pub fn shelves(&self, search: &str) -> Vec<Shelf> {
        let matching: Vec<Work> = self
            .works
            .iter()
            .filter(|w| matches_search(w, search))
            .cloned()
            .collect();
        group_into_shelves(&matching)
    }
}

pub struct LibraryPage {
    api: ShelfLifeApi,
    view: View<LibraryState>,
    sample_only: bool,
}

impl LibraryPage {
    /// `sample_only` keeps the page on sample data and never calls the
    /// backend.
    pub fn new(api: ShelfLifeApi, cx: CallContext, sample_only: bool) -> Self {
        let initial = LibraryState {
            works: sample_library(),
            loading: !sample_only,
            error: None,
        };
        Self {
            api,
            view: View::new(initial, cx),
            sample_only,
        }
    }

    /// Load the library from the backend.
    pub fn mount(&mut self) {
        if self.sample_only {
            self.view.unmount();
            self.view.update(|state| {
                state.loading = false;
                state.error = None;
            });
            return;
        }

        let api = self.api.clone();
        self.view.reload(
            |state| {
                state.loading = true;
                state.error = None;
            },
            move |cx| async move { api.list_works(&cx).await },
            |state, result| {
                match result {
                    Ok(works) => {
                        tracing::info!(count = works.len(), "Library loaded from server");
                        state.works = works;
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to load works, keeping previous data");
                        state.error = Some(e.to_string());
                    }
                }
                state.loading = false;
            },
        );
    }

    pub fn unmount(&mut self) {
        self.view.unmount();
    }

    pub async fn settled(&mut self) {
        self.view.settled().await;
    }

    pub fn state(&self) -> LibraryState {
        self.view.snapshot()
    }
}
