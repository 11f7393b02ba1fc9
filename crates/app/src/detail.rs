//! Work detail page: the work, its sessions and its review.

use shelflife_client::{ApiError, CallContext, ShelfLifeApi};
use shelflife_core::review::Review;
use shelflife_core::session::Session;
use shelflife_core::types::DbId;
use shelflife_core::work::Work;

use crate::mount::{Loadable, View};

#[derive(Debug, Clone, PartialEq)]
pub struct WorkDetail {
    pub work: Work,
    pub sessions: Vec<Session>,
    /// `None` until the user writes a review.
    pub review: Option<Review>,
}

/// `Ready(None)` means the backend had no such work and reported no error.
pub type DetailState = Loadable<Option<WorkDetail>>;

/// Fetch the work, its sessions and its review concurrently.
///
/// All three must succeed; the first failure fails the whole load and the
/// remaining calls are dropped.
pub async fn load_work_detail(
    api: &ShelfLifeApi,
    cx: &CallContext,
    work_id: DbId,
) -> Result<Option<WorkDetail>, ApiError> {
    let (work, sessions, review) = tokio::try_join!(
        api.get_work(cx, work_id),
        api.get_work_sessions(cx, work_id),
        api.get_work_review(cx, work_id),
    )?;

    Ok(work.map(|work| WorkDetail {
        work,
        sessions,
        review,
    }))
}

pub struct WorkDetailPage {
    api: ShelfLifeApi,
    view: View<DetailState>,
    work_id: Option<DbId>,
}

impl WorkDetailPage {
    pub fn new(api: ShelfLifeApi, cx: CallContext) -> Self {
        Self {
            api,
            view: View::new(Loadable::Loading, cx),
            work_id: None,
        }
    }

    /// Show `work_id`. Switching to another work cancels the pending load
    /// of the previous one.
    pub fn show(&mut self, work_id: DbId) {
        self.work_id = Some(work_id);

        let api = self.api.clone();
        self.view.reload(
            |state| *state = Loadable::Loading,
            move |cx| async move { load_work_detail(&api, &cx, work_id).await },
            move |state, result| {
                *state = match result {
                    Ok(detail) => Loadable::Ready(detail),
                    Err(e) => {
                        tracing::warn!(work_id, error = %e, "Failed to load work detail");
                        Loadable::Failed(e.to_string())
                    }
                };
            },
        );
    }

    pub fn work_id(&self) -> Option<DbId> {
        self.work_id
    }

    pub fn unmount(&mut self) {
        self.view.unmount();
    }

    pub async fn settled(&mut self) {
        self.view.settled().await;
    }

    pub fn state(&self) -> DetailState {
        self.view.snapshot()
    }
}
