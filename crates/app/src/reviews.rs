//! Reviews page: everything the user has rated.

use shelflife_client::{CallContext, ShelfLifeApi};
use shelflife_core::review::Review;

use crate::mount::{Loadable, View};

pub struct ReviewsPage {
    api: ShelfLifeApi,
    view: View<Loadable<Vec<Review>>>,
}

impl ReviewsPage {
    pub fn new(api: ShelfLifeApi, cx: CallContext) -> Self {
        Self {
            api,
            view: View::new(Loadable::Loading, cx),
        }
    }

    pub fn mount(&mut self) {
        let api = self.api.clone();
        self.view.reload(
            |state| *state = Loadable::Loading,
            move |cx| async move { api.list_reviews(&cx).await },
            |state, result| {
                *state = match result {
                    Ok(reviews) => Loadable::Ready(reviews),
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to load reviews");
                        Loadable::Failed(e.to_string())
                    }
                };
            },
        );
    }

    pub async fn settled(&mut self) {
        self.view.settled().await;
    }

    pub fn state(&self) -> Loadable<Vec<Review>> {
        self.view.snapshot()
    }
}
