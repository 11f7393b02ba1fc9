//! Review accessors: `/api/works/{id}/review`, `/api/reviews`.
//!
//! A work has no review until the user writes one. The backend reports
//! that with 404 (or an empty success); both come back as `Ok(None)`.

use serde::Serialize;
use serde_json::Value;
use shelflife_core::normalize::{REVIEW_READ, REVIEW_WRITE};
use shelflife_core::review::Review;
use shelflife_core::types::DbId;

use crate::context::CallContext;
use crate::error::ApiError;
use crate::request::{normalize_payload, ShelfLifeApi};
use crate::works::work_path;

const REVIEWS_PATH: &str = "/api/reviews";

fn work_review_path(work_id: DbId) -> String {
    format!("{}/review", work_path(work_id))
}

impl ShelfLifeApi {
    /// `GET /api/works/{id}/review`. A 404 means "no review yet".
    pub async fn get_work_review(
        &self,
        cx: &CallContext,
        work_id: DbId,
    ) -> Result<Option<Review>, ApiError> {
        let path = work_review_path(work_id);
        match self.get(cx, &path).await {
            Ok(payload) => payload.into_one(&path, &REVIEW_READ),
            Err(e) if e.is_not_found() => {
                tracing::debug!(work_id, "No review yet");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// `POST /api/works/{id}/review` -- create or replace the work's review.
    ///
    /// When the payload names no work, the work from the path is filled in.
    pub async fn upsert_review(
        &self,
        cx: &CallContext,
        work_id: DbId,
        payload: &impl Serialize,
    ) -> Result<Option<Review>, ApiError> {
        let path = work_review_path(work_id);
        let mut body = normalize_payload(payload, &REVIEW_WRITE)?;
        if body.get("workId").map_or(true, Value::is_null) {
            body.insert("workId".to_string(), Value::from(work_id));
        }
        let saved: Option<Review> = self
            .post(cx, &path, &Value::Object(body))
            .await?
            .into_saved(&path, &REVIEW_READ)?;
        tracing::info!(work_id, "Review saved");
        Ok(saved)
    }

    /// `DELETE /api/reviews/{id}`.
    pub async fn delete_review(&self, cx: &CallContext, review_id: DbId) -> Result<(), ApiError> {
        self.delete(cx, &format!("{REVIEWS_PATH}/{review_id}")).await?;
        tracing::info!(review_id, "Review deleted");
        Ok(())
    }

    /// `GET /api/reviews` -- every review the user has written.
    pub async fn list_reviews(&self, cx: &CallContext) -> Result<Vec<Review>, ApiError> {
        self.get(cx, REVIEWS_PATH).await?.into_list(REVIEWS_PATH, &REVIEW_READ)
    }
}
