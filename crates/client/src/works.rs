//! Work accessors: `/api/works` and `/api/works/{id}`.

use serde::Serialize;
use serde_json::Value;
use shelflife_core::normalize::{WORK_READ, WORK_WRITE};
use shelflife_core::types::DbId;
use shelflife_core::work::Work;

use crate::context::CallContext;
use crate::error::ApiError;
use crate::request::{normalize_payload, ShelfLifeApi};

pub(crate) const WORKS_PATH: &str = "/api/works";

pub(crate) fn work_path(work_id: DbId) -> String {
    format!("{WORKS_PATH}/{work_id}")
}

impl ShelfLifeApi {
    /// `GET /api/works` -- every work in the library.
    pub async fn list_works(&self, cx: &CallContext) -> Result<Vec<Work>, ApiError> {
        let works: Vec<Work> = self.get(cx, WORKS_PATH).await?.into_list(WORKS_PATH, &WORK_READ)?;
        tracing::debug!(count = works.len(), "Loaded works");
        Ok(works)
    }

    /// `GET /api/works/{id}`. `None` when the server answers with no
    /// content.
    pub async fn get_work(&self, cx: &CallContext, work_id: DbId) -> Result<Option<Work>, ApiError> {
        let path = work_path(work_id);
        self.get(cx, &path).await?.into_one(&path, &WORK_READ)
    }

    /// `POST /api/works` with the payload normalized to the work shape.
    pub async fn create_work(
        &self,
        cx: &CallContext,
        payload: &impl Serialize,
    ) -> Result<Option<Work>, ApiError> {
        let body = Value::Object(normalize_payload(payload, &WORK_WRITE)?);
        let created: Option<Work> = self
            .post(cx, WORKS_PATH, &body)
            .await?
            .into_saved(WORKS_PATH, &WORK_READ)?;
        tracing::info!(work_id = created.as_ref().map(|w| w.id), "Work created");
        Ok(created)
    }

    /// `PUT /api/works/{id}` with the payload normalized to the work shape.
    pub async fn update_work(
        &self,
        cx: &CallContext,
        work_id: DbId,
        payload: &impl Serialize,
    ) -> Result<Option<Work>, ApiError> {
        let path = work_path(work_id);
        let body = Value::Object(normalize_payload(payload, &WORK_WRITE)?);
        let updated = self.put(cx, &path, &body).await?.into_saved(&path, &WORK_READ)?;
        tracing::info!(work_id, "Work updated");
        Ok(updated)
    }

    /// `DELETE /api/works/{id}`.
    pub async fn delete_work(&self, cx: &CallContext, work_id: DbId) -> Result<(), ApiError> {
        self.delete(cx, &work_path(work_id)).await?;
        tracing::info!(work_id, "Work deleted");
        Ok(())
    }
}
