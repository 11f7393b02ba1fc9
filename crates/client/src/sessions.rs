//! Session accessors: `/api/works/{id}/sessions` and `/api/sessions/{id}`.

use serde::Serialize;
use serde_json::Value;
use shelflife_core::normalize::{SESSION_READ, SESSION_WRITE};
use shelflife_core::session::Session;
use shelflife_core::types::DbId;

use crate::context::CallContext;
use crate::error::ApiError;
use crate::request::{normalize_payload, ShelfLifeApi};
use crate::works::work_path;

fn work_sessions_path(work_id: DbId) -> String {
    format!("{}/sessions", work_path(work_id))
}

fn session_path(session_id: DbId) -> String {
    format!("/api/sessions/{session_id}")
}

impl ShelfLifeApi {
    /// `GET /api/works/{id}/sessions`.
    pub async fn get_work_sessions(
        &self,
        cx: &CallContext,
        work_id: DbId,
    ) -> Result<Vec<Session>, ApiError> {
        let path = work_sessions_path(work_id);
        self.get(cx, &path).await?.into_list(&path, &SESSION_READ)
    }

    /// `POST /api/works/{id}/sessions`.
    ///
    /// When the payload names no work, the work from the path is filled in.
    pub async fn create_session(
        &self,
        cx: &CallContext,
        work_id: DbId,
        payload: &impl Serialize,
    ) -> Result<Option<Session>, ApiError> {
        let path = work_sessions_path(work_id);
        let mut body = normalize_payload(payload, &SESSION_WRITE)?;
        if body.get("workId").map_or(true, Value::is_null) {
            body.insert("workId".to_string(), Value::from(work_id));
        }
        let created: Option<Session> = self
            .post(cx, &path, &Value::Object(body))
            .await?
            .into_saved(&path, &SESSION_READ)?;
        tracing::info!(work_id, session_id = created.as_ref().map(|s| s.id), "Session logged");
        Ok(created)
    }

    /// `PUT /api/sessions/{id}`.
    pub async fn update_session(
        &self,
        cx: &CallContext,
        session_id: DbId,
        payload: &impl Serialize,
    ) -> Result<Option<Session>, ApiError> {
        let path = session_path(session_id);
        let body = Value::Object(normalize_payload(payload, &SESSION_WRITE)?);
        let updated = self.put(cx, &path, &body).await?.into_saved(&path, &SESSION_READ)?;
        tracing::info!(session_id, "Session updated");
        Ok(updated)
    }

    /// `DELETE /api/sessions/{id}`.
    pub async fn delete_session(&self, cx: &CallContext, session_id: DbId) -> Result<(), ApiError> {
        self.delete(cx, &session_path(session_id)).await?;
        tracing::info!(session_id, "Session deleted");
        Ok(())
    }
}
