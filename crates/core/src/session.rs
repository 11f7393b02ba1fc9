//! Session DTOs: single logged units of engagement with a work.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// A logged session as returned by `GET /api/works/{id}/sessions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: DbId,
    pub work_id: Option<DbId>,
    pub started_at: Option<Timestamp>,
    pub ended_at: Option<Timestamp>,
    pub minutes: Option<i32>,
    pub units_completed: Option<i32>,
    pub note: Option<String>,
}

/// Payload for logging or editing a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDraft {
    pub work_id: Option<DbId>,
    pub started_at: Option<Timestamp>,
    pub ended_at: Option<Timestamp>,
    pub minutes: Option<i32>,
    pub units_completed: Option<i32>,
    pub note: Option<String>,
}

impl From<&Session> for SessionDraft {
    fn from(session: &Session) -> Self {
        Self {
            work_id: session.work_id,
            started_at: session.started_at,
            ended_at: session.ended_at,
            minutes: session.minutes,
            units_completed: session.units_completed,
            note: session.note.clone(),
        }
    }
}
