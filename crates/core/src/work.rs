//! Work DTOs: the trackable media items on a user's shelves.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{Date, DbId};

/* --------------------------------------------------------------------------
Enumerations
-------------------------------------------------------------------------- */

/// Kind of media a work represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkType {
    Book,
    Movie,
    Game,
    Other,
}

impl WorkType {
    pub const ALL: [WorkType; 4] = [Self::Book, Self::Movie, Self::Game, Self::Other];

    /// Wire spelling, e.g. `BOOK`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Book => "BOOK",
            Self::Movie => "MOVIE",
            Self::Game => "GAME",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for WorkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkType {
    type Err = CoreError;

    /// Accepts the wire spelling case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid work type '{s}'. Must be one of: BOOK, MOVIE, GAME, OTHER"
                ))
            })
    }
}

/// Where a work sits in the user's library. Each status is one shelf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkStatus {
    ToExplore,
    InProgress,
    Finished,
}

impl WorkStatus {
    /// Shelf order used by the library page.
    pub const ALL: [WorkStatus; 3] = [Self::ToExplore, Self::InProgress, Self::Finished];

    /// Wire spelling, e.g. `IN_PROGRESS`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ToExplore => "TO_EXPLORE",
            Self::InProgress => "IN_PROGRESS",
            Self::Finished => "FINISHED",
        }
    }

    /// Lower-case badge text, e.g. `in progress`.
    pub fn label(self) -> &'static str {
        match self {
            Self::ToExplore => "to explore",
            Self::InProgress => "in progress",
            Self::Finished => "finished",
        }
    }

    /// Heading of the shelf that holds works with this status.
    pub fn shelf_title(self) -> &'static str {
        match self {
            Self::ToExplore => "To Explore",
            Self::InProgress => "In Progress",
            Self::Finished => "Finished",
        }
    }
}

impl fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkStatus {
    type Err = CoreError;

    /// Accepts `IN_PROGRESS`, `in-progress` and `in progress` alike.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid work status '{s}'. Must be one of: TO_EXPLORE, IN_PROGRESS, FINISHED"
                ))
            })
    }
}

/* --------------------------------------------------------------------------
DTOs
-------------------------------------------------------------------------- */

/// A work as returned by `GET /api/works` or `GET /api/works/{id}`.
///
/// List responses only carry the summary fields; the detail-only fields
/// are then `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Work {
    pub id: DbId,
    pub title: Option<String>,
    pub creator: Option<String>,
    #[serde(rename = "type")]
    pub work_type: Option<WorkType>,
    pub genre: Option<String>,
    pub status: Option<WorkStatus>,
    pub total_units: Option<i32>,
    pub cover_url: Option<String>,
    pub started_at: Option<Date>,
    pub finished_at: Option<Date>,
}

impl Work {
    /// Title for display; untitled works render as `Untitled`.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled")
    }

    /// Two-letter upper-case placeholder shown when there is no cover.
    pub fn initials(&self) -> String {
        self.display_title()
            .chars()
            .take(2)
            .collect::<String>()
            .to_uppercase()
    }
}

/// Payload for creating or updating a work.
///
/// Unset fields serialize as `null`; the normalizer guarantees the backend
/// still receives the full key set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkDraft {
    pub title: Option<String>,
    pub creator: Option<String>,
    #[serde(rename = "type")]
    pub work_type: Option<WorkType>,
    pub genre: Option<String>,
    pub status: Option<WorkStatus>,
    pub total_units: Option<i32>,
    pub cover_url: Option<String>,
    pub started_at: Option<Date>,
    pub finished_at: Option<Date>,
}

impl From<&Work> for WorkDraft {
    /// Start an edit from the stored values.
    fn from(work: &Work) -> Self {
        Self {
            title: work.title.clone(),
            creator: work.creator.clone(),
            work_type: work.work_type,
            genre: work.genre.clone(),
            status: work.status,
            total_units: work.total_units,
            cover_url: work.cover_url.clone(),
            started_at: work.started_at,
            finished_at: work.finished_at,
        }
    }
}
