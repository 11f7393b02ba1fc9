//! Declarative alias tables and the generic resolver that maps
//! loosely-shaped JSON objects onto the canonical wire shape.
//!
//! The backend speaks camelCase, but payloads built elsewhere (older
//! clients, forms, hand-written JSON) may use snake_case keys or
//! entirely different names such as `workTitle` or `author`. Each
//! entity declares one [`AliasTable`]; [`normalize`] consults it and
//! always emits every canonical key, using `null` when nothing matched.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::CoreError;
use crate::types::JsonObject;

/* --------------------------------------------------------------------------
Table types
-------------------------------------------------------------------------- */

/// One canonical field and the alternative keys it may arrive under.
#[derive(Debug, Clone, Copy)]
pub struct FieldAliases {
    /// Canonical (camelCase) key, always tried first.
    pub canonical: &'static str,
    /// Alternative keys, tried in order after the canonical key.
    pub aliases: &'static [&'static str],
}

/// The ordered set of canonical fields for one entity shape.
#[derive(Debug, Clone, Copy)]
pub struct AliasTable {
    /// Entity name used in log lines and error messages.
    pub entity: &'static str,
    pub fields: &'static [FieldAliases],
}

const fn field(canonical: &'static str, aliases: &'static [&'static str]) -> FieldAliases {
    FieldAliases { canonical, aliases }
}

impl AliasTable {
    /// Canonical keys in emission order.
    pub fn canonical_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.canonical)
    }
}

/* --------------------------------------------------------------------------
Entity tables
-------------------------------------------------------------------------- */

/// Fields the backend accepts on `POST /api/works` and `PUT /api/works/{id}`.
pub const WORK_WRITE: AliasTable = AliasTable {
    entity: "work",
    fields: &[
        field("title", &["workTitle", "work_title"]),
        field("creator", &["author"]),
        field("type", &["workType", "work_type"]),
        field("genre", &[]),
        field("status", &[]),
        field("totalUnits", &["total_units"]),
        field("coverUrl", &["cover_url"]),
        field("startedAt", &["started_at"]),
        field("finishedAt", &["finished_at"]),
    ],
};

/// Work payloads as returned by the backend (summary or detail).
pub const WORK_READ: AliasTable = AliasTable {
    entity: "work",
    fields: &[
        field("id", &["workId", "work_id"]),
        field("title", &["workTitle", "work_title"]),
        field("creator", &["author"]),
        field("type", &["workType", "work_type"]),
        field("genre", &[]),
        field("status", &[]),
        field("totalUnits", &["total_units"]),
        field("coverUrl", &["cover_url"]),
        field("startedAt", &["started_at"]),
        field("finishedAt", &["finished_at"]),
    ],
};

/// Fields the backend accepts when logging or editing a session.
pub const SESSION_WRITE: AliasTable = AliasTable {
    entity: "session",
    fields: &[
        field("workId", &["work_id"]),
        field("startedAt", &["started_at"]),
        field("endedAt", &["ended_at"]),
        field("minutes", &[]),
        field("unitsCompleted", &["units_completed"]),
        field("note", &[]),
    ],
};

pub const SESSION_READ: AliasTable = AliasTable {
    entity: "session",
    fields: &[
        field("id", &["sessionId", "session_id"]),
        field("workId", &["work_id"]),
        field("startedAt", &["started_at"]),
        field("endedAt", &["ended_at"]),
        field("minutes", &[]),
        field("unitsCompleted", &["units_completed"]),
        field("note", &[]),
    ],
};

/// Fields the backend accepts on the review upsert.
pub const REVIEW_WRITE: AliasTable = AliasTable {
    entity: "review",
    fields: &[
        field("workId", &["work_id"]),
        field("rating", &[]),
        field("title", &[]),
        field("body", &[]),
        field("isPrivate", &["is_private", "privateReview", "private_review"]),
    ],
};

/// Review payloads as returned by the backend. The backend serializes the
/// private flag as `privateReview`.
pub const REVIEW_READ: AliasTable = AliasTable {
    entity: "review",
    fields: &[
        field("id", &["reviewId", "review_id"]),
        field("workId", &["work_id"]),
        field("rating", &[]),
        field("title", &[]),
        field("body", &[]),
        field("isPrivate", &["is_private", "privateReview", "private_review"]),
    ],
};

/* --------------------------------------------------------------------------
Resolution
-------------------------------------------------------------------------- */

/// Look up a single canonical field in `input`.
///
/// Tries the canonical key, then each alias in order. The first value that
/// is present and not JSON `null` wins. Returns `None` when no key matched.
pub fn resolve<'a>(input: &'a JsonObject, aliases: &FieldAliases) -> Option<&'a Value> {
    std::iter::once(aliases.canonical)
        .chain(aliases.aliases.iter().copied())
        .filter_map(|key| input.get(key))
        .find(|value| !value.is_null())
}

/// Normalize a loosely-shaped object into the canonical shape of `table`.
///
/// Every canonical key is present in the output; keys that resolved to
/// nothing are emitted as `null`. Keys not named in the table are dropped.
pub fn normalize_object(input: &JsonObject, table: &AliasTable) -> JsonObject {
    table
        .fields
        .iter()
        .map(|f| {
            let value = resolve(input, f).cloned().unwrap_or(Value::Null);
            (f.canonical.to_string(), value)
        })
        .collect()
}

/// Normalize an arbitrary JSON value.
///
/// A missing (`None`) or `null` input is treated as an empty object, which
/// yields every canonical key set to `null`. Any other non-object input is
/// rejected.
pub fn normalize(input: Option<&Value>, table: &AliasTable) -> Result<JsonObject, CoreError> {
    match input {
        None | Some(Value::Null) => Ok(normalize_object(&JsonObject::new(), table)),
        Some(Value::Object(map)) => Ok(normalize_object(map, table)),
        Some(other) => Err(CoreError::Validation(format!(
            "{} payload must be a JSON object, got {}",
            table.entity,
            json_kind(other)
        ))),
    }
}

/// Normalize `input` with `table`, then decode the canonical object into `T`.
///
/// Used on the read side so that DTOs only ever see canonical camelCase keys.
pub fn decode<T: DeserializeOwned>(input: &Value, table: &AliasTable) -> Result<T, CoreError> {
    let canonical = normalize(Some(input), table)?;
    serde_json::from_value(Value::Object(canonical))
        .map_err(|e| CoreError::Validation(format!("Malformed {} payload: {e}", table.entity)))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
