//! Review DTOs. A work has at most one review, and none until the user
//! writes it.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Lowest accepted star rating.
pub const MIN_RATING: i32 = 1;

/// Highest accepted star rating.
pub const MAX_RATING: i32 = 5;

/// A user's review of a work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: DbId,
    pub work_id: Option<DbId>,
    pub rating: Option<i32>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub is_private: Option<bool>,
}

impl Review {
    pub fn is_private(&self) -> bool {
        self.is_private.unwrap_or(false)
    }
}

/// Payload for the review upsert. The server decides between create and
/// update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    pub work_id: Option<DbId>,
    pub rating: Option<i32>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub is_private: Option<bool>,
}

impl From<&Review> for ReviewDraft {
    /// Start an edit from the stored review.
    fn from(review: &Review) -> Self {
        Self {
            work_id: review.work_id,
            rating: review.rating,
            title: review.title.clone(),
            body: review.body.clone(),
            is_private: review.is_private,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::normalize::{decode, REVIEW_READ};

    #[test]
    fn decodes_backend_review_shape() {
        let review: Review = decode(
            &json!({
                "id": 5,
                "workId": 42,
                "rating": 4,
                "title": "Spice must flow",
                "body": "Dense but rewarding.",
                "privateReview": true,
                "createdAt": "2025-03-01T10:00:00Z",
            }),
            &REVIEW_READ,
        )
        .unwrap();

        assert_eq!(review.id, 5);
        assert_eq!(review.rating, Some(4));
        assert!(review.is_private());
    }

    #[test]
    fn private_flag_defaults_to_public() {
        let review: Review = decode(&json!({"id": 1, "rating": 3}), &REVIEW_READ).unwrap();
        assert!(!review.is_private());
    }

    #[test]
    fn draft_from_review_keeps_every_field() {
        let review: Review = decode(
            &json!({"id": 5, "workId": 42, "rating": 4, "title": "T", "body": "B", "privateReview": true}),
            &REVIEW_READ,
        )
        .unwrap();
        let draft = ReviewDraft::from(&review);
        assert_eq!(draft.work_id, Some(42));
        assert_eq!(draft.rating, Some(4));
        assert_eq!(draft.title.as_deref(), Some("T"));
        assert_eq!(draft.body.as_deref(), Some("B"));
        assert_eq!(draft.is_private, Some(true));
    }
}
