//! Built-in sample library shown before (or instead of) server data.

use crate::types::DbId;
use crate::work::{Work, WorkStatus, WorkType};

const SAMPLES: &[(DbId, &str, &str, WorkType, &str, WorkStatus)] = &[
    (1, "Project Hail Mary", "Andy Weir", WorkType::Book, "Science Fiction", WorkStatus::Finished),
    (2, "Atomic Habits", "James Clear", WorkType::Book, "Self-Help", WorkStatus::InProgress),
    (3, "Arrival", "Denis Villeneuve", WorkType::Movie, "Science Fiction", WorkStatus::ToExplore),
    (4, "The New Couple in 5B", "Lisa Unger", WorkType::Book, "Thriller", WorkStatus::Finished),
    (5, "You Are Fatally Invited", "Ande Pileggi", WorkType::Book, "Mystery/Thriller", WorkStatus::Finished),
    (6, "The Night We Lost Him", "Laura Dave", WorkType::Book, "Suspense", WorkStatus::Finished),
    (7, "These Toxic Things", "Rachel Howzell Hall", WorkType::Book, "Thriller", WorkStatus::Finished),
    (8, "The Last Lie Told", "Debra Webb", WorkType::Book, "Thriller", WorkStatus::Finished),
    (9, "Sonic the Hedgehog", "Jeff Fowler", WorkType::Movie, "Family/Adventure", WorkStatus::Finished),
    (10, "Sonic the Hedgehog 2", "Jeff Fowler", WorkType::Movie, "Family/Adventure", WorkStatus::Finished),
    (11, "Sonic the Hedgehog 3", "Jeff Fowler", WorkType::Movie, "Family/Adventure", WorkStatus::Finished),
];

/// The sample works, as summary DTOs.
pub fn sample_library() -> Vec<Work> {
    SAMPLES
        .iter()
        .map(|&(id, title, creator, work_type, genre, status)| Work {
            id,
            title: Some(title.to_string()),
            creator: Some(creator.to_string()),
            work_type: Some(work_type),
            genre: Some(genre.to_string()),
            status: Some(status),
            total_units: None,
            cover_url: None,
            started_at: None,
            finished_at: None,
        })
        .collect()
}
