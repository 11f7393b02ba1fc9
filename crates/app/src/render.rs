//! Plain-text rendering of the pages for the terminal.

use shelflife_core::review::Review;
use shelflife_core::session::Session;
use shelflife_core::shelf::Shelf;
use shelflife_core::work::Work;

use crate::detail::{DetailState, WorkDetail};
use crate::library::{LibraryState, FALLBACK_NOTICE};
use crate::mount::Loadable;

const BACK_TO_LIBRARY: &str = "← Back to Library (shelflife library)";

/// Library page: header, load status, then one block per shelf.
pub fn render_library(state: &LibraryState, search: &str) -> String {
    let mut lines = vec![
        "My Library".to_string(),
        "Your current reads, future picks, and finished stories.".to_string(),
        String::new(),
    ];

    if state.loading {
        lines.push("Loading your library from the server…".to_string());
        lines.push(String::new());
    }

    if let Some(error) = &state.error {
        lines.push(format!("! {error}"));
        lines.push(format!("! {FALLBACK_NOTICE}"));
        lines.push(String::new());
    }

    if !search.trim().is_empty() {
        lines.push(format!("Search: \"{}\"", search.trim()));
        lines.push(String::new());
    }

    for shelf in state.shelves(search) {
        lines.extend(render_shelf(&shelf));
        lines.push(String::new());
    }

    finish(lines)
}

fn render_shelf(shelf: &Shelf) -> Vec<String> {
    let mut lines = vec![format!("== {} ({}) ==", shelf.title(), shelf.works.len())];
    if shelf.works.is_empty() {
        lines.push("  Nothing here yet. Add something to your library.".to_string());
    } else {
        lines.extend(shelf.works.iter().map(|w| format!("  {}", work_card(w))));
    }
    lines
}

/// One-line card: id, cover placeholder, title, creator and badges.
pub fn work_card(work: &Work) -> String {
    let mut card = format!("#{} ({}) {}", work.id, work.initials(), work.display_title());
    if let Some(creator) = &work.creator {
        card.push_str(&format!(" - {creator}"));
    }
    let badges = badges(work);
    if !badges.is_empty() {
        card.push(' ');
        card.push_str(&badges);
    }
    card
}

fn badges(work: &Work) -> String {
    [
        work.work_type.map(|t| t.to_string()),
        work.genre.clone(),
        work.status.map(|s| s.label().to_string()),
    ]
    .into_iter()
    .flatten()
    .map(|b| format!("[{b}]"))
    .collect::<Vec<_>>()
    .join(" ")
}

/// Work detail page in each of its states.
pub fn render_detail(state: &DetailState) -> String {
    match state {
        Loadable::Loading => "Loading work details…".to_string(),
        Loadable::Failed(message) => finish(vec![
            message.clone(),
            "This work might have been removed or is temporarily unavailable.".to_string(),
            BACK_TO_LIBRARY.to_string(),
        ]),
        Loadable::Ready(None) => finish(vec![
            "Work not found".to_string(),
            "We couldn't find this work in your library.".to_string(),
            BACK_TO_LIBRARY.to_string(),
        ]),
        Loadable::Ready(Some(detail)) => render_work_detail(detail),
    }
}

fn render_work_detail(detail: &WorkDetail) -> String {
    let work = &detail.work;
    let mut lines = vec![
        work.display_title().to_string(),
        format!(
            "{} • {}",
            work.creator.as_deref().unwrap_or("Unknown creator"),
            work.work_type.map_or("WORK", |t| t.as_str())
        ),
    ];

    match &work.cover_url {
        Some(url) => lines.push(format!("Cover: {url}")),
        None => lines.push(format!("Cover: ({})", work.initials())),
    }

    let badges = badges(work);
    if !badges.is_empty() {
        lines.push(badges);
    }
    if let Some(units) = work.total_units {
        lines.push(format!("Total units: {units}"));
    }
    if let Some(started) = work.started_at {
        lines.push(format!("Started: {started}"));
    }
    if let Some(finished) = work.finished_at {
        lines.push(format!("Finished: {finished}"));
    }

    lines.push(String::new());
    lines.extend(render_sessions(&detail.sessions));
    lines.push(String::new());
    lines.extend(render_review(detail.review.as_ref()));
    lines.push(String::new());
    lines.push(BACK_TO_LIBRARY.to_string());

    finish(lines)
}

fn render_sessions(sessions: &[Session]) -> Vec<String> {
    let summary = match sessions.len() {
        0 => "No sessions logged yet.".to_string(),
        1 => "1 session logged.".to_string(),
        n => format!("{n} sessions logged."),
    };
    let mut lines = vec!["Sessions".to_string(), summary];

    for session in sessions {
        let mut line = format!("  - #{}", session.id);
        if let Some(started) = session.started_at {
            line.push_str(&format!(" {}", started.format("%Y-%m-%d %H:%M UTC")));
        }
        if let Some(minutes) = session.minutes {
            line.push_str(&format!("  {minutes} min"));
        }
        if let Some(units) = session.units_completed {
            line.push_str(&format!("  {units} units"));
        }
        lines.push(line);
        if let Some(note) = session.note.as_deref().filter(|n| !n.is_empty()) {
            lines.push(format!("    {note}"));
        }
    }
    lines
}

fn render_review(review: Option<&Review>) -> Vec<String> {
    let Some(review) = review else {
        return vec![
            "Review".to_string(),
            "You haven't added a review yet.".to_string(),
        ];
    };

    let mut lines = vec![
        "Review".to_string(),
        "Your thoughts on this work.".to_string(),
    ];
    if let Some(rating) = review.rating {
        lines.push(format!("  {rating} ★"));
    }
    if let Some(title) = &review.title {
        lines.push(format!("  {title}"));
    }
    if let Some(body) = &review.body {
        lines.push(format!("  {body}"));
    }
    if review.is_private() {
        lines.push("  🔒 Private".to_string());
    }
    lines
}

/// Reviews page.
pub fn render_reviews(state: &Loadable<Vec<Review>>) -> String {
    let mut lines = vec!["My reviews".to_string(), String::new()];
    match state {
        Loadable::Loading => lines.push("Loading your reviews…".to_string()),
        Loadable::Failed(message) => lines.push(format!("! {message}")),
        Loadable::Ready(reviews) if reviews.is_empty() => {
            lines.push("You haven't reviewed anything yet.".to_string());
        }
        Loadable::Ready(reviews) => {
            for review in reviews {
                let work = review
                    .work_id
                    .map_or_else(|| "?".to_string(), |id| id.to_string());
                let rating = review
                    .rating
                    .map_or_else(|| "-".to_string(), |r| format!("{r} ★"));
                let mut line = format!("#{} work #{work}  {rating}", review.id);
                if let Some(title) = &review.title {
                    line.push_str(&format!("  {title}"));
                }
                if review.is_private() {
                    line.push_str("  🔒");
                }
                lines.push(line);
            }
        }
    }
    finish(lines)
}

fn finish(mut lines: Vec<String>) -> String {
    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines.join("\n")
}
