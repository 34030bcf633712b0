use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A timed announcement with an optional expiry and an open-ended category.
///
/// Categories are plain strings on purpose: new ones appear in form payloads
/// without a schema change and render without an icon until someone adds one
/// to the ticker table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: i64,
    pub title: String,
    pub message: String,
    pub posted_by: String,
    pub class: String,
    pub category: String,
    pub date: DateTime<Utc>,
    pub expiry: Option<DateTime<Utc>>,
    pub image: Option<String>,
}

/// Raw form payload for posting a notice. Every field the form may leave
/// blank is optional here; defaulting happens once, in [`NoticeDraft::from_request`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoticeRequest {
    pub title: Option<String>,
    pub message: Option<String>,
    pub posted_by: String,
    pub class: Option<String>,
    pub category: Option<String>,
    /// Calendar date; the notice stops showing once this day has passed.
    pub expiry: Option<NaiveDate>,
    pub image: Option<String>,
}

/// Fully-defaulted notice ready for the store, which assigns `id` and `date`.
#[derive(Debug, Clone)]
pub struct NoticeDraft {
    pub title: String,
    pub message: String,
    pub posted_by: String,
    pub class: String,
    pub category: String,
    pub expiry: Option<DateTime<Utc>>,
    pub image: Option<String>,
}

impl NoticeDraft {
    pub fn from_request(request: CreateNoticeRequest) -> Self {
        Self {
            title: non_empty_or(request.title, "Untitled"),
            message: request.message.unwrap_or_default(),
            posted_by: request.posted_by,
            class: non_empty_or(request.class, "All Classes"),
            category: non_empty_or(request.category, "News"),
            // Expiry arrives as a bare date; it is compared against full
            // timestamps, so it becomes midnight UTC of that day.
            expiry: request
                .expiry
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc()),
            image: request.image,
        }
    }
}

fn non_empty_or(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => default.to_string(),
    }
}

/// The one visibility predicate shared by the public grid, the management
/// list and the export engine. A notice is visible iff it has not expired
/// and it matches the category filter ("All" matches everything; anything
/// else is an exact string comparison).
pub fn filter_visible<'a>(
    notices: &'a [Notice],
    category: &str,
    now: DateTime<Utc>,
) -> Vec<&'a Notice> {
    notices
        .iter()
        .filter(|notice| match notice.expiry {
            Some(expiry) => expiry >= now,
            None => true,
        })
        .filter(|notice| category == "All" || notice.category == category)
        .collect()
}

/// Management-view ordering: most recent first. The public grid keeps the
/// feed order and never calls this.
pub fn sort_newest_first(notices: &mut [&Notice]) {
    notices.sort_by(|a, b| b.date.cmp(&a.date));
}
