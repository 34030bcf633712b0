//! HTML fragment builders for the three notice surfaces. Pure functions over
//! a notice slice; the handlers in `web` fetch the feed and hand it over.

use chrono::{DateTime, Utc};

use crate::domain::{filter_visible, sort_newest_first, Notice};

/// How many notices the top-of-page ticker shows.
const TICKER_LIMIT: usize = 4;

/// Category icons for the ticker. Categories are an open set: anything not
/// listed here renders with the bare label.
const CATEGORY_ICONS: &[(&str, &str)] = &[
    ("Urgent", "⚠️"),
    ("Events", "📅"),
    ("News", "📰"),
    ("Nationalism", "🇬🇭"),
    ("Godliness", "🙏"),
    ("Integrity", "💎"),
    ("Excellence", "🏆"),
    ("Service", "🤝"),
    ("Attitude", "😊"),
    ("Spelling", "📚"),
    ("Intelligence", "🧠"),
    ("Write", "✍️"),
];

fn category_icon(category: &str) -> &'static str {
    CATEGORY_ICONS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, icon)| *icon)
        .unwrap_or("")
}

/// Public grid cards: visible notices in feed order.
pub fn render_public_grid(notices: &[Notice], category: &str, now: DateTime<Utc>) -> String {
    let visible = filter_visible(notices, category, now);

    if visible.is_empty() {
        return "<p>No notices in this category.</p>".to_string();
    }

    let mut html = String::new();
    for notice in visible {
        html.push_str(r#"<div class="notice-card">"#);
        html.push_str(&format!("<h4>{}</h4>", notice.title));
        html.push_str(&format!("<p>{}</p>", notice.message));
        if let Some(image) = &notice.image {
            html.push_str(&format!(
                r#"<img src="{}" alt="Notice image" class="notice-image">"#,
                image
            ));
        }
        html.push_str(&format!(
            r#"<div class="notice-meta"><span>{}</span><span>{}</span></div>"#,
            notice.category,
            notice.date.format("%B %d, %Y")
        ));
        html.push_str("</div>");
    }
    html
}

/// Management list: visible notices newest first, with poster, class, expiry
/// and a delete button carrying the notice id.
pub fn render_management_list(notices: &[Notice], now: DateTime<Utc>) -> String {
    let mut visible = filter_visible(notices, "All", now);

    if visible.is_empty() {
        return "<p>No notices posted yet.</p>".to_string();
    }

    sort_newest_first(&mut visible);

    let mut html = String::new();
    for notice in visible {
        html.push_str(r#"<div class="notice-item">"#);
        html.push_str(&format!(
            "<h4>{} <small>— {} — {}</small></h4>",
            notice.title, notice.class, notice.category
        ));
        html.push_str(&format!("<p>{}</p>", notice.message));
        if let Some(image) = &notice.image {
            html.push_str(&format!(
                r#"<img src="{}" alt="Notice image" class="notice-image">"#,
                image
            ));
        }
        html.push_str(r#"<div class="notice-meta">"#);
        html.push_str(&format!("<span>Posted by: {}</span>", notice.posted_by));
        html.push_str(&format!(
            "<span>on {}</span>",
            notice.date.format("%B %d, %Y")
        ));
        if let Some(expiry) = notice.expiry {
            html.push_str(&format!(
                "<span>🕗 Expires: {}</span>",
                expiry.format("%B %d, %Y")
            ));
        }
        html.push_str(&format!(
            r#"<button class="btn-delete" data-id="{}">Delete</button>"#,
            notice.id
        ));
        html.push_str("</div></div>");
    }
    html
}

/// Top-of-page ticker: the first four notices of the raw feed, category
/// filter and expiry notwithstanding.
pub fn render_ticker(notices: &[Notice]) -> String {
    let mut html = String::new();
    for notice in notices.iter().take(TICKER_LIMIT) {
        let icon = category_icon(&notice.category);
        let label = if icon.is_empty() {
            notice.category.clone()
        } else {
            format!("{} {}", icon, notice.category)
        };
        html.push_str(&format!(
            r#"<div class="notice-item {}"><span>{}:</span> {}</div>"#,
            notice.category.to_lowercase(),
            label,
            notice.title
        ));
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn notice(id: i64, category: &str, expiry: Option<DateTime<Utc>>) -> Notice {
        Notice {
            id,
            title: format!("Notice {}", id),
            message: "message".to_string(),
            posted_by: "Head Teacher".to_string(),
            class: "All Classes".to_string(),
            category: category.to_string(),
            date: Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap() + chrono::Duration::hours(id),
            expiry,
            image: None,
        }
    }

    #[test]
    fn empty_grid_renders_placeholder() {
        let now = Utc::now();
        assert_eq!(
            render_public_grid(&[], "All", now),
            "<p>No notices in this category.</p>"
        );
    }

    #[test]
    fn grid_placeholder_when_category_has_no_match() {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
        let notices = vec![notice(1, "News", None)];
        assert_eq!(
            render_public_grid(&notices, "Events", now),
            "<p>No notices in this category.</p>"
        );
    }

    #[test]
    fn grid_keeps_feed_order() {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
        let notices = vec![notice(2, "News", None), notice(1, "News", None)];
        let html = render_public_grid(&notices, "All", now);
        let first = html.find("Notice 2").unwrap();
        let second = html.find("Notice 1").unwrap();
        assert!(first < second);
    }

    #[test]
    fn management_list_placeholder_wording() {
        let now = Utc::now();
        assert_eq!(
            render_management_list(&[], now),
            "<p>No notices posted yet.</p>"
        );
    }

    #[test]
    fn management_list_is_newest_first_with_delete_ids() {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
        let notices = vec![notice(1, "News", None), notice(2, "News", None)];
        let html = render_management_list(&notices, now);
        assert!(html.find("Notice 2").unwrap() < html.find("Notice 1").unwrap());
        assert!(html.contains(r#"data-id="1""#));
        assert!(html.contains(r#"data-id="2""#));
        assert!(html.contains("Posted by: Head Teacher"));
    }

    #[test]
    fn management_list_hides_expired_notices() {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
        let notices = vec![notice(1, "News", Some(now - chrono::Duration::days(1)))];
        assert_eq!(
            render_management_list(&notices, now),
            "<p>No notices posted yet.</p>"
        );
    }

    #[test]
    fn ticker_caps_at_four_in_feed_order() {
        let notices: Vec<Notice> = (1..=6).map(|id| notice(id, "News", None)).collect();
        let html = render_ticker(&notices);
        assert_eq!(html.matches("notice-item").count(), 4);
        assert!(html.contains("Notice 1"));
        assert!(html.contains("Notice 4"));
        assert!(!html.contains("Notice 5"));
    }

    #[test]
    fn ticker_ignores_expiry_and_category() {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
        let notices = vec![notice(1, "Urgent", Some(now - chrono::Duration::days(7)))];
        let html = render_ticker(&notices);
        assert!(html.contains("Notice 1"));
    }

    #[test]
    fn unlisted_category_renders_without_icon() {
        let notices = vec![notice(1, "Robotics", None)];
        let html = render_ticker(&notices);
        assert!(html.contains("<span>Robotics:</span>"));

        let notices = vec![notice(2, "Urgent", None)];
        let html = render_ticker(&notices);
        assert!(html.contains("⚠️ Urgent"));
    }
}
