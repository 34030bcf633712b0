//! Printable notice document: a pure layout pass over an already-filtered
//! notice subset. Geometry is expressed in the same abstract units the
//! original print stylesheet used, so page breaks are deterministic and
//! checkable from block heights alone.

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::Notice;

const TITLE_ADVANCE: f32 = 8.0;
const META_ADVANCE: f32 = 6.0;
const LINE_ADVANCE: f32 = 6.0;
const BLOCK_GAP: f32 = 10.0;

#[derive(Debug, Clone)]
pub struct PageGeometry {
    /// Cursor position of the first block on page one, below the header.
    pub body_top: f32,
    /// Cursor reset position on continuation pages.
    pub page_top: f32,
    /// A block whose cursor has reached this line opens a new page.
    pub break_threshold: f32,
    /// Message word-wrap width, in characters.
    pub wrap_width: usize,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            body_top: 50.0,
            page_top: 20.0,
            break_threshold: 250.0,
            wrap_width: 90,
        }
    }
}

/// One notice rendered to lines, height not yet placed on a page.
#[derive(Debug, Clone)]
pub struct NoticeBlock {
    pub title_line: String,
    pub meta_line: String,
    pub body_lines: Vec<String>,
}

impl NoticeBlock {
    pub fn from_notice(notice: &Notice, geometry: &PageGeometry) -> Self {
        Self {
            title_line: format!("{} [{}]", notice.title, notice.category),
            meta_line: format!(
                "Posted: {} | By: {}",
                notice.date.format("%Y-%m-%d"),
                notice.posted_by
            ),
            body_lines: wrap_words(&notice.message, geometry.wrap_width),
        }
    }

    pub fn height(&self) -> f32 {
        TITLE_ADVANCE + META_ADVANCE + self.body_lines.len() as f32 * LINE_ADVANCE + BLOCK_GAP
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub page: usize,
    pub y: f32,
}

/// Walks a vertical cursor down the page for each block height in order.
/// A block that would start at or past the bottom threshold moves to the
/// top of a fresh page first.
pub fn place_blocks(heights: &[f32], geometry: &PageGeometry) -> Vec<Placement> {
    let mut placements = Vec::with_capacity(heights.len());
    let mut page = 0usize;
    let mut cursor = geometry.body_top;

    for &height in heights {
        if cursor >= geometry.break_threshold {
            page += 1;
            cursor = geometry.page_top;
        }
        placements.push(Placement { page, y: cursor });
        cursor += height;
    }

    placements
}

/// Greedy word wrap to a fixed character width. Words longer than the width
/// get a line of their own rather than being split.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// `<shortName>_<category>_Notices_<YYYY-MM-DD>.pdf`. No randomness, so the
/// name is stable for a given category and day.
pub fn export_filename(short_name: &str, category: &str, date: NaiveDate) -> String {
    format!(
        "{}_{}_Notices_{}.pdf",
        short_name,
        category,
        date.format("%Y-%m-%d")
    )
}

#[derive(Debug, Clone)]
pub struct ExportDocument {
    pub filename: String,
    pub header_title: String,
    pub generated_line: String,
    pub pages: Vec<Vec<NoticeBlock>>,
}

/// Lays out the (pre-filtered) notices into pages. The caller is expected to
/// have run the shared visibility filter already; this function only renders
/// and paginates.
pub fn build_document(
    school_name: &str,
    short_name: &str,
    category: &str,
    notices: &[&Notice],
    generated_at: DateTime<Utc>,
    geometry: &PageGeometry,
) -> ExportDocument {
    let blocks: Vec<NoticeBlock> = notices
        .iter()
        .map(|n| NoticeBlock::from_notice(n, geometry))
        .collect();
    let heights: Vec<f32> = blocks.iter().map(NoticeBlock::height).collect();
    let placements = place_blocks(&heights, geometry);

    let page_count = placements.last().map(|p| p.page + 1).unwrap_or(1);
    let mut pages: Vec<Vec<NoticeBlock>> = vec![Vec::new(); page_count];
    for (block, placement) in blocks.into_iter().zip(placements) {
        pages[placement.page].push(block);
    }

    ExportDocument {
        filename: export_filename(short_name, category, generated_at.date_naive()),
        header_title: format!("{} — {} Notices", school_name, category),
        generated_line: format!("Generated on: {}", generated_at.format("%Y-%m-%d %H:%M:%S UTC")),
        pages,
    }
}

impl ExportDocument {
    /// Plain-text rendering, one form feed between pages. The download
    /// endpoint ships this as the attachment body.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.header_title);
        out.push('\n');
        out.push_str(&self.generated_line);
        out.push_str("\n\n");

        for (index, page) in self.pages.iter().enumerate() {
            if index > 0 {
                out.push('\x0c');
            }
            for block in page {
                out.push_str(&block.title_line);
                out.push('\n');
                out.push_str(&block.meta_line);
                out.push('\n');
                for line in &block.body_lines {
                    out.push_str(line);
                    out.push('\n');
                }
                out.push('\n');
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn three_tall_blocks_break_before_the_third() {
        // 250 usable units after a 50-unit header: blocks at 50 and 150 fit,
        // the third would start at the threshold and opens page two.
        let geometry = PageGeometry {
            body_top: 50.0,
            page_top: 20.0,
            break_threshold: 250.0,
            wrap_width: 90,
        };
        let placements = place_blocks(&[100.0, 100.0, 100.0], &geometry);

        assert_eq!(
            placements,
            vec![
                Placement { page: 0, y: 50.0 },
                Placement { page: 0, y: 150.0 },
                Placement { page: 1, y: 20.0 },
            ]
        );
    }

    #[test]
    fn short_blocks_stay_on_one_page() {
        let geometry = PageGeometry::default();
        let placements = place_blocks(&[30.0, 30.0, 30.0], &geometry);
        assert!(placements.iter().all(|p| p.page == 0));
        assert_eq!(placements[2].y, 110.0);
    }

    #[test]
    fn no_blocks_means_one_empty_page() {
        let doc = build_document(
            "Ebegrace Zion Academy",
            "EbegraceZion",
            "All",
            &[],
            Utc.with_ymd_and_hms(2024, 6, 10, 9, 30, 0).unwrap(),
            &PageGeometry::default(),
        );
        assert_eq!(doc.pages.len(), 1);
        assert!(doc.pages[0].is_empty());
        assert!(doc.to_text().starts_with("Ebegrace Zion Academy — All Notices"));
    }

    #[test]
    fn wrap_respects_width_and_keeps_long_words_whole() {
        let lines = wrap_words("alpha beta gamma delta", 11);
        assert_eq!(lines, vec!["alpha beta", "gamma delta"]);

        let lines = wrap_words("supercalifragilistic word", 10);
        assert_eq!(lines, vec!["supercalifragilistic", "word"]);
    }

    #[test]
    fn filename_is_deterministic() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        assert_eq!(
            export_filename("EbegraceZion", "Urgent", date),
            "EbegraceZion_Urgent_Notices_2024-06-10.pdf"
        );
    }

    #[test]
    fn block_height_tracks_wrapped_lines() {
        let notice = Notice {
            id: 1,
            title: "PTA Meeting".to_string(),
            message: "one two three four five six seven eight nine ten".to_string(),
            posted_by: "Head Teacher".to_string(),
            class: "All Classes".to_string(),
            category: "Events".to_string(),
            date: Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap(),
            expiry: None,
            image: None,
        };
        let geometry = PageGeometry {
            wrap_width: 20,
            ..PageGeometry::default()
        };
        let block = NoticeBlock::from_notice(&notice, &geometry);

        // 8 title + 6 meta + 6 per wrapped line + 10 gap
        assert_eq!(block.body_lines.len(), 3);
        assert_eq!(block.height(), 8.0 + 6.0 + 3.0 * 6.0 + 10.0);
        assert_eq!(block.title_line, "PTA Meeting [Events]");
        assert_eq!(block.meta_line, "Posted: 2024-06-01 | By: Head Teacher");
    }
}
