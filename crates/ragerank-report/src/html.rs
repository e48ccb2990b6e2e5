//! HTML leaderboard generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::Result;
use std::path::Path;

use ragerank_core::model::Collection;
use ragerank_core::ranking::{standings, Standing};

use crate::chart::HistorySeries;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate the leaderboard page for a collection.
pub fn generate_html(collection: &Collection) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>ragerank leaderboard</title>\n");
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str("<header>\n");
    html.push_str("<h1>ragerank</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">{} teacher(s) | ranked by saved score</p>\n",
        collection.len()
    ));
    html.push_str("</header>\n");

    html.push_str("<main id=\"teacher-list\">\n");
    if collection.is_empty() {
        html.push_str("<div class=\"empty-state\">\n");
        html.push_str("<div class=\"empty-icon\">🎓</div>\n");
        html.push_str("<h2>No teachers yet</h2>\n");
        html.push_str("<p>Add your first teacher with <code>ragerank add</code>.</p>\n");
        html.push_str("</div>\n");
    } else {
        for standing in standings(collection) {
            // Standings are derived from the same collection.
            if let Ok(record) = collection.get(standing.id) {
                html.push_str(&card(&standing, &HistorySeries::from_record(record)));
            }
        }
    }
    html.push_str("</main>\n");

    html.push_str("</body>\n</html>");
    html
}

fn card(standing: &Standing, series: &HistorySeries) -> String {
    let color = standing.color.hex();
    let mut html = format!(
        "<article class=\"teacher-card\" data-teacher-id=\"{}\" style=\"--card-color: {color}\">\n",
        standing.id
    );

    if standing.medal.is_podium() {
        html.push_str(&format!(
            "<div class=\"medal {}\">{}</div>\n",
            standing.medal,
            standing.medal.emoji()
        ));
    }

    html.push_str(&format!(
        "<div class=\"teacher-info\"><h3>{}</h3><p>{}</p></div>\n",
        html_escape(&standing.name),
        html_escape(&standing.subject)
    ));
    html.push_str(&format!(
        "<div class=\"score-display\"><span class=\"score-label\">RAGE SCORE</span>\
         <span class=\"score-value\" style=\"color: {color}\">{}</span>\
         <span class=\"rank\">#{}</span></div>\n",
        standing.pending_score,
        standing.rank + 1
    ));

    match series.sparkline_svg(240, 60) {
        Some(svg) => {
            html.push_str("<div class=\"chart-container has-chart\">\n");
            html.push_str(&svg);
            html.push_str("</div>\n");
        }
        None => html.push_str(
            "<div class=\"chart-container\"><p class=\"hint\">Save a score to see the chart</p></div>\n",
        ),
    }

    let (class, label) = if standing.dirty {
        ("unsaved", format!("Unsaved changes (saved: {})", standing.committed_score))
    } else {
        ("saved", "Saved".to_string())
    };
    html.push_str(&format!("<p class=\"save-state {class}\">{label}</p>\n"));

    html.push_str("</article>\n");
    html
}

/// Write the leaderboard page to a file.
pub fn write_html_report(collection: &Collection, path: &Path) -> Result<()> {
    let html = generate_html(collection);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --muted: #6b7280; --border: #e5e7eb; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --muted: #9ca3af; --border: #374151; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
.meta, .hint { color: var(--muted); }
#teacher-list { display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 1rem; }
.teacher-card { position: relative; border: 2px solid var(--card-color); border-radius: 12px; padding: 1rem; }
.medal { position: absolute; top: -0.8rem; right: -0.8rem; font-size: 1.8rem; }
.teacher-info h3 { margin: 0; }
.teacher-info p { margin: 0.2rem 0 0; color: var(--muted); }
.score-display { display: flex; align-items: baseline; gap: 0.6rem; margin: 1rem 0; }
.score-label { font-size: 0.7rem; letter-spacing: 0.1em; color: var(--muted); }
.score-value { font-size: 2rem; font-weight: bold; }
.rank { margin-left: auto; color: var(--muted); }
.chart-container { min-height: 60px; display: flex; align-items: center; justify-content: center; }
.save-state { margin: 0.5rem 0 0; font-size: 0.85rem; }
.save-state.unsaved { font-weight: bold; color: var(--card-color); }
.empty-state { text-align: center; grid-column: 1 / -1; }
.empty-icon { font-size: 3rem; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use ragerank_core::model::{ColorTag, HistoryEntry, TeacherId, TeacherRecord};
    use uuid::Uuid;

    fn make_collection() -> Collection {
        let at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let mut leader = TeacherRecord::seeded(
            TeacherId::new(Uuid::from_u128(1)),
            "M. Dupont",
            "Mathématiques",
            ColorTag::Red,
            42,
            at,
        );
        leader.history.push_back(HistoryEntry {
            timestamp: at + chrono::Duration::days(1),
            score: 45,
        });
        leader.committed_score = 45;
        leader.pending_score = 47;

        let other = TeacherRecord::seeded(
            TeacherId::new(Uuid::from_u128(2)),
            "<script>alert(1)</script>",
            "Arts & Crafts",
            ColorTag::Blue,
            3,
            at,
        );
        Collection::from_records(vec![other, leader])
    }

    #[test]
    fn html_report_contains_required_elements() {
        let html = generate_html(&make_collection());

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("M. Dupont"));
        assert!(html.contains("🥇"));
        assert!(html.contains("🥈"));
        assert!(html.contains("Unsaved changes (saved: 45)"));
        assert!(html.contains("<svg class=\"sparkline\""));
        assert!(html.contains("Save a score to see the chart"));
    }

    #[test]
    fn cards_follow_saved_score_order() {
        let html = generate_html(&make_collection());
        let leader = html.find("M. Dupont").unwrap();
        let other = html.find("Arts &amp; Crafts").unwrap();
        assert!(leader < other);
    }

    #[test]
    fn user_text_is_escaped() {
        let html = generate_html(&make_collection());
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn empty_collection_shows_empty_state() {
        let html = generate_html(&Collection::new());
        assert!(html.contains("empty-state"));
        assert!(!html.contains("teacher-card\""));
    }

    #[test]
    fn html_report_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/board.html");

        write_html_report(&make_collection(), &path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}
