//! History chart series.
//!
//! A chart needs at least two committed snapshots; with fewer the board
//! shows a hint to save instead.

use serde::{Deserialize, Serialize};

use ragerank_core::model::{ColorTag, TeacherId, TeacherRecord};

/// Minimum number of snapshots for a chart to be drawn.
pub const MIN_CHART_POINTS: usize = 2;

/// One plotted snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPoint {
    /// Axis label, `dd/mm`.
    pub label: String,
    /// Tooltip title, full date and time (UTC).
    pub title: String,
    pub score: u32,
}

/// A teacher's committed-score timeline, ready to plot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySeries {
    pub teacher: TeacherId,
    pub color: ColorTag,
    pub points: Vec<HistoryPoint>,
}

impl HistorySeries {
    pub fn from_record(record: &TeacherRecord) -> Self {
        let points = record
            .history
            .iter()
            .map(|entry| HistoryPoint {
                label: entry.timestamp.format("%d/%m").to_string(),
                title: entry.timestamp.format("%d/%m/%Y %H:%M:%S").to_string(),
                score: entry.score,
            })
            .collect();
        Self {
            teacher: record.id,
            color: record.color,
            points,
        }
    }

    pub fn is_drawable(&self) -> bool {
        self.points.len() >= MIN_CHART_POINTS
    }

    pub fn max_score(&self) -> u32 {
        self.points.iter().map(|p| p.score).max().unwrap_or(0)
    }

    /// Filled line chart as an inline SVG, y axis starting at zero.
    ///
    /// Returns `None` when there are too few points to draw a line.
    pub fn sparkline_svg(&self, width: u32, height: u32) -> Option<String> {
        if !self.is_drawable() {
            return None;
        }

        let pad = 2.0;
        let w = f64::from(width) - 2.0 * pad;
        let h = f64::from(height) - 2.0 * pad;
        let top = f64::from(self.max_score().max(1));
        let step = w / (self.points.len() - 1) as f64;

        let coords: Vec<(f64, f64)> = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let x = pad + step * i as f64;
                let y = pad + h - (f64::from(p.score) / top) * h;
                (x, y)
            })
            .collect();

        let line = coords
            .iter()
            .map(|(x, y)| format!("{x:.1},{y:.1}"))
            .collect::<Vec<_>>()
            .join(" ");
        let baseline = pad + h;
        let area = format!(
            "{:.1},{baseline:.1} {line} {:.1},{baseline:.1}",
            coords[0].0,
            coords[coords.len() - 1].0
        );
        let color = self.color.hex();

        let mut svg = format!(
            "<svg class=\"sparkline\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\" xmlns=\"http://www.w3.org/2000/svg\">\n"
        );
        svg.push_str(&format!(
            "  <polygon points=\"{area}\" fill=\"{color}\" fill-opacity=\"0.2\"/>\n"
        ));
        svg.push_str(&format!(
            "  <polyline points=\"{line}\" fill=\"none\" stroke=\"{color}\" stroke-width=\"2\"/>\n"
        ));
        for ((x, y), point) in coords.iter().zip(&self.points) {
            svg.push_str(&format!(
                "  <circle cx=\"{x:.1}\" cy=\"{y:.1}\" r=\"2\" fill=\"{color}\"><title>{}: {}</title></circle>\n",
                point.title, point.score
            ));
        }
        svg.push_str("</svg>\n");
        Some(svg)
    }
}
