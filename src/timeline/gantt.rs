//! Plain-text Gantt chart rendering.

use super::Timeline;
use crate::process::Ticks;

const IDLE_LABEL: &str = "idle";

/// Render a timeline as a two-line text Gantt chart.
///
/// ```text
/// | P1 | P2 | P3 |
/// 0    10   15   23
/// ```
///
/// Gaps between intervals are drawn as `idle` cells.
pub fn render_gantt(timeline: &Timeline) -> String {
    if timeline.is_empty() {
        return "(empty timeline)".to_string();
    }

    let mut segments: Vec<(&str, Ticks)> = Vec::with_capacity(timeline.len() * 2);
    let mut cursor: Ticks = 0;
    for interval in timeline {
        if interval.start_time > cursor {
            segments.push((IDLE_LABEL, cursor));
        }
        segments.push((interval.process_id.as_str(), interval.start_time));
        cursor = interval.end_time;
    }

    let mut bars = String::new();
    let mut ticks = String::new();
    for (label, start) in segments {
        let start = start.to_string();
        let width = label.len().max(start.len()) + 2;
        bars.push('|');
        bars.push_str(&format!("{:^width$}", label, width = width));
        ticks.push_str(&format!("{:<width$}", start, width = width + 1));
    }
    bars.push('|');
    ticks.push_str(&cursor.to_string());

    format!("{}\n{}", bars, ticks)
}
