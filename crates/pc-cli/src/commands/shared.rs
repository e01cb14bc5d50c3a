use pc_core::Point;
use pc_history::HistoryError;
use serde::Serialize;

use crate::output::TableRow;

/// One history entry as printed by `check`, `history` and `watch`.
#[derive(Debug, Serialize)]
pub struct HistoryRow {
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub result: bool,
    pub check_time: String,
    pub exec_time: Option<f64>,
}

impl From<&Point> for HistoryRow {
    fn from(point: &Point) -> Self {
        Self {
            x: point.x,
            y: point.y,
            r: point.r,
            result: point.result,
            check_time: point.formatted_date.clone(),
            exec_time: point.exec_time,
        }
    }
}

impl TableRow for HistoryRow {
    const HEADERS: &'static [&'static str] = &["x", "y", "r", "result", "time", "exec ms"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.x.to_string(),
            self.y.to_string(),
            self.r.to_string(),
            if self.result { "hit" } else { "miss" }.to_string(),
            self.check_time.clone(),
            self.exec_time
                .map_or_else(|| "-".to_string(), |seconds| format!("{:.1}", seconds * 1000.0)),
        ]
    }
}

pub fn rows(points: &[Point]) -> Vec<HistoryRow> {
    points.iter().map(HistoryRow::from).collect()
}

/// Keep the typed error in the chain, lead with the readable message.
pub fn history_error(error: HistoryError) -> anyhow::Error {
    let message = error.user_message();
    anyhow::Error::new(error).context(message)
}
