//! Sink for returned rate rows. Holds the latest successful result until the
//! next successful query replaces it; no merging, no paging.

use crate::api::models::RateRow;

#[derive(Debug, Default)]
pub struct ResultView {
    rows: Vec<RateRow>,
}

impl ResultView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the displayed rows wholesale.
    pub fn update(&mut self, rows: Vec<RateRow>) {
        self.rows = rows;
    }

    pub fn rows(&self) -> &[RateRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
