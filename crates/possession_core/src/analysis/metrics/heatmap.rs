//! # Heatmap Occupancy
//!
//! Time a player spends in each cell of a grid laid over the pitch. This is the
//! data behind a positional heatmap; drawing it is left to the caller.
//!
//! Coordinates are centered (origin at the center spot). Positions beyond the
//! touchlines fall into the nearest edge cell.

use serde::{Deserialize, Serialize};

use crate::config::PitchConfig;
use crate::error::{AnalysisError, Result};
use crate::model::{EntityId, Point};
use crate::timeline::MatchTimeline;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heatmap {
    pub entity: EntityId,
    pub cols: usize,
    pub rows: usize,
    /// Row-major sample counts, `rows * cols` cells; row 0 is the lowest y
    pub counts: Vec<u32>,
    /// Samples without a position for `entity`
    pub untracked: u32,
}

impl Heatmap {
    pub fn tracked(&self) -> u32 {
        self.counts.iter().sum()
    }

    pub fn count_at(&self, col: usize, row: usize) -> u32 {
        self.counts[row * self.cols + col]
    }

    /// Share of tracked samples per cell, in `[0, 1]`.
    pub fn density(&self) -> Vec<f64> {
        let total = self.tracked();
        self.counts
            .iter()
            .map(|&c| if total == 0 { 0.0 } else { c as f64 / total as f64 })
            .collect()
    }

    /// Occupancy spread: Shannon entropy of the cell counts, normalized to
    /// `[0, 1]` by the entropy of a uniform spread over all cells.
    pub fn spread(&self) -> f64 {
        shannon_entropy_normalized(&self.counts, self.counts.len())
    }
}

/// Normalized Shannon entropy of a count distribution.
pub fn shannon_entropy_normalized(counts: &[u32], max_categories: usize) -> f64 {
    let total: u64 = counts.iter().map(|&c| c as u64).sum();
    if total == 0 {
        return 0.0;
    }

    let mut entropy = 0.0f64;
    for &count in counts {
        if count > 0 {
            let p = count as f64 / total as f64;
            entropy -= p * p.log2();
        }
    }

    let max_entropy = (max_categories as f64).log2();
    if max_entropy > 0.0 {
        entropy / max_entropy
    } else {
        0.0
    }
}

fn axis_cell(v: f64, extent: f64, cells: usize) -> usize {
    let frac = (v + extent / 2.0) / extent;
    let idx = (frac * cells as f64).floor();
    if idx.is_nan() || idx < 0.0 {
        0
    } else {
        (idx as usize).min(cells.saturating_sub(1))
    }
}

/// Grid cell `(col, row)` of a position.
pub fn cell_of(pos: &Point, pitch: &PitchConfig) -> (usize, usize) {
    (
        axis_cell(pos.x, pitch.length, pitch.heatmap_cols),
        axis_cell(pos.y, pitch.width, pitch.heatmap_rows),
    )
}

/// # Errors
/// `UnknownEntity` for a player off the roster; `InvalidConfig` for a grid
/// without cells.
pub fn player_heatmap(timeline: &MatchTimeline, entity: EntityId, pitch: &PitchConfig) -> Result<Heatmap> {
    let slot = timeline.slot_of(entity)?;
    let (cols, rows) = (pitch.heatmap_cols, pitch.heatmap_rows);
    if cols == 0 || rows == 0 {
        return Err(AnalysisError::InvalidConfig {
            reason: format!("heatmap grid {} x {} has no cells", cols, rows),
        });
    }
    let mut counts = vec![0u32; cols * rows];
    let mut untracked = 0u32;

    for sample in timeline.samples() {
        match sample.positions[slot] {
            Some(pos) => {
                let (col, row) = cell_of(&pos, pitch);
                counts[row * cols + col] += 1;
            }
            None => untracked += 1,
        }
    }

    Ok(Heatmap {
        entity,
        cols,
        rows,
        counts,
        untracked,
    })
}
