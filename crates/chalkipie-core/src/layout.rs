//! Floor geometry for the hotel facade
//!
//! Floors are stored ascending but drawn top-down: the highest floor number
//! occupies row 0, directly under the header. Floor lines are the bottom edge
//! of each row, measured from the top of the level.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;

/// Distinct floor numbers, always sorted ascending
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<i32>", into = "Vec<i32>")]
pub struct FloorSet(Vec<i32>);

impl From<Vec<i32>> for FloorSet {
    fn from(mut floors: Vec<i32>) -> Self {
        floors.sort_unstable();
        floors.dedup();
        Self(floors)
    }
}

impl From<FloorSet> for Vec<i32> {
    fn from(floors: FloorSet) -> Self {
        floors.0
    }
}

impl FromIterator<i32> for FloorSet {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl FloorSet {
    pub fn as_slice(&self) -> &[i32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, floor: i32) -> bool {
        self.0.binary_search(&floor).is_ok()
    }

    pub fn lowest(&self) -> Option<i32> {
        self.0.first().copied()
    }

    pub fn highest(&self) -> Option<i32> {
        self.0.last().copied()
    }

    /// Visual row of `floor`, counting from the top of the facade
    pub fn row_from_top(&self, floor: i32) -> Option<usize> {
        let index = self.0.binary_search(&floor).ok()?;
        Some(self.0.len() - 1 - index)
    }

    /// Floor drawn in visual row `row` (0 = top)
    pub fn floor_at_row(&self, row: usize) -> Option<i32> {
        let index = self.0.len().checked_sub(row.checked_add(1)?)?;
        self.0.get(index).copied()
    }

    /// Next floor number above `floor`, if any
    pub fn above(&self, floor: i32) -> Option<i32> {
        self.0.iter().copied().find(|&f| f > floor)
    }

    /// Next floor number below `floor`, if any
    pub fn below(&self, floor: i32) -> Option<i32> {
        self.0.iter().rev().copied().find(|&f| f < floor)
    }

    /// Floors in drawing order, top row first
    pub fn top_down(&self) -> impl Iterator<Item = i32> + '_ {
        self.0.iter().rev().copied()
    }
}

/// Pixel metrics needed to place floors and the character's feet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub floor_height: f64,
    pub header_height: f64,
    pub feet_offset: f64,
}

impl From<&EngineConfig> for Metrics {
    fn from(config: &EngineConfig) -> Self {
        Self {
            floor_height: config.floor_height,
            header_height: config.header_height,
            feet_offset: config.feet_offset(),
        }
    }
}

/// y of the floor line `floor` stands on
pub fn floor_top_y(floors: &FloorSet, floor: i32, floor_height: f64, header_height: f64) -> Option<f64> {
    let row = floors.row_from_top(floor)?;
    Some(header_height + (row as f64 + 1.0) * floor_height)
}

/// Anchor y of a character standing on `floor`
pub fn ground_y(floors: &FloorSet, floor: i32, metrics: &Metrics) -> Option<f64> {
    floor_top_y(floors, floor, metrics.floor_height, metrics.header_height).map(|line| line - metrics.feet_offset)
}

/// Floor whose line sits at `relative_line_y` (measured below the header).
///
/// Lines above the first row count as the top floor; lines past the last row
/// are "no floor".
pub fn floor_line_to_floor(floors: &FloorSet, relative_line_y: f64, floor_height: f64) -> Option<i32> {
    if floors.is_empty() || !relative_line_y.is_finite() || floor_height <= 0.0 {
        return None;
    }
    let row = ((relative_line_y / floor_height).round() - 1.0).max(0.0) as usize;
    floors.floor_at_row(row)
}

/// Header plus every floor row
pub fn total_level_height(floors: &FloorSet, metrics: &Metrics) -> f64 {
    metrics.header_height + floors.len() as f64 * metrics.floor_height
}

/// Top of the row `floor` is drawn in, for the presentation layer
pub fn row_top_y(floors: &FloorSet, floor: i32, metrics: &Metrics) -> Option<f64> {
    let row = floors.row_from_top(floor)?;
    Some(metrics.header_height + row as f64 * metrics.floor_height)
}
