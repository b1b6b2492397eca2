//! Door records and the per-term, per-floor views of them

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DataError;
use crate::layout::FloorSet;
use crate::proximity::DoorMap;

fn default_owner() -> String {
    "Anonymous".to_string()
}

/// A photographed door
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Door {
    pub id: String,
    pub door_number: u32,
    pub image_url: String,
    /// e.g. "AY24/25"
    pub academic_year: String,
    /// 1 or 2
    pub semester: u8,
    pub floor: i32,
    pub created_at: DateTime<Utc>,
    #[serde(default = "default_owner")]
    pub name_of_owner: String,
    /// e.g. "processing", "completed"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// e.g. "normal", "pretty", "ugly"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl Door {
    pub fn term(&self) -> AcademicTerm {
        AcademicTerm {
            academic_year: self.academic_year.clone(),
            semester: self.semester,
        }
    }
}

/// Academic year plus semester
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicTerm {
    pub academic_year: String,
    pub semester: u8,
}

impl AcademicTerm {
    /// e.g. "AY24/25 Sem 1"
    pub fn display_name(&self) -> String {
        format!("{} Sem {}", self.academic_year, self.semester)
    }

    /// Stable key for `<select>` values
    pub fn key(&self) -> String {
        format!("{}-{}", self.academic_year, self.semester)
    }
}

/// Parse and sanity-check a door catalogue
pub fn parse_doors(json: &str) -> Result<Vec<Door>, DataError> {
    let doors: Vec<Door> = serde_json::from_str(json)?;
    if let Some(bad) = doors.iter().find(|d| d.floor <= 0) {
        return Err(DataError::InvalidFloor { id: bad.id.clone(), floor: bad.floor });
    }
    Ok(doors)
}

/// Distinct terms, newest first
pub fn terms(doors: &[Door]) -> Vec<AcademicTerm> {
    let mut terms: Vec<AcademicTerm> = doors.iter().map(Door::term).collect();
    terms.sort_unstable_by(|a, b| b.cmp(a));
    terms.dedup();
    terms
}

/// Floors that have at least one door in `term`
pub fn floors_for_term(doors: &[Door], term: &AcademicTerm) -> FloorSet {
    doors.iter().filter(|d| &d.term() == term).map(|d| d.floor).collect()
}

/// Doors of `term` grouped by floor, each floor sorted by door number
pub fn doors_by_floor(doors: &[Door], term: &AcademicTerm) -> BTreeMap<i32, Vec<Door>> {
    let mut grouped: BTreeMap<i32, Vec<Door>> = BTreeMap::new();
    for door in doors.iter().filter(|d| &d.term() == term) {
        grouped.entry(door.floor).or_default().push(door.clone());
    }
    for floor_doors in grouped.values_mut() {
        floor_doors.sort_by_key(|d| d.door_number);
    }
    grouped
}

/// Door ids per floor, in the same slot order as [`doors_by_floor`]
pub fn door_map(grouped: &BTreeMap<i32, Vec<Door>>) -> DoorMap {
    grouped
        .iter()
        .map(|(floor, doors)| (*floor, doors.iter().map(|d| d.id.clone()).collect()))
        .collect()
}
