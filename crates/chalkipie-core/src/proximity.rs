//! Which door the character is standing in front of

use std::collections::BTreeMap;

use crate::config::EngineConfig;

/// Door ids per floor, in slot order
pub type DoorMap = BTreeMap<i32, Vec<String>>;

/// A door within reach of the character
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoorRef {
    pub floor: i32,
    pub slot: usize,
    pub id: String,
}

/// Left edge of door slot `slot` in character coordinates
pub fn slot_left(slot: usize, config: &EngineConfig) -> f64 {
    config.door_first_x + slot as f64 * config.door_spacing
}

/// Level width needed to fit `slots` doors plus a trailing margin
pub fn level_width_for(slots: usize, config: &EngineConfig) -> f64 {
    slot_left(slots, config) + config.door_first_x
}

/// Nearest door on `floor` whose centre is within reach of the character's centre
pub fn nearest_door(doors: &DoorMap, floor: i32, character_x: f64, config: &EngineConfig) -> Option<DoorRef> {
    let centre = character_x + config.character_width() / 2.0;
    doors
        .get(&floor)?
        .iter()
        .enumerate()
        .map(|(slot, id)| {
            let door_centre = slot_left(slot, config) + config.door_width / 2.0;
            (slot, id, (door_centre - centre).abs())
        })
        .filter(|(_, _, distance)| *distance <= config.proximity_radius)
        .min_by(|a, b| a.2.total_cmp(&b.2))
        .map(|(slot, id, _)| DoorRef { floor, slot, id: id.clone() })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doors() -> DoorMap {
        let mut map = DoorMap::new();
        map.insert(1, vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        map.insert(2, vec!["d".to_string()]);
        map
    }

    fn x_facing_slot(slot: usize, config: &EngineConfig) -> f64 {
        slot_left(slot, config) + config.door_width / 2.0 - config.character_width() / 2.0
    }

    #[test]
    fn test_door_in_front_is_found() {
        let config = EngineConfig::default();
        let found = nearest_door(&doors(), 1, x_facing_slot(1, &config), &config).unwrap();
        assert_eq!(found, DoorRef { floor: 1, slot: 1, id: "b".to_string() });
    }

    #[test]
    fn test_out_of_reach_and_unknown_floor() {
        let config = EngineConfig::default();
        let between = (x_facing_slot(0, &config) + x_facing_slot(1, &config)) / 2.0;
        assert_eq!(nearest_door(&doors(), 1, between, &config), None);
        assert_eq!(nearest_door(&doors(), 7, x_facing_slot(0, &config), &config), None);
        assert_eq!(nearest_door(&doors(), 2, x_facing_slot(1, &config), &config), None);
    }

    #[test]
    fn test_level_width_fits_all_slots() {
        let config = EngineConfig::default();
        let width = level_width_for(3, &config);
        assert!(slot_left(2, &config) + config.door_width < width);
    }
}
