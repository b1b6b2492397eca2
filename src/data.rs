//! The bundled door catalogue

use chalkipie_core::door::{self, Door};
use web_sys::console;

const CATALOGUE: &str = include_str!("../assets/doors.json");

/// Parse the bundled catalogue; an unreadable catalogue shows an empty hotel
pub fn load_catalogue() -> Vec<Door> {
    match door::parse_doors(CATALOGUE) {
        Ok(doors) => {
            console::log_1(&format!("data: loaded {} doors", doors.len()).into());
            doors
        }
        Err(e) => {
            console::error_1(&format!("data: door catalogue rejected: {}", e).into());
            Vec::new()
        }
    }
}
