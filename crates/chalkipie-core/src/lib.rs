//! Chalkipie core: floor layout, character physics, lift riding, camera
//! follow and the door catalogue. No browser types live here.

pub mod camera;
pub mod character;
pub mod config;
pub mod door;
pub mod easing;
pub mod engine;
pub mod error;
pub mod input;
pub mod layout;
pub mod lift;
pub mod physics;
pub mod proximity;

pub use camera::{ScrollCommand, Viewport};
pub use character::{AnimationState, RenderSnapshot};
pub use config::{EngineConfig, LiftMotion};
pub use door::{AcademicTerm, Door};
pub use engine::{Engine, EngineEvent, Frame};
pub use error::{ConfigError, DataError};
pub use input::{Control, InputEvents, InputState};
pub use layout::FloorSet;
pub use lift::LiftSignal;
pub use proximity::{DoorMap, DoorRef};
