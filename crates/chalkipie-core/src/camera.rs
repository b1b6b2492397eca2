//! Keeps the character centred: page scroll vertically, facade scroll
//! horizontally. Runs inside the same tick as the physics.

use tracing::trace;

use crate::config::EngineConfig;

/// Scroll and size readings taken by the view right before the tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Window inner height
    pub height: f64,
    /// Current page scroll offset
    pub scroll_y: f64,
    /// Page y of the level's top edge
    pub level_top: f64,
    /// Distance from the facade's scroll origin to character x = 0
    pub origin_left: f64,
    /// Visible width of the horizontally scrolling facade
    pub container_width: f64,
    pub scroll_left: f64,
    /// Width available to the character right of x = 0
    pub level_width: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            height: 900.0,
            scroll_y: 0.0,
            level_top: 0.0,
            origin_left: 0.0,
            container_width: 1440.0,
            scroll_left: 0.0,
            level_width: 5000.0,
        }
    }
}

/// Scroll positions to apply this frame; None leaves the axis alone
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollCommand {
    pub scroll_y: Option<f64>,
    pub scroll_left: Option<f64>,
}

/// Page scroll that puts the character's centre mid-screen (minus the bias)
pub fn target_scroll_y(character_y: f64, viewport: &Viewport, config: &EngineConfig) -> f64 {
    let absolute_y = viewport.level_top + character_y;
    absolute_y + config.character_height() / 2.0 - (viewport.height + config.header_height) / 2.0 - config.vertical_bias
}

/// Facade scroll that centres the character horizontally
pub fn target_scroll_x(character_x: f64, viewport: &Viewport, config: &EngineConfig) -> f64 {
    viewport.origin_left + character_x - viewport.container_width / 2.0 + config.character_width() / 2.0
}

/// Vertical jumps straight to the target; horizontal eases towards it
pub fn follow(character_x: f64, character_y: f64, viewport: &Viewport, config: &EngineConfig) -> ScrollCommand {
    let mut command = ScrollCommand::default();

    let target_y = target_scroll_y(character_y, viewport, config).max(0.0);
    if (viewport.scroll_y - target_y).abs() > config.scroll_threshold_y {
        trace!(from = viewport.scroll_y, to = target_y, "page scroll");
        command.scroll_y = Some(target_y);
    }

    let target_x = target_scroll_x(character_x, viewport, config);
    if target_x <= 0.0 {
        if viewport.scroll_left != 0.0 {
            command.scroll_left = Some(0.0);
        }
    } else {
        let delta = target_x - viewport.scroll_left;
        if delta.abs() > config.scroll_threshold_x {
            command.scroll_left = Some(viewport.scroll_left + delta * config.scroll_damping);
        }
    }

    command
}
