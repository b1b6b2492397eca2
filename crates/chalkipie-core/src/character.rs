//! Character state owned by the engine, and the snapshot handed to the view

/// Position or velocity in level coordinates (pixels)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

/// Who is moving the character
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Normal platforming physics
    #[default]
    Free,
    /// Carried by the lift; y follows the ride curve
    Riding,
}

/// Sprite pose
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnimationState {
    #[default]
    Idle,
    Running,
    Jumping,
    Falling,
}

impl AnimationState {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Idle => "is-idle",
            Self::Running => "is-running",
            Self::Jumping => "is-jumping",
            Self::Falling => "is-falling",
        }
    }
}

/// Simulation state of the character
#[derive(Clone, Debug, PartialEq)]
pub struct CharacterState {
    /// Top-left anchor
    pub pos: Vec2,
    pub vel: Vec2,
    pub is_grounded: bool,
    /// 0 on the ground, 1 after a jump, 2 after the double jump
    pub jumps_used: u8,
    pub facing_right: bool,
    pub mode: Mode,
    /// Frames left during which floor lines are ignored (drop-through)
    pub ignore_collision_frames: u32,
    /// Floor the engine believes the character stands on; None until placed
    pub current_floor: Option<i32>,
    pub visible: bool,
}

impl CharacterState {
    pub fn new(x: f64) -> Self {
        Self {
            pos: Vec2::new(x, 0.0),
            vel: Vec2::zero(),
            is_grounded: false,
            jumps_used: 0,
            facing_right: true,
            mode: Mode::Free,
            ignore_collision_frames: 0,
            current_floor: None,
            visible: true,
        }
    }

    pub fn is_riding(&self) -> bool {
        self.mode == Mode::Riding
    }

    /// Stand on a floor line at anchor `y`
    pub fn land(&mut self, y: f64) {
        self.pos.y = y;
        self.vel.y = 0.0;
        self.is_grounded = true;
        self.jumps_used = 0;
    }

    pub fn animation(&self) -> AnimationState {
        if self.is_riding() {
            AnimationState::Idle
        } else if !self.is_grounded {
            if self.vel.y < 0.0 {
                AnimationState::Jumping
            } else {
                AnimationState::Falling
            }
        } else if self.vel.x.abs() > 0.5 {
            AnimationState::Running
        } else {
            AnimationState::Idle
        }
    }
}

/// Plain data the presentation layer applies each frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RenderSnapshot {
    pub x: f64,
    pub y: f64,
    pub facing_right: bool,
    pub animation: AnimationState,
    pub visible: bool,
    pub riding: bool,
    /// Standing still inside the shaft: show the up/down hint
    pub show_shaft_controls: bool,
}

impl RenderSnapshot {
    /// Anchor translation for the sprite container
    pub fn translate(&self) -> String {
        format!("translate({}px, {}px)", self.x, self.y)
    }

    /// Scale plus horizontal flip for the sprite itself
    pub fn sprite_transform(&self, scale: f64) -> String {
        let flip = if self.facing_right { 1 } else { -1 };
        format!("scale({}) scaleX({})", scale, flip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_land_resets_jump_budget() {
        let mut state = CharacterState::new(10.0);
        state.vel.y = 7.0;
        state.jumps_used = 2;
        state.land(300.0);
        assert_eq!(state.pos.y, 300.0);
        assert_eq!(state.vel.y, 0.0);
        assert!(state.is_grounded);
        assert_eq!(state.jumps_used, 0);
    }

    #[test]
    fn test_animation_from_motion() {
        let mut state = CharacterState::new(0.0);
        state.is_grounded = true;
        assert_eq!(state.animation(), AnimationState::Idle);

        state.vel.x = 3.0;
        assert_eq!(state.animation(), AnimationState::Running);

        state.is_grounded = false;
        state.vel.y = -4.0;
        assert_eq!(state.animation(), AnimationState::Jumping);

        state.vel.y = 4.0;
        assert_eq!(state.animation(), AnimationState::Falling);

        state.mode = Mode::Riding;
        assert_eq!(state.animation(), AnimationState::Idle);
    }

    #[test]
    fn test_snapshot_transforms() {
        let snapshot = RenderSnapshot { x: 12.5, y: -3.0, facing_right: false, ..Default::default() };
        assert_eq!(snapshot.translate(), "translate(12.5px, -3px)");
        assert_eq!(snapshot.sprite_transform(1.8), "scale(1.8) scaleX(-1)");
        assert_eq!(AnimationState::Falling.css_class(), "is-falling");
    }
}
