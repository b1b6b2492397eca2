//! Keyboard controls and per-frame input edges

/// A logical control the character responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Left,
    Right,
    Jump,
    Down,
    Interact,
}

impl Control {
    /// Map a `KeyboardEvent.key` value to a control
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Self::Left),
            "ArrowRight" | "d" | "D" => Some(Self::Right),
            "ArrowUp" | "w" | "W" | " " => Some(Self::Jump),
            "ArrowDown" | "s" | "S" => Some(Self::Down),
            "e" | "E" => Some(Self::Interact),
            _ => None,
        }
    }

    /// Whether the browser's default action (page scroll) must be suppressed
    pub fn blocks_page_scroll(self) -> bool {
        matches!(self, Self::Jump | Self::Down)
    }
}

/// Input for a single tick: held keys plus one-shot edges
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputEvents {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub jump_pressed: bool,
    pub down_pressed: bool,
    pub interact_pressed: bool,
}

/// Key state accumulated between frames by the key listeners
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: InputEvents,
}

impl InputState {
    /// Key went down. Auto-repeat does not re-arm the one-shot edges.
    pub fn press(&mut self, control: Control) {
        let held = &mut self.held;
        match control {
            Control::Left => held.left = true,
            Control::Right => held.right = true,
            Control::Jump => {
                if !held.up {
                    held.jump_pressed = true;
                }
                held.up = true;
            }
            Control::Down => {
                if !held.down {
                    held.down_pressed = true;
                }
                held.down = true;
            }
            Control::Interact => held.interact_pressed = true,
        }
    }

    pub fn release(&mut self, control: Control) {
        let held = &mut self.held;
        match control {
            Control::Left => held.left = false,
            Control::Right => held.right = false,
            Control::Jump => held.up = false,
            Control::Down => held.down = false,
            Control::Interact => {}
        }
    }

    /// Drop everything, e.g. when the window loses focus
    pub fn clear(&mut self) {
        self.held = InputEvents::default();
    }

    /// Snapshot for this frame; the one-shot edges are consumed
    pub fn take_frame(&mut self) -> InputEvents {
        let frame = self.held;
        self.held.jump_pressed = false;
        self.held.down_pressed = false;
        self.held.interact_pressed = false;
        frame
    }
}
