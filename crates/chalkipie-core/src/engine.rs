//! The character engine: one `tick` per animation frame

use tracing::debug;

use crate::camera::{self, ScrollCommand, Viewport};
use crate::character::{CharacterState, RenderSnapshot};
use crate::config::EngineConfig;
use crate::input::InputEvents;
use crate::layout::FloorSet;
use crate::lift::{LiftRide, LiftSignal, LiftSync, LiftTransition};
use crate::physics::{self, CallCooldown, VerticalAction};
use crate::proximity::{self, DoorMap, DoorRef};

/// Something the page needs to react to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The character landed on, or called the lift to, another floor
    FloorChange(i32),
    /// The door in reach changed (None when walking away)
    DoorProximity(Option<DoorRef>),
    /// Interact pressed while a door was in reach
    OpenDoor(DoorRef),
}

/// Result of one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub snapshot: RenderSnapshot,
    pub scroll: ScrollCommand,
    pub events: Vec<EngineEvent>,
}

pub struct Engine {
    config: EngineConfig,
    floors: FloorSet,
    doors: DoorMap,
    state: CharacterState,
    lift: LiftSync,
    cooldown: CallCooldown,
    door_in_reach: Option<DoorRef>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let state = CharacterState::new(config.spawn_x);
        Self {
            config,
            floors: FloorSet::default(),
            doors: DoorMap::new(),
            state,
            lift: LiftSync::default(),
            cooldown: CallCooldown::default(),
            door_in_reach: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> &CharacterState {
        &self.state
    }

    pub fn floors(&self) -> &FloorSet {
        &self.floors
    }

    pub fn ride(&self) -> Option<&LiftRide> {
        self.lift.ride()
    }

    pub fn is_riding(&self) -> bool {
        self.state.is_riding()
    }

    /// Replace the floor set. A different set (new term) re-places the
    /// character on the next tick.
    pub fn set_floors(&mut self, floors: FloorSet) {
        if floors == self.floors {
            return;
        }
        debug!(floors = ?floors.as_slice(), "floor set replaced");
        self.floors = floors;
        self.state = CharacterState::new(self.config.spawn_x);
        self.lift.reset();
        self.door_in_reach = None;
    }

    pub fn set_doors(&mut self, doors: DoorMap) {
        self.doors = doors;
    }

    pub fn tick(&mut self, now_ms: f64, input: InputEvents, lift: LiftSignal, viewport: &Viewport) -> Frame {
        let mut events = Vec::new();
        let config = &self.config;
        let state = &mut self.state;

        let transition = self.lift.observe(lift, state, &self.floors, now_ms, config);
        if transition != LiftTransition::None {
            debug!(?transition, "lift");
        }

        physics::apply_horizontal(state, &input, config);

        let action = physics::apply_vertical_input(state, &input, &self.floors, &mut self.cooldown, now_ms, config);
        if let VerticalAction::CallFloor(floor) = action {
            events.push(EngineEvent::FloorChange(floor));
        }

        let prev_y = state.pos.y;
        if state.is_riding() {
            self.lift.drive(state, now_ms, config);
        } else {
            physics::integrate(state, config);
        }

        physics::clamp_bounds(state, &self.floors, viewport.level_width, config);

        if let Some(floor) = physics::resolve_floor_collision(state, prev_y, &self.floors, config) {
            self.lift.mark_manual_transition(floor);
            events.push(EngineEvent::FloorChange(floor));
        }

        self.update_door_in_reach(&input, &mut events);

        let scroll = if self.state.visible || self.state.is_riding() {
            camera::follow(self.state.pos.x, self.state.pos.y, viewport, &self.config)
        } else {
            ScrollCommand::default()
        };

        Frame {
            snapshot: self.snapshot(),
            scroll,
            events,
        }
    }

    fn update_door_in_reach(&mut self, input: &InputEvents, events: &mut Vec<EngineEvent>) {
        let state = &self.state;
        let can_reach = !state.is_riding()
            && state.is_grounded
            && !physics::in_shaft(state.pos.x, &self.config);
        let nearest = match state.current_floor {
            Some(floor) if can_reach => proximity::nearest_door(&self.doors, floor, state.pos.x, &self.config),
            _ => None,
        };

        if nearest != self.door_in_reach {
            self.door_in_reach = nearest.clone();
            events.push(EngineEvent::DoorProximity(nearest));
        }

        if input.interact_pressed {
            if let Some(door) = &self.door_in_reach {
                events.push(EngineEvent::OpenDoor(door.clone()));
            }
        }
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        let state = &self.state;
        let in_shaft = physics::in_shaft(state.pos.x, &self.config);
        RenderSnapshot {
            x: state.pos.x,
            y: state.pos.y,
            facing_right: state.facing_right,
            animation: state.animation(),
            visible: state.visible,
            riding: state.is_riding(),
            show_shaft_controls: in_shaft
                && !state.is_riding()
                && !self.lift.is_settling()
                && state.is_grounded
                && state.vel.x == 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{self, Metrics};

    fn rest(floor: i32) -> LiftSignal {
        LiftSignal { selected_floor: Some(floor), is_moving: false }
    }

    fn moving(floor: i32) -> LiftSignal {
        LiftSignal { selected_floor: Some(floor), is_moving: true }
    }

    fn jump() -> InputEvents {
        InputEvents { up: true, jump_pressed: true, ..Default::default() }
    }

    fn engine_on(floors: &[i32], floor: i32) -> Engine {
        let mut engine = Engine::new(EngineConfig::default());
        engine.set_floors(FloorSet::from(floors.to_vec()));
        let frame = engine.tick(0.0, InputEvents::default(), rest(floor), &Viewport::default());
        assert!(frame.events.is_empty());
        assert_eq!(engine.state().current_floor, Some(floor));
        engine
    }

    fn ground(engine: &Engine, floor: i32) -> f64 {
        layout::ground_y(engine.floors(), floor, &Metrics::from(engine.config())).unwrap()
    }

    fn floor_changes(frame: &Frame) -> Vec<i32> {
        frame
            .events
            .iter()
            .filter_map(|e| match e {
                EngineEvent::FloorChange(f) => Some(*f),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_jump_from_floor_one() {
        let mut engine = engine_on(&[1, 2, 3], 1);
        assert_eq!(engine.state().pos.y, ground(&engine, 1));
        assert!(engine.state().is_grounded);

        engine.tick(16.0, jump(), rest(1), &Viewport::default());

        let config = engine.config().clone();
        let state = engine.state();
        assert!((state.vel.y - (config.jump_force + config.gravity)).abs() < 1e-9);
        assert!(!state.is_grounded);
        assert_eq!(state.jumps_used, 1);
    }

    #[test]
    fn test_shaft_call_emits_once_and_waits_for_lift() {
        let mut engine = engine_on(&[1, 2, 3, 4], 2);
        engine.state.pos.x = -140.0;

        let frame = engine.tick(1000.0, jump(), rest(2), &Viewport::default());
        assert_eq!(floor_changes(&frame), vec![3]);
        assert_eq!(engine.state().current_floor, Some(2));
        assert!(engine.state().is_grounded);

        // Still within the cooldown
        let frame = engine.tick(1100.0, jump(), rest(2), &Viewport::default());
        assert!(floor_changes(&frame).is_empty());

        // The page answers by moving the lift; the character rides along visibly
        engine.tick(1116.0, InputEvents::default(), moving(3), &Viewport::default());
        assert!(engine.is_riding());
        assert!(engine.state().visible);
        assert_eq!(engine.state().current_floor, Some(3));
    }

    #[test]
    fn test_external_lift_move_boards_and_arrives_exactly() {
        let mut engine = engine_on(&[1, 2, 3, 4, 5], 1);
        let viewport = Viewport::default();

        let frame = engine.tick(1000.0, InputEvents::default(), moving(5), &viewport);
        assert_eq!(frame.snapshot.x, -80.0);
        assert!(!frame.snapshot.visible);
        assert!(frame.snapshot.riding);
        // Camera keeps following the hidden rider
        assert!(frame.scroll.scroll_y.is_some());

        let mut now: f64 = 1000.0;
        while now < 1800.0 {
            now += 16.0;
            let frame = engine.tick(now.min(1800.0), InputEvents::default(), moving(5), &viewport);
            assert!(floor_changes(&frame).is_empty());
        }
        assert_eq!(engine.state().pos.y, ground(&engine, 5));

        engine.tick(1816.0, InputEvents::default(), rest(5), &viewport);
        assert!(engine.is_riding());
        let frame = engine.tick(1920.0, InputEvents::default(), rest(5), &viewport);
        assert!(!engine.is_riding());
        assert!(frame.snapshot.visible);
        assert_eq!(engine.state().pos.y, ground(&engine, 5));
        assert!(physics::in_shaft(engine.state().pos.x, engine.config()));
    }

    #[test]
    fn test_early_lift_stop_holds_the_target_floor() {
        let mut engine = engine_on(&[1, 2, 3], 1);
        let viewport = Viewport::default();
        let target = ground(&engine, 2);

        let mut now: f64 = 1000.0;
        engine.tick(now, InputEvents::default(), moving(2), &viewport);
        while now < 1200.0 {
            now += 16.0;
            engine.tick(now, InputEvents::default(), moving(2), &viewport);
        }
        assert_ne!(engine.state().pos.y, target);

        // The page stops the lift well before the ride curve finishes
        let mut changes = Vec::new();
        now += 16.0;
        changes.extend(floor_changes(&engine.tick(now, InputEvents::default(), rest(2), &viewport)));
        assert_eq!(engine.state().pos.y, target);

        while engine.is_riding() {
            now += 16.0;
            changes.extend(floor_changes(&engine.tick(now, InputEvents::default(), rest(2), &viewport)));
            assert_eq!(engine.state().pos.y, target);
        }
        for _ in 0..120 {
            now += 16.0;
            changes.extend(floor_changes(&engine.tick(now, InputEvents::default(), rest(2), &viewport)));
        }
        assert!(changes.is_empty());
        assert_eq!(engine.state().pos.y, target);
        assert_eq!(engine.state().current_floor, Some(2));
        assert!(engine.state().is_grounded);
    }

    #[test]
    fn test_landing_is_reported_once_per_floor() {
        let mut engine = engine_on(&[1, 2, 3], 3);
        let viewport = Viewport::default();
        let down = InputEvents { down: true, down_pressed: true, ..Default::default() };

        let mut changes = floor_changes(&engine.tick(16.0, down, rest(3), &viewport));
        let mut now: f64 = 16.0;
        for _ in 0..120 {
            now += 16.0;
            changes.extend(floor_changes(&engine.tick(now, InputEvents::default(), rest(3), &viewport)));
        }
        assert_eq!(changes, vec![2]);

        // Hop in place a few times
        for _ in 0..3 {
            now += 16.0;
            changes.extend(floor_changes(&engine.tick(now, jump(), rest(3), &viewport)));
            for _ in 0..90 {
                now += 16.0;
                changes.extend(floor_changes(&engine.tick(now, InputEvents::default(), rest(3), &viewport)));
            }
        }
        assert_eq!(changes, vec![2]);
        assert!(engine.state().is_grounded);
    }

    #[test]
    fn test_own_landing_does_not_board_the_lift() {
        let mut engine = engine_on(&[1, 2, 3], 3);
        let viewport = Viewport::default();
        let down = InputEvents { down: true, down_pressed: true, ..Default::default() };

        let mut now: f64 = 16.0;
        engine.tick(now, down, rest(3), &viewport);
        for _ in 0..120 {
            now += 16.0;
            engine.tick(now, InputEvents::default(), rest(3), &viewport);
        }
        assert_eq!(engine.state().current_floor, Some(2));

        // The page echoes the landing back as a lift movement
        now += 16.0;
        engine.tick(now, InputEvents::default(), moving(2), &viewport);
        assert!(!engine.is_riding());
        assert!(engine.state().visible);
        assert!(engine.ride().is_none());
    }

    #[test]
    fn test_door_proximity_and_open() {
        let mut engine = engine_on(&[1], 1);
        let mut doors = DoorMap::new();
        doors.insert(1, vec!["a".to_string(), "b".to_string()]);
        engine.set_doors(doors);
        let viewport = Viewport::default();

        let frame = engine.tick(16.0, InputEvents::default(), rest(1), &viewport);
        let door_a = DoorRef { floor: 1, slot: 0, id: "a".to_string() };
        assert_eq!(frame.events, vec![EngineEvent::DoorProximity(Some(door_a.clone()))]);

        let interact = InputEvents { interact_pressed: true, ..Default::default() };
        let frame = engine.tick(32.0, interact, rest(1), &viewport);
        assert_eq!(frame.events, vec![EngineEvent::OpenDoor(door_a)]);

        engine.state.pos.x = 400.0;
        let frame = engine.tick(48.0, InputEvents::default(), rest(1), &viewport);
        let door_b = DoorRef { floor: 1, slot: 1, id: "b".to_string() };
        assert_eq!(frame.events, vec![EngineEvent::DoorProximity(Some(door_b))]);
    }

    #[test]
    fn test_shaft_controls_hint() {
        let mut engine = engine_on(&[1, 2], 1);
        engine.state.pos.x = -100.0;
        let frame = engine.tick(16.0, InputEvents::default(), rest(1), &Viewport::default());
        assert!(frame.snapshot.show_shaft_controls);

        engine.state.pos.x = 300.0;
        let frame = engine.tick(32.0, InputEvents::default(), rest(1), &Viewport::default());
        assert!(!frame.snapshot.show_shaft_controls);
    }

    #[test]
    fn test_new_floor_set_replaces_character() {
        let mut engine = engine_on(&[1, 2, 3], 2);
        engine.set_floors(FloorSet::from(vec![4, 5]));
        assert_eq!(engine.state().current_floor, None);

        engine.tick(16.0, InputEvents::default(), rest(5), &Viewport::default());
        assert_eq!(engine.state().current_floor, Some(5));
        assert_eq!(engine.state().pos.y, ground(&engine, 5));
    }

    #[test]
    fn test_unplaced_character_without_floors_stays_in_bounds() {
        let mut engine = Engine::new(EngineConfig::default());
        for i in 0..60 {
            let frame = engine.tick(i as f64 * 16.0, InputEvents::default(), rest(1), &Viewport::default());
            assert!(frame.events.is_empty());
        }
        assert_eq!(engine.state().current_floor, None);
        assert!(engine.state().pos.y >= 0.0);
    }
}
