//! Keeps the character in step with the lift car.
//!
//! The page owns `(selected_floor, is_lift_moving)`; the lift widget animates
//! from it with a CSS transition. This module watches the same pair and either
//! lets the character carry on (it caused the floor change by landing) or
//! boards it and drives its y along the lift's easing curve.

use tracing::debug;

use crate::character::{CharacterState, Mode};
use crate::config::EngineConfig;
use crate::layout::{self, FloorSet, Metrics};
use crate::physics::in_shaft;

/// The page-owned lift state, read once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LiftSignal {
    pub selected_floor: Option<i32>,
    pub is_moving: bool,
}

/// An in-progress ride
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiftRide {
    pub floor: i32,
    pub start_y: f64,
    pub target_y: f64,
    pub start_ms: f64,
}

impl LiftRide {
    /// Anchor y after `now_ms`, pinned to the target once the ride is over
    pub fn y_at(&self, now_ms: f64, config: &EngineConfig) -> f64 {
        let elapsed = now_ms - self.start_ms;
        if elapsed >= config.lift.duration_ms {
            return self.target_y;
        }
        let t = config.lift.progress(elapsed.max(0.0));
        self.start_y + (self.target_y - self.start_y) * t
    }
}

/// What changed this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiftTransition {
    None,
    /// First placement on the selected floor
    Placed(i32),
    /// The lift is following the character's own landing
    Acknowledged(i32),
    Boarded(LiftRide),
    /// The lift stopped; the character waits out the settle buffer
    Arrived(i32),
    /// Normal physics resumed
    Released,
}

/// Tracks lift edges and the ride the character is on
#[derive(Debug, Clone, Default)]
pub struct LiftSync {
    was_moving: bool,
    /// Floor the last lift movement was matched against
    acknowledged: Option<i32>,
    /// Floor the character landed on by itself, waiting for the lift to follow
    manual_transition: Option<i32>,
    ride: Option<LiftRide>,
    settle_since: Option<f64>,
}

impl LiftSync {
    pub fn ride(&self) -> Option<&LiftRide> {
        self.ride.as_ref()
    }

    /// Whether the character is between lift stop and release
    pub fn is_settling(&self) -> bool {
        self.settle_since.is_some()
    }

    /// Called when physics lands the character on a new floor; the next lift
    /// movement to that floor is the page echoing it back.
    pub fn mark_manual_transition(&mut self, floor: i32) {
        self.manual_transition = Some(floor);
    }

    /// Forget everything, e.g. when the floor set is replaced
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// React to the page's lift state. Runs before physics each frame.
    pub fn observe(
        &mut self,
        signal: LiftSignal,
        state: &mut CharacterState,
        floors: &FloorSet,
        now_ms: f64,
        config: &EngineConfig,
    ) -> LiftTransition {
        let metrics = Metrics::from(config);
        let transition = self.observe_inner(signal, state, floors, now_ms, config, &metrics);
        self.was_moving = signal.is_moving;
        transition
    }

    fn observe_inner(
        &mut self,
        signal: LiftSignal,
        state: &mut CharacterState,
        floors: &FloorSet,
        now_ms: f64,
        config: &EngineConfig,
        metrics: &Metrics,
    ) -> LiftTransition {
        if state.current_floor.is_none() {
            return self.place(signal, state, floors, config, metrics);
        }

        if let Some(target) = signal.selected_floor {
            let started = signal.is_moving && !self.was_moving;
            let retargeted = signal.is_moving && self.acknowledged != Some(target);
            if started || retargeted {
                self.acknowledged = Some(target);
                if self.manual_transition.take() == Some(target) {
                    state.current_floor = Some(target);
                    return LiftTransition::Acknowledged(target);
                }
                if let Some(ride) = self.board(target, state, floors, now_ms, config, metrics) {
                    return LiftTransition::Boarded(ride);
                }
            }
        }

        if !signal.is_moving && self.was_moving {
            if let Some(ride) = self.ride.as_mut() {
                // Pin the curve so driving during the settle buffer holds the target
                ride.start_y = ride.target_y;
                let ride = *ride;
                state.land(ride.target_y);
                self.settle_since = Some(now_ms);
                debug!(floor = ride.floor, "lift arrived");
                return LiftTransition::Arrived(ride.floor);
            }
        }

        if let Some(since) = self.settle_since {
            if !signal.is_moving && now_ms - since >= config.settle_buffer_ms {
                self.settle_since = None;
                self.ride = None;
                state.mode = Mode::Free;
                state.visible = true;
                state.pos.x = state.pos.x.min(config.shaft_x);
                return LiftTransition::Released;
            }
        }

        LiftTransition::None
    }

    fn place(
        &mut self,
        signal: LiftSignal,
        state: &mut CharacterState,
        floors: &FloorSet,
        config: &EngineConfig,
        metrics: &Metrics,
    ) -> LiftTransition {
        let Some(floor) = signal.selected_floor else {
            return LiftTransition::None;
        };
        let Some(ground) = layout::ground_y(floors, floor, metrics) else {
            return LiftTransition::None;
        };
        state.land(ground);
        state.pos.x = config.spawn_x;
        state.current_floor = Some(floor);
        self.acknowledged = Some(floor);
        LiftTransition::Placed(floor)
    }

    /// Start (or restart) a ride from wherever the character is right now
    fn board(
        &mut self,
        floor: i32,
        state: &mut CharacterState,
        floors: &FloorSet,
        now_ms: f64,
        config: &EngineConfig,
        metrics: &Metrics,
    ) -> Option<LiftRide> {
        let target_y = layout::ground_y(floors, floor, metrics)?;

        if !in_shaft(state.pos.x, config) {
            state.pos.x = config.shaft_x;
            state.visible = false;
        }
        state.mode = Mode::Riding;
        state.vel.x = 0.0;
        state.vel.y = 0.0;
        state.is_grounded = false;
        state.ignore_collision_frames = 0;
        state.current_floor = Some(floor);

        let ride = LiftRide {
            floor,
            start_y: state.pos.y,
            target_y,
            start_ms: now_ms,
        };
        if self.ride.is_some() {
            debug!(floor, start_y = ride.start_y, "ride re-anchored");
        } else {
            debug!(floor, start_y = ride.start_y, "boarded lift");
        }
        self.ride = Some(ride);
        self.settle_since = None;
        Some(ride)
    }

    /// Drive y along the ride curve (integration step while riding)
    pub fn drive(&self, state: &mut CharacterState, now_ms: f64, config: &EngineConfig) {
        if !state.is_riding() {
            return;
        }
        if let Some(ride) = &self.ride {
            state.pos.y = ride.y_at(now_ms, config);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(floors: &[i32], start: i32) -> (EngineConfig, FloorSet, CharacterState, LiftSync) {
        let config = EngineConfig::default();
        let floors = FloorSet::from(floors.to_vec());
        let mut state = CharacterState::new(0.0);
        let mut sync = LiftSync::default();
        let placed = sync.observe(
            LiftSignal { selected_floor: Some(start), is_moving: false },
            &mut state,
            &floors,
            0.0,
            &config,
        );
        assert_eq!(placed, LiftTransition::Placed(start));
        (config, floors, state, sync)
    }

    fn ground(floors: &FloorSet, floor: i32, config: &EngineConfig) -> f64 {
        layout::ground_y(floors, floor, &Metrics::from(config)).unwrap()
    }

    #[test]
    fn test_first_mount_snaps_to_selected_floor() {
        let (config, floors, state, _) = setup(&[1, 2, 3], 2);
        assert_eq!(state.pos.y, ground(&floors, 2, &config));
        assert_eq!(state.pos.x, config.spawn_x);
        assert!(state.is_grounded);
        assert_eq!(state.current_floor, Some(2));
    }

    #[test]
    fn test_first_mount_waits_for_floors() {
        let config = EngineConfig::default();
        let mut state = CharacterState::new(0.0);
        let mut sync = LiftSync::default();
        let signal = LiftSignal { selected_floor: Some(2), is_moving: false };
        assert_eq!(sync.observe(signal, &mut state, &FloorSet::default(), 0.0, &config), LiftTransition::None);
        assert_eq!(state.current_floor, None);
    }

    #[test]
    fn test_self_caused_move_is_only_acknowledged() {
        let (config, floors, mut state, mut sync) = setup(&[1, 2, 3], 2);
        state.current_floor = Some(3);
        sync.mark_manual_transition(3);

        let moving = LiftSignal { selected_floor: Some(3), is_moving: true };
        assert_eq!(sync.observe(moving, &mut state, &floors, 100.0, &config), LiftTransition::Acknowledged(3));
        assert_eq!(state.mode, Mode::Free);
        assert!(state.visible);
        assert!(sync.ride().is_none());
    }

    #[test]
    fn test_external_move_boards_and_arrives() {
        let (config, floors, mut state, mut sync) = setup(&[1, 2, 3, 4, 5], 1);
        let start_y = state.pos.y;

        let moving = LiftSignal { selected_floor: Some(5), is_moving: true };
        let transition = sync.observe(moving, &mut state, &floors, 1000.0, &config);
        assert!(matches!(transition, LiftTransition::Boarded(ride) if ride.start_y == start_y));
        assert_eq!(state.pos.x, config.shaft_x);
        assert!(!state.visible);
        assert_eq!(state.mode, Mode::Riding);
        assert_eq!(state.current_floor, Some(5));

        sync.drive(&mut state, 1400.0, &config);
        assert!(state.pos.y < start_y);
        assert!(state.pos.y > ground(&floors, 5, &config));

        sync.drive(&mut state, 1800.0, &config);
        assert_eq!(state.pos.y, ground(&floors, 5, &config));

        let stopped = LiftSignal { selected_floor: Some(5), is_moving: false };
        assert_eq!(sync.observe(stopped, &mut state, &floors, 1810.0, &config), LiftTransition::Arrived(5));
        assert!(state.is_grounded);
        assert_eq!(state.mode, Mode::Riding);

        assert_eq!(sync.observe(stopped, &mut state, &floors, 1850.0, &config), LiftTransition::None);
        assert_eq!(sync.observe(stopped, &mut state, &floors, 1910.0, &config), LiftTransition::Released);
        assert_eq!(state.mode, Mode::Free);
        assert!(state.visible);
        assert!(in_shaft(state.pos.x, &config));
    }

    #[test]
    fn test_drive_after_early_stop_keeps_target() {
        let (config, floors, mut state, mut sync) = setup(&[1, 2, 3], 1);
        sync.observe(LiftSignal { selected_floor: Some(2), is_moving: true }, &mut state, &floors, 0.0, &config);
        sync.drive(&mut state, 200.0, &config);

        let stopped = LiftSignal { selected_floor: Some(2), is_moving: false };
        assert_eq!(sync.observe(stopped, &mut state, &floors, 216.0, &config), LiftTransition::Arrived(2));
        sync.drive(&mut state, 216.0, &config);
        assert_eq!(state.pos.y, ground(&floors, 2, &config));
        sync.drive(&mut state, 300.0, &config);
        assert_eq!(state.pos.y, ground(&floors, 2, &config));
    }

    #[test]
    fn test_rider_already_in_shaft_stays_visible() {
        let (config, floors, mut state, mut sync) = setup(&[1, 2, 3], 1);
        state.pos.x = config.min_x;
        let moving = LiftSignal { selected_floor: Some(3), is_moving: true };
        sync.observe(moving, &mut state, &floors, 0.0, &config);
        assert_eq!(state.mode, Mode::Riding);
        assert_eq!(state.pos.x, config.min_x);
        assert!(state.visible);
    }

    #[test]
    fn test_retarget_mid_ride_reanchors_from_live_position() {
        let (config, floors, mut state, mut sync) = setup(&[1, 2, 3, 4], 1);

        sync.observe(LiftSignal { selected_floor: Some(2), is_moving: true }, &mut state, &floors, 0.0, &config);
        sync.drive(&mut state, 300.0, &config);
        let mid_flight = state.pos.y;
        assert_ne!(mid_flight, ground(&floors, 2, &config));

        let transition =
            sync.observe(LiftSignal { selected_floor: Some(4), is_moving: true }, &mut state, &floors, 300.0, &config);
        let LiftTransition::Boarded(ride) = transition else {
            panic!("expected a new ride, got {:?}", transition);
        };
        assert_eq!(ride.start_y, mid_flight);
        assert_eq!(ride.target_y, ground(&floors, 4, &config));
        assert_eq!(ride.start_ms, 300.0);

        // No jump at the start of the new ride
        sync.drive(&mut state, 300.0, &config);
        assert_eq!(state.pos.y, mid_flight);
    }

    #[test]
    fn test_restart_after_stop_reanchors_during_settle() {
        let (config, floors, mut state, mut sync) = setup(&[1, 2, 3], 1);

        sync.observe(LiftSignal { selected_floor: Some(2), is_moving: true }, &mut state, &floors, 0.0, &config);
        sync.drive(&mut state, 200.0, &config);
        // Lift stops early, then immediately heads elsewhere
        sync.observe(LiftSignal { selected_floor: Some(2), is_moving: false }, &mut state, &floors, 200.0, &config);
        let settled_y = state.pos.y;
        let transition =
            sync.observe(LiftSignal { selected_floor: Some(3), is_moving: true }, &mut state, &floors, 230.0, &config);
        assert!(matches!(transition, LiftTransition::Boarded(ride) if ride.start_y == settled_y));
        assert!(!sync.is_settling());
    }
}
