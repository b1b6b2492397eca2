//! The playable character.
//!
//! Hosts the engine in a requestAnimationFrame loop, feeds it keyboard edges
//! and the page's lift state, and applies the returned snapshot and scroll.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chalkipie_core::{
    Control, DoorMap, DoorRef, Engine, EngineConfig, EngineEvent, FloorSet, InputState, LiftSignal, RenderSnapshot,
    ScrollCommand, Viewport,
};
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::console;

use crate::app::{FACADE_SCROLL_ID, LEVEL_ID};

type FrameLoop = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Everything needed to stop the loop on unmount
struct LoopHandle {
    stopped: Rc<Cell<bool>>,
    frame_id: Rc<Cell<Option<i32>>>,
    frame_loop: FrameLoop,
}

impl LoopHandle {
    fn stop(&self) {
        self.stopped.set(true);
        if let (Some(window), Some(id)) = (web_sys::window(), self.frame_id.take()) {
            window.cancel_animation_frame(id).ok();
        }
        // No frame is pending any more, so the closure can go
        self.frame_loop.borrow_mut().take();
    }
}

#[component]
pub fn FancyPantsGuy(
    config: EngineConfig,
    floors: Memo<FloorSet>,
    door_map: Memo<DoorMap>,
    selected_floor: ReadSignal<Option<i32>>,
    is_lift_moving: ReadSignal<bool>,
    /// Width available right of the shaft
    level_width: Memo<f64>,
    on_floor_change: Callback<i32>,
    on_open_door: Callback<String>,
) -> impl IntoView {
    let scale = config.sprite_scale;
    let shaft_width = config.shaft_width;
    let engine = Rc::new(RefCell::new(Engine::new(config)));
    let input = Rc::new(RefCell::new(InputState::default()));

    let snapshot = RwSignal::new(RenderSnapshot::default());
    let door_in_reach = RwSignal::new(None::<DoorRef>);

    // Floors and doors follow the selected term
    let engine_floors = engine.clone();
    Effect::new(move |_| {
        engine_floors.borrow_mut().set_floors(floors.get());
    });
    let engine_doors = engine.clone();
    Effect::new(move |_| {
        engine_doors.borrow_mut().set_doors(door_map.get());
    });

    // Keyboard
    let input_down = input.clone();
    let keydown = window_event_listener(ev::keydown, move |ev| {
        let Some(control) = Control::from_key(&ev.key()) else { return };
        if control.blocks_page_scroll() {
            ev.prevent_default();
        }
        input_down.borrow_mut().press(control);
    });
    let input_up = input.clone();
    let keyup = window_event_listener(ev::keyup, move |ev| {
        if let Some(control) = Control::from_key(&ev.key()) {
            input_up.borrow_mut().release(control);
        }
    });
    // Keys released while the window is unfocused never send keyup
    let input_blur = input.clone();
    let blur = window_event_listener(ev::blur, move |_| {
        input_blur.borrow_mut().clear();
    });

    // Frame loop
    let stopped = Rc::new(Cell::new(false));
    let frame_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let frame_loop: FrameLoop = Rc::new(RefCell::new(None));

    {
        let frame_loop_inner = frame_loop.clone();
        let stopped = stopped.clone();
        let frame_id = frame_id.clone();
        let closure = Closure::new(move |now: f64| {
            if stopped.get() {
                return;
            }

            let viewport = read_viewport(level_width.get_untracked(), shaft_width);
            let edges = input.borrow_mut().take_frame();
            let lift = LiftSignal {
                selected_floor: selected_floor.get_untracked(),
                is_moving: is_lift_moving.get_untracked(),
            };
            let frame = engine.borrow_mut().tick(now, edges, lift, &viewport);

            apply_scroll(&frame.scroll);
            if snapshot.get_untracked() != frame.snapshot {
                snapshot.set(frame.snapshot);
            }
            for event in frame.events {
                match event {
                    EngineEvent::FloorChange(floor) => on_floor_change.run(floor),
                    EngineEvent::DoorProximity(door) => door_in_reach.set(door),
                    EngineEvent::OpenDoor(door) => on_open_door.run(door.id),
                }
            }

            request_frame(&frame_loop_inner, &frame_id);
        });
        *frame_loop.borrow_mut() = Some(closure);
    }
    request_frame(&frame_loop, &frame_id);
    console::log_1(&"character: frame loop started".into());

    let handle = StoredValue::new_local(LoopHandle { stopped, frame_id, frame_loop });
    on_cleanup(move || {
        let _ = handle.try_with_value(LoopHandle::stop);
        keydown.remove();
        keyup.remove();
        blur.remove();
        console::log_1(&"character: frame loop stopped".into());
    });

    view! {
        <div
            class="fancy-pants-guy"
            class:is-hidden=move || !snapshot.get().visible
            class:is-riding=move || snapshot.get().riding
            style=move || format!("left: {}px; transform: {}", shaft_width, snapshot.get().translate())
        >
            <Show when=move || door_in_reach.get().is_some()>
                <div class="door-prompt">"Press E to open door"</div>
            </Show>
            <Show when=move || snapshot.get().show_shaft_controls>
                <div class="shaft-controls">
                    <span class="shaft-key">"↑"</span>
                    <span class="shaft-key">"↓"</span>
                    <span class="shaft-hint">"Call lift"</span>
                </div>
            </Show>
            <div
                class=move || format!("guy-sprite {}", snapshot.get().animation.css_class())
                style=move || format!("transform: {}", snapshot.get().sprite_transform(scale))
            >
                <div class="guy-head"></div>
                <div class="guy-body"></div>
                <div class="guy-legs"></div>
            </div>
        </div>
    }
}

fn request_frame(frame_loop: &FrameLoop, frame_id: &Cell<Option<i32>>) {
    let Some(window) = web_sys::window() else { return };
    if let Some(closure) = frame_loop.borrow().as_ref() {
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => frame_id.set(Some(id)),
            Err(e) => console::error_1(&format!("character: requestAnimationFrame failed: {:?}", e).into()),
        }
    }
}

/// Sizes and scroll offsets the camera needs, read fresh every frame
fn read_viewport(level_width: f64, shaft_width: f64) -> Viewport {
    let mut viewport = Viewport {
        level_width,
        origin_left: shaft_width,
        ..Viewport::default()
    };
    let Some(window) = web_sys::window() else { return viewport };

    if let Some(height) = window.inner_height().ok().and_then(|v| v.as_f64()) {
        viewport.height = height;
    }
    viewport.scroll_y = window.scroll_y().unwrap_or(0.0);

    let Some(document) = window.document() else { return viewport };
    if let Some(level) = document.get_element_by_id(LEVEL_ID) {
        viewport.level_top = level.get_bounding_client_rect().top() + viewport.scroll_y;
    }
    if let Some(facade) = document.get_element_by_id(FACADE_SCROLL_ID) {
        viewport.container_width = facade.client_width() as f64;
        viewport.scroll_left = facade.scroll_left() as f64;
    }
    viewport
}

fn apply_scroll(scroll: &ScrollCommand) {
    let Some(window) = web_sys::window() else { return };
    if let Some(y) = scroll.scroll_y {
        window.scroll_to_with_x_and_y(window.scroll_x().unwrap_or(0.0), y);
    }
    if let Some(left) = scroll.scroll_left {
        let facade = window.document().and_then(|d| d.get_element_by_id(FACADE_SCROLL_ID));
        if let Some(facade) = facade {
            facade.scroll_to_with_x_and_y(left, facade.scroll_top() as f64);
        }
    }
}
