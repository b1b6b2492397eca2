use std::collections::BTreeMap;

use chalkipie_core::door::{self, AcademicTerm, Door};
use chalkipie_core::layout::{self, FloorSet, Metrics};
use chalkipie_core::proximity::{self, DoorMap};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::components::{DoorView, FancyPantsGuy, FloorPicker, HotelFacade, LiftShaft, TermSelector};
use crate::{config, data};

/// Id of the horizontally scrolling facade container
pub const FACADE_SCROLL_ID: &str = "facade-scroll";
/// Id of the level element; character coordinates are relative to it
pub const LEVEL_ID: &str = "level";

/// Which way the lift car is heading
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LiftDirection {
    Up,
    Down,
    #[default]
    Idle,
}

impl LiftDirection {
    fn between(from: Option<i32>, to: i32) -> Self {
        match from {
            Some(from) if to > from => Self::Up,
            Some(from) if to < from => Self::Down,
            _ => Self::Idle,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Self::Up => "▲",
            Self::Down => "▼",
            Self::Idle => "",
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    let engine_config = config::load();
    let metrics = Metrics::from(&engine_config);
    let catalogue = StoredValue::new(data::load_catalogue());
    let terms = catalogue.with_value(|doors| door::terms(doors));

    // Term selection (newest first)
    let (term, set_term) = signal::<Option<AcademicTerm>>(terms.first().cloned());

    let floors = Memo::new(move |_| match term.get() {
        Some(term) => catalogue.with_value(|doors| door::floors_for_term(doors, &term)),
        None => FloorSet::default(),
    });
    let doors_by_floor = Memo::new(move |_| match term.get() {
        Some(term) => catalogue.with_value(|doors| door::doors_by_floor(doors, &term)),
        None => BTreeMap::new(),
    });
    let door_map = Memo::new(move |_| -> DoorMap { door::door_map(&doors_by_floor.get()) });

    // Lift state, shared by the lift car and the character
    let (selected_floor, set_selected_floor) = signal::<Option<i32>>(None);
    let (is_lift_moving, set_is_lift_moving) = signal(false);
    let (direction, set_direction) = signal(LiftDirection::Idle);

    // Modals
    let (show_picker, set_show_picker) = signal(false);
    let (open_door, set_open_door) = signal::<Option<Door>>(None);

    let level_width = {
        let engine_config = engine_config.clone();
        Memo::new(move |_| {
            let slots = doors_by_floor.with(|grouped| grouped.values().map(Vec::len).max().unwrap_or(0));
            proximity::level_width_for(slots.max(1), &engine_config)
        })
    };
    let level_height = Memo::new(move |_| floors.with(|floors| layout::total_level_height(floors, &metrics)));

    // A new term starts at its lowest floor
    Effect::new(move |_| {
        let floors = floors.get();
        let current = selected_floor.get_untracked();
        if current.is_none_or(|floor| !floors.contains(floor)) {
            set_selected_floor.set(floors.lowest());
            set_is_lift_moving.set(false);
            set_direction.set(LiftDirection::Idle);
        }
    });

    // Lift arrival; replacing the timeout cancels the previous one
    let arrival = StoredValue::new_local(None::<Timeout>);
    let ride_ms = engine_config.lift.duration_ms.max(0.0) as u32;
    let change_floor = Callback::new(move |floor: i32| {
        let current = selected_floor.get_untracked();
        if current == Some(floor) {
            return;
        }
        set_direction.set(LiftDirection::between(current, floor));
        set_selected_floor.set(Some(floor));
        set_is_lift_moving.set(true);
        let timeout = Timeout::new(ride_ms, move || {
            set_is_lift_moving.set(false);
            set_direction.set(LiftDirection::Idle);
        });
        arrival.set_value(Some(timeout));
    });

    let pick_floor = Callback::new(move |floor: i32| {
        set_show_picker.set(false);
        change_floor.run(floor);
    });

    let open_door_by_id = Callback::new(move |id: String| {
        let door = doors_by_floor.with_untracked(|grouped| grouped.values().flatten().find(|d| d.id == id).cloned());
        set_open_door.set(door);
    });

    let header_height = engine_config.header_height;
    let shaft_width = engine_config.shaft_width;

    view! {
        <div class="app-container">
            <header class="site-header" style=format!("height: {}px", header_height)>
                <div class="site-header-left">
                    <h1 class="site-title">"Chalkipie"</h1>
                    <span class="site-subtitle">"Door Hotel"</span>
                </div>
                <div class="site-header-right">
                    <TermSelector terms=terms term=term set_term=set_term />
                    <button
                        class="floor-picker-btn"
                        title="Choose a floor"
                        on:click=move |_| set_show_picker.set(true)
                    >
                        {move || match selected_floor.get() {
                            Some(floor) => format!("Floor {}", floor),
                            None => "Floors".to_string(),
                        }}
                    </button>
                </div>
            </header>
            <main id=FACADE_SCROLL_ID class="facade-scroll">
                <div
                    id=LEVEL_ID
                    class="level"
                    style=move || format!(
                        "width: {}px; height: {}px",
                        level_width.get() + shaft_width,
                        level_height.get(),
                    )
                >
                    <LiftShaft
                        floors=floors
                        selected_floor=selected_floor
                        direction=direction
                        motion=engine_config.lift
                        metrics=metrics
                        shaft_width=shaft_width
                    />
                    <HotelFacade
                        floors=floors
                        doors_by_floor=doors_by_floor
                        config=engine_config.clone()
                        on_open_door=open_door_by_id
                    />
                    <FancyPantsGuy
                        config=engine_config.clone()
                        floors=floors
                        door_map=door_map
                        selected_floor=selected_floor
                        is_lift_moving=is_lift_moving
                        level_width=level_width
                        on_floor_change=change_floor
                        on_open_door=open_door_by_id
                    />
                </div>
            </main>
            <FloorPicker
                show=show_picker
                on_close=set_show_picker
                floors=floors
                selected_floor=selected_floor
                on_select=pick_floor
            />
            <DoorView door=open_door on_close=set_open_door />
            <footer class="site-footer">
                <span class="build-info">
                    {format!("build {} · {}", env!("BUILD_HASH"), env!("BUILD_TIMESTAMP"))}
                </span>
            </footer>
        </div>
    }
}
