//! Lift shaft column and the car riding in it.
//!
//! The car moves with a CSS transition built from the same `LiftMotion` the
//! engine interpolates the rider with, so both arrive together.

use chalkipie_core::layout::{self, FloorSet, Metrics};
use chalkipie_core::LiftMotion;
use leptos::prelude::*;

use crate::app::LiftDirection;

#[component]
pub fn LiftShaft(
    floors: Memo<FloorSet>,
    selected_floor: ReadSignal<Option<i32>>,
    direction: ReadSignal<LiftDirection>,
    motion: LiftMotion,
    metrics: Metrics,
    shaft_width: f64,
) -> impl IntoView {
    let shaft_height = move || floors.with(|floors| layout::total_level_height(floors, &metrics));

    view! {
        <div
            class="lift-shaft"
            style=move || format!("width: {}px; height: {}px", shaft_width, shaft_height())
        >
            <Show when=move || selected_floor.get().is_some()>
                <Lift
                    floors=floors
                    selected_floor=selected_floor
                    direction=direction
                    motion=motion
                    metrics=metrics
                />
            </Show>
        </div>
    }
}

/// The car itself
#[component]
fn Lift(
    floors: Memo<FloorSet>,
    selected_floor: ReadSignal<Option<i32>>,
    direction: ReadSignal<LiftDirection>,
    motion: LiftMotion,
    metrics: Metrics,
) -> impl IntoView {
    let transition = motion.css_transition();
    let car_y = move || {
        let floor = selected_floor.get()?;
        floors.with(|floors| layout::row_top_y(floors, floor, &metrics))
    };

    view! {
        <div
            class="lift-car"
            class:is-moving=move || direction.get() != LiftDirection::Idle
            style=move || format!(
                "height: {}px; transform: translateY({}px); transition: {}",
                metrics.floor_height,
                car_y().unwrap_or(metrics.header_height),
                transition,
            )
        >
            <div class="lift-display">
                <span class="lift-arrow">{move || direction.get().arrow()}</span>
                <span class="lift-floor">{move || selected_floor.get().map(|f| f.to_string()).unwrap_or_default()}</span>
            </div>
            <div class="lift-doors">
                <div class="lift-door lift-door-left"></div>
                <div class="lift-door lift-door-right"></div>
            </div>
        </div>
    }
}
