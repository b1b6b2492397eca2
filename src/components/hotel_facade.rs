//! The building: one row per floor, highest floor on top, door tiles in
//! their slots along each row.

use std::collections::BTreeMap;

use chalkipie_core::layout::{self, FloorSet, Metrics};
use chalkipie_core::proximity;
use chalkipie_core::{Door, EngineConfig};
use leptos::prelude::*;

#[component]
pub fn HotelFacade(
    floors: Memo<FloorSet>,
    doors_by_floor: Memo<BTreeMap<i32, Vec<Door>>>,
    config: EngineConfig,
    on_open_door: Callback<String>,
) -> impl IntoView {
    let metrics = Metrics::from(&config);
    let shaft_width = config.shaft_width;
    let config = StoredValue::new(config);

    let rows = move || {
        floors.with(|floors| {
            floors
                .top_down()
                .filter_map(|floor| layout::row_top_y(floors, floor, &metrics).map(|top| (floor, top)))
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="hotel-facade">
            <Show when=move || !floors.with(FloorSet::is_empty)>
                <For
                    each=rows
                    key=|(floor, top)| (*floor, top.to_bits())
                    children=move |(floor, top)| {
                        let doors = move || {
                            doors_by_floor.with(|grouped| grouped.get(&floor).cloned().unwrap_or_default())
                        };
                        view! {
                            <section
                                class="floor-row"
                                style=format!("top: {}px; left: {}px; height: {}px", top, shaft_width, metrics.floor_height)
                            >
                                <span class="floor-label">{format!("Level {}", floor)}</span>
                                <For
                                    each=move || doors().into_iter().enumerate()
                                    key=|(slot, door)| (*slot, door.id.clone())
                                    children=move |(slot, door)| {
                                        let (left, width) = config.with_value(|c| {
                                            (proximity::slot_left(slot, c), c.door_width)
                                        });
                                        view! { <DoorTile door=door left=left width=width on_open=on_open_door /> }
                                    }
                                />
                            </section>
                        }
                    }
                />
            </Show>
            <Show when=move || floors.with(FloorSet::is_empty)>
                <div class="facade-empty">"No doors for this term yet."</div>
            </Show>
        </div>
    }
}

#[component]
fn DoorTile(door: Door, left: f64, width: f64, on_open: Callback<String>) -> impl IntoView {
    let id = door.id.clone();
    let style_class = format!("door-tile door-style-{}", door.style.as_deref().unwrap_or("normal"));

    view! {
        <button
            class=style_class
            style=format!("left: {}px; width: {}px", left, width)
            title=format!("Door {} · {}", door.door_number, door.name_of_owner)
            on:click=move |_| on_open.run(id.clone())
        >
            <img class="door-image" src=door.image_url.clone() alt=format!("Door {}", door.door_number) loading="lazy" />
            <span class="door-number">{door.door_number}</span>
        </button>
    }
}
