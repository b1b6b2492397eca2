use chalkipie_core::FloorSet;
use leptos::ev;
use leptos::prelude::*;

/// Modal list of floors, highest first. Escape or the backdrop closes it.
#[component]
pub fn FloorPicker(
    show: ReadSignal<bool>,
    on_close: WriteSignal<bool>,
    floors: Memo<FloorSet>,
    selected_floor: ReadSignal<Option<i32>>,
    on_select: Callback<i32>,
) -> impl IntoView {
    let escape = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" && show.get_untracked() {
            on_close.set(false);
        }
    });
    on_cleanup(move || escape.remove());

    view! {
        <Show when=move || show.get()>
            <div class="modal-backdrop" on:click=move |_| on_close.set(false)>
                <div class="floor-picker" on:click=|ev| ev.stop_propagation()>
                    <div class="floor-picker-header">
                        <h2>"Choose a floor"</h2>
                        <button class="close-btn" on:click=move |_| on_close.set(false)>"×"</button>
                    </div>
                    <div class="floor-picker-list">
                        <For
                            each=move || floors.with(|floors| floors.top_down().collect::<Vec<_>>())
                            key=|floor| *floor
                            children=move |floor| {
                                view! {
                                    <button
                                        class="floor-option"
                                        class:active=move || selected_floor.get() == Some(floor)
                                        on:click=move |_| on_select.run(floor)
                                    >
                                        {format!("Level {}", floor)}
                                    </button>
                                }
                            }
                        />
                    </div>
                </div>
            </div>
        </Show>
    }
}
