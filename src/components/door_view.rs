use chalkipie_core::Door;
use leptos::prelude::*;

/// Full-size view of one door
#[component]
pub fn DoorView(door: ReadSignal<Option<Door>>, on_close: WriteSignal<Option<Door>>) -> impl IntoView {
    view! {
        {move || door.get().map(|door| {
            let taken = door.created_at.with_timezone(&chrono::Local).format("%-d %B %Y").to_string();
            let term = door.term().display_name();
            view! {
                <div class="modal-backdrop" on:click=move |_| on_close.set(None)>
                    <div class="door-view" on:click=|ev| ev.stop_propagation()>
                        <div class="door-view-header">
                            <h2>{format!("Door {}", door.door_number)}</h2>
                            <button class="close-btn" on:click=move |_| on_close.set(None)>"×"</button>
                        </div>
                        <img class="door-view-image" src=door.image_url.clone() alt=format!("Door {}", door.door_number) />
                        <dl class="door-view-meta">
                            <dt>"Owner"</dt>
                            <dd>{door.name_of_owner.clone()}</dd>
                            <dt>"Term"</dt>
                            <dd>{term}</dd>
                            <dt>"Level"</dt>
                            <dd>{door.floor}</dd>
                            <dt>"Added"</dt>
                            <dd>{taken}</dd>
                            {door.status.clone().map(|status| view! {
                                <dt>"Status"</dt>
                                <dd class=format!("door-status status-{}", status)>{status.clone()}</dd>
                            })}
                        </dl>
                    </div>
                </div>
            }
        })}
    }
}
