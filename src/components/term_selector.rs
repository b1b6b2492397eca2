use chalkipie_core::AcademicTerm;
use leptos::prelude::*;

/// Academic term dropdown, newest term first
#[component]
pub fn TermSelector(
    terms: Vec<AcademicTerm>,
    term: ReadSignal<Option<AcademicTerm>>,
    set_term: WriteSignal<Option<AcademicTerm>>,
) -> impl IntoView {
    let options = StoredValue::new(terms);

    view! {
        <select
            class="term-dropdown"
            prop:value=move || term.get().map(|t| t.key()).unwrap_or_default()
            on:change=move |ev| {
                let key = event_target_value(&ev);
                let selected = options.with_value(|terms| terms.iter().find(|t| t.key() == key).cloned());
                set_term.set(selected);
            }
        >
            <For
                each=move || options.get_value()
                key=|t| t.key()
                children=move |t| {
                    view! { <option value=t.key()>{t.display_name()}</option> }
                }
            />
        </select>
    }
}
