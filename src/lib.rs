mod app;
mod components;
mod config;
mod data;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&format!("chalkipie {} ({})", env!("BUILD_HASH"), env!("BUILD_TIMESTAMP")).into());
    leptos::mount::mount_to_body(app::App);
}
