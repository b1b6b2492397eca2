//! Engine configuration for the page
//!
//! Compiled defaults, optionally overridden by a JSON object the host page
//! publishes as `window.__CHALKIPIE_CONFIG__` before the wasm module starts.

use chalkipie_core::EngineConfig;
use wasm_bindgen::JsValue;
use web_sys::console;

const OVERRIDE_KEY: &str = "__CHALKIPIE_CONFIG__";

/// Defaults merged with the page override; falls back to defaults if the
/// override does not parse or validate.
pub fn load() -> EngineConfig {
    match read_override() {
        Ok(Some(config)) => {
            console::log_1(&"config: using page override".into());
            config
        }
        Ok(None) => EngineConfig::default(),
        Err(e) => {
            console::error_1(&format!("config: ignoring {}: {}", OVERRIDE_KEY, e).into());
            EngineConfig::default()
        }
    }
}

fn read_override() -> Result<Option<EngineConfig>, String> {
    let Some(window) = web_sys::window() else {
        return Ok(None);
    };
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(OVERRIDE_KEY))
        .map_err(|e| format!("{:?}", e))?;
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }

    // Accept either a JSON string or a plain object
    let config = match value.as_string() {
        Some(json) => EngineConfig::from_json(&json).map_err(|e| e.to_string())?,
        None => {
            let config: EngineConfig = serde_wasm_bindgen::from_value(value).map_err(|e| e.to_string())?;
            config.validate().map_err(|e| e.to_string())?;
            config
        }
    };
    Ok(Some(config))
}
