use wasm_bindgen::prelude::*;

use crate::models::Options;

/// Convert share links with options coming from the UI
///
/// `options` uses the UI's camelCase keys (`isFullConfig`, `useFakeIp`,
/// `customServer`, ...); `undefined` or `null` means all defaults.
#[wasm_bindgen]
pub fn convert(links: &str, options: JsValue) -> Result<String, JsValue> {
    let options: Options = if options.is_undefined() || options.is_null() {
        Options::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsValue::from_str(&format!("Invalid options: {}", e)))?
    };

    crate::interfaces::convert(links, &options).map_err(|e| {
        log::error!("Conversion failed: {}", e);
        JsValue::from_str(&e.to_string())
    })
}
