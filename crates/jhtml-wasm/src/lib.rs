use jhtml_core::{CompileOptions, Value};
use wasm_bindgen::prelude::*;

/// Compile jHTML source. `options` is `{ doctype?: boolean, escape?: boolean }`
/// or `undefined`.
#[wasm_bindgen]
pub fn compile(source: &str, options: JsValue) -> Result<String, JsError> {
    let options = parse_options(options)?;
    jhtml_core::compile_with_options(source, &options).map_err(|e| JsError::new(&e.to_string()))
}

/// Render a tag tree that is already a JS value (object, array or string),
/// skipping the JSON5 parse.
#[wasm_bindgen(js_name = toHtml)]
pub fn to_html(value: JsValue, options: JsValue) -> Result<String, JsError> {
    let options = parse_options(options)?;
    let value: Value = if value.is_undefined() {
        Value::Null
    } else {
        serde_wasm_bindgen::from_value(value).map_err(|e| JsError::new(&e.to_string()))?
    };
    jhtml_core::to_html_with_options(&value, &options).map_err(|e| JsError::new(&e.to_string()))
}

fn parse_options(options: JsValue) -> Result<CompileOptions, JsError> {
    if options.is_undefined() || options.is_null() {
        return Ok(CompileOptions::default());
    }
    serde_wasm_bindgen::from_value(options).map_err(|e| JsError::new(&e.to_string()))
}
