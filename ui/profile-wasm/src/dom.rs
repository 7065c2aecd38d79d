//! DOM element bindings.
//!
//! All fields are resolved once at startup. To add new UI elements, add a
//! field here and bind it in `Elements::bind()`.

use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlImageElement, HtmlInputElement, HtmlSelectElement,
    Window,
};

// ── Helpers ──

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

fn doc() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

pub fn by_id(id: &str) -> Option<Element> {
    doc().ok()?.get_element_by_id(id)
}

/// Look up a required element and cast it, failing startup if it is missing.
fn required<T: JsCast>(id: &str) -> Result<T, JsValue> {
    by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("element #{id} has unexpected type")))
}

pub fn create_element(tag: &str) -> Result<Element, JsValue> {
    doc()?.create_element(tag)
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn clear(el: &Element) {
    el.set_inner_html("");
}

pub fn get_input_value(el: &HtmlInputElement) -> String {
    el.value().trim().to_string()
}

pub fn set_input_value(el: &HtmlInputElement, val: &str) {
    el.set_value(val);
}

pub fn toggle_class(el: &Element, cls: &str, on: bool) {
    let _ = el.class_list().toggle_with_force(cls, on);
}

// ── Element bindings ──

#[derive(Clone)]
pub struct Elements {
    // Card
    pub avatar: HtmlImageElement,
    pub name: Element,
    pub title: Element,
    pub handle: Element,
    pub status: Element,
    pub contact_btn: HtmlButtonElement,

    // Settings / edit form
    pub settings_btn: HtmlButtonElement,
    pub settings_panel: Element,
    pub edit_name: HtmlInputElement,
    pub edit_title: HtmlInputElement,
    pub edit_handle: HtmlInputElement,
    pub edit_avatar: HtmlInputElement,
    pub edit_status: HtmlSelectElement,
    pub save_btn: HtmlButtonElement,

    // Search / leaderboard
    pub search_input: HtmlInputElement,
    pub search_results: Element,
    pub leaderboard: Element,
}

impl Elements {
    pub fn bind() -> Result<Self, JsValue> {
        Ok(Self {
            avatar: required("cardAvatar")?,
            name: required("cardName")?,
            title: required("cardTitle")?,
            handle: required("cardHandle")?,
            status: required("cardStatus")?,
            contact_btn: required("contactBtn")?,

            settings_btn: required("settingsBtn")?,
            settings_panel: required("settingsPanel")?,
            edit_name: required("editName")?,
            edit_title: required("editTitle")?,
            edit_handle: required("editHandle")?,
            edit_avatar: required("editAvatar")?,
            edit_status: required("editStatus")?,
            save_btn: required("saveProfileBtn")?,

            search_input: required("searchInput")?,
            search_results: required("searchResults")?,
            leaderboard: required("leaderboardList")?,
        })
    }
}
