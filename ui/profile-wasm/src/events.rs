//! Event binding.
//!
//! Wires all UI event listeners. To add new events, add closures here.

use crate::card;
use crate::dom::Elements;
use crate::leaderboard;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// Helper: attach a handler for `$event` that receives a clone of the elements.
macro_rules! on_event {
    ($el:expr, $event:expr, $els:expr, $handler:expr) => {{
        let els = $els.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
            $handler(&els);
        }) as Box<dyn FnMut(_)>);
        $el.add_event_listener_with_callback($event, cb.as_ref().unchecked_ref())?;
        cb.forget();
    }};
}

/// Bind all UI event listeners. Call once after init.
pub fn bind_events(els: &Elements) -> Result<(), JsValue> {
    // ── Card ──
    on_event!(els.settings_btn, "click", els, card::on_toggle_settings);
    on_event!(els.save_btn, "click", els, card::on_save_profile);
    on_event!(els.contact_btn, "click", els, |_: &Elements| card::on_contact_click());

    // ── Search / leaderboard ──
    on_event!(els.search_input, "input", els, leaderboard::on_search_input);
    bind_profile_list(els, &els.search_results)?;
    bind_profile_list(els, &els.leaderboard)?;

    Ok(())
}

/// Delegated click handler for a list of `data-handle` items.
fn bind_profile_list(els: &Elements, list: &web_sys::Element) -> Result<(), JsValue> {
    let els = els.clone();
    let cb = Closure::wrap(Box::new(move |event: web_sys::Event| {
        let handle = event
            .target()
            .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
            .and_then(|el| el.closest("[data-handle]").ok().flatten())
            .and_then(|item| item.get_attribute("data-handle"));
        if let Some(handle) = handle {
            leaderboard::on_profile_select(&els, &handle);
        }
    }) as Box<dyn FnMut(_)>);
    list.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}
