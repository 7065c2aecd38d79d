//! Search results and leaderboard lists.
//!
//! Items carry `data-handle`; a single delegated click listener (see
//! `events`) turns a click into a profile selection.

use crate::card;
use crate::dom::{self, Elements};
use crate::state;
use pc_types::ProfileRecord;
use tracing::warn;
use wasm_bindgen::JsValue;

fn render_list(list: &web_sys::Element, records: &[ProfileRecord]) -> Result<(), JsValue> {
    dom::clear(list);
    for record in records {
        let item = dom::create_element("li")?;
        item.set_attribute("data-handle", &record.handle)?;
        let label = if record.name.is_empty() {
            format!("@{} · {}", record.handle, record.search_count)
        } else {
            format!("{} (@{}) · {}", record.name, record.handle, record.search_count)
        };
        dom::set_text(&item, &label);
        list.append_child(&item)?;
    }
    Ok(())
}

pub fn render_leaderboard(els: &Elements) {
    let records = state::with(|s| s.controller.leaderboard()).unwrap_or_default();
    if let Err(err) = render_list(&els.leaderboard, &records) {
        warn!("failed to render leaderboard: {:?}", err);
    }
}

pub fn on_search_input(els: &Elements) {
    let query = dom::get_input_value(&els.search_input);
    let hits = state::with(|s| s.controller.search(&query)).unwrap_or_default();
    if let Err(err) = render_list(&els.search_results, &hits) {
        warn!("failed to render search results: {:?}", err);
    }
}

/// Select the stored profile for `handle` and re-render the card.
pub fn on_profile_select(els: &Elements, handle: &str) {
    let selected = state::with_mut(|s| {
        let record = s.controller.store().find_by_handle(handle)?;
        Some(s.controller.on_select(&record.displayable()).clone())
    })
    .flatten();

    if selected.is_none() {
        warn!("selected profile {} is not stored", handle);
        return;
    }

    card::render_card(els);
}
