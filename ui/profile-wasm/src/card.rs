//! Profile card rendering and the settings/edit form.

use crate::dom::{self, Elements};
use crate::leaderboard;
use crate::state;
use pc_types::CurrentProfile;
use tracing::warn;

pub fn render_card(els: &Elements) {
    let Some(profile) = state::with(|s| s.controller.current().clone()) else {
        return;
    };

    els.avatar.set_src(&profile.avatar_url);
    els.avatar.set_alt(&profile.name);
    dom::set_text(&els.name, &profile.name);
    dom::set_text(&els.title, &profile.title);
    dom::set_text(&els.handle, &format!("@{}", profile.handle));
    dom::set_text(&els.status, &profile.status);
}

fn fill_edit_form(els: &Elements, profile: &CurrentProfile) {
    dom::set_input_value(&els.edit_name, &profile.name);
    dom::set_input_value(&els.edit_title, &profile.title);
    dom::set_input_value(&els.edit_handle, &profile.handle);
    dom::set_input_value(&els.edit_avatar, &profile.avatar_url);
    els.edit_status.set_value(&profile.status);
}

pub fn on_toggle_settings(els: &Elements) {
    let Some((open, profile)) = state::with_mut(|s| {
        s.settings_open = !s.settings_open;
        (s.settings_open, s.controller.current().clone())
    }) else {
        return;
    };

    if open {
        fill_edit_form(els, &profile);
    }
    dom::toggle_class(&els.settings_panel, "open", open);
}

/// Save the edit form as the current profile.
pub fn on_save_profile(els: &Elements) {
    let edited = CurrentProfile {
        name: dom::get_input_value(&els.edit_name),
        title: dom::get_input_value(&els.edit_title),
        handle: dom::get_input_value(&els.edit_handle),
        status: els.edit_status.value(),
        avatar_url: dom::get_input_value(&els.edit_avatar),
    };

    if state::with_mut(|s| s.controller.on_update(&edited)).is_none() {
        warn!("profile edit before page state was installed");
        return;
    }

    render_card(els);
    leaderboard::render_leaderboard(els);
    leaderboard::on_search_input(els);
}

/// Open the current handle's X profile in a new tab.
pub fn on_contact_click() {
    let Some(url) = state::with(|s| s.controller.contact_url()) else {
        return;
    };

    let opened = dom::window().and_then(|w| w.open_with_url_and_target(&url, "_blank"));
    if let Err(err) = opened {
        warn!("failed to open {}: {:?}", url, err);
    }
}
