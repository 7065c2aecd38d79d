//! Profile Card WASM Frontend
//!
//! Browser page controller: restores the current profile, renders the card and
//! wires the edit form, contact link and search/leaderboard panel.

pub mod card;
pub mod dom;
pub mod events;
pub mod leaderboard;
pub mod state;
pub mod storage;

use pc_profile_core::{ProfileCardConfig, ProfileCardController, SessionState};
use pc_security::SecurityManager;
use wasm_bindgen::prelude::*;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default_with_config(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(tracing::Level::INFO)
            .build(),
    );

    init()
}

/// Main initialisation sequence.
fn init() -> Result<(), JsValue> {
    let els = dom::Elements::bind()?;

    let local = storage::BrowserStorage::local().map_err(to_js)?;
    let session_storage = storage::BrowserStorage::session().map_err(to_js)?;

    // One security manager per page session
    let security = SecurityManager::new();
    let mut session = SessionState::load(&session_storage);

    let mut controller = ProfileCardController::new(local, ProfileCardConfig::default());
    controller.boot(&mut session, &security);
    session.persist(&session_storage);
    if let Some(security_session) = security.session() {
        tracing::info!("page session {}", security_session.session_id);
    }

    state::install(controller, security);

    card::render_card(&els);
    leaderboard::render_leaderboard(&els);

    events::bind_events(&els)?;

    Ok(())
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
