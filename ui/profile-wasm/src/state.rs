//! Page state.
//!
//! Uses `RefCell`-wrapped `thread_local!` storage (WASM is single-threaded).

use crate::storage::BrowserStorage;
use pc_profile_core::ProfileCardController;
use pc_security::SecurityManager;
use std::cell::RefCell;

pub type Controller = ProfileCardController<BrowserStorage>;

pub struct PageState {
    pub controller: Controller,
    /// Held for the page's lifetime so the security session outlives boot.
    pub security: SecurityManager,
    pub settings_open: bool,
}

thread_local! {
    static STATE: RefCell<Option<PageState>> = const { RefCell::new(None) };
}

pub fn install(controller: Controller, security: SecurityManager) {
    STATE.with(|s| {
        *s.borrow_mut() = Some(PageState {
            controller,
            security,
            settings_open: false,
        })
    });
}

/// Run a closure with shared access to the page state. `None` before `install`.
pub fn with<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&PageState) -> R,
{
    STATE.with(|s| s.borrow().as_ref().map(f))
}

/// Run a closure with mutable access to the page state.
pub fn with_mut<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut PageState) -> R,
{
    STATE.with(|s| s.borrow_mut().as_mut().map(f))
}
