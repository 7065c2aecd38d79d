mod config;

pub use config::{DEFAULT_CONTACT_BASE_URL, DEFAULT_LEADERBOARD_SIZE, ProfileCardConfig};

use pc_security::SecurityManager;
use pc_storage::{CurrentProfileCache, KvBackend, ProfileStore, keys};
use pc_types::{CurrentProfile, ProfileRecord, ProfileUpdate};
use tracing::{debug, info, warn};

/// Per-session boot state. Hosts keep it in session-scoped storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionState {
    pub data_cleared: bool,
}

impl SessionState {
    pub fn load<S: KvBackend + ?Sized>(session_storage: &S) -> Self {
        let data_cleared = match session_storage.get(keys::DATA_CLEARED) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(err) => {
                warn!("failed to read session flag: {}", err);
                false
            }
        };
        Self { data_cleared }
    }

    pub fn persist<S: KvBackend + ?Sized>(&self, session_storage: &S) {
        if !self.data_cleared {
            return;
        }
        if let Err(err) = session_storage.set(keys::DATA_CLEARED, "true") {
            warn!("failed to persist session flag: {}", err);
        }
    }
}

/// Page-level controller: owns the backend and the in-memory copy of the
/// profile being displayed.
pub struct ProfileCardController<B> {
    backend: B,
    config: ProfileCardConfig,
    current: CurrentProfile,
}

impl<B> ProfileCardController<B>
where
    B: KvBackend,
{
    pub fn new(backend: B, config: ProfileCardConfig) -> Self {
        let current = config.placeholder.clone();
        Self {
            backend,
            config,
            current,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &ProfileCardConfig {
        &self.config
    }

    pub fn store(&self) -> ProfileStore<'_, B> {
        ProfileStore::new(&self.backend)
    }

    pub fn cache(&self) -> CurrentProfileCache<'_, B> {
        CurrentProfileCache::new(&self.backend)
    }

    pub fn current(&self) -> &CurrentProfile {
        &self.current
    }

    /// Startup sequence: security init, once-per-session legacy reset, then
    /// restore the saved profile or fall back to the placeholder.
    pub fn boot(&mut self, session: &mut SessionState, security: &SecurityManager) -> &CurrentProfile {
        security.initialize();

        if !session.data_cleared {
            self.remove_keys(&keys::LEGACY);
            session.data_cleared = true;
            info!("cleared legacy profile data for this session");
        }

        let saved = self.cache().load();
        self.current = saved.unwrap_or_else(|| self.config.placeholder.clone());
        debug!("booted with profile {}", self.current.handle);

        &self.current
    }

    /// Display `profile`. The store and its search counts are left untouched.
    pub fn on_select(&mut self, profile: &CurrentProfile) -> &CurrentProfile {
        let selected = profile.normalized();
        self.cache().save(&selected);
        self.current = selected;
        &self.current
    }

    /// Merge an edited profile into the store, keeping its search count, and
    /// make it the current profile. The snapshot is saved even if the store
    /// write fails.
    pub fn on_update(&mut self, profile: &CurrentProfile) -> ProfileRecord {
        let edited = profile.normalized();
        if edited.handle.trim().is_empty() {
            warn!("updating profile with an empty handle");
        }

        let prior_search_count = self
            .store()
            .find_by_handle(&edited.handle)
            .map(|record| record.search_count)
            .unwrap_or(0);

        let record = self
            .store()
            .upsert(ProfileUpdate::from(edited).with_search_count(prior_search_count));

        let displayable = record.displayable();
        self.cache().save(&displayable);
        self.current = displayable;

        record
    }

    pub fn contact_url(&self) -> String {
        format!(
            "{}/{}",
            self.config.contact_base_url.trim_end_matches('/'),
            self.current.handle
        )
    }

    pub fn search(&self, query: &str) -> Vec<ProfileRecord> {
        self.store().search(query)
    }

    pub fn leaderboard(&self) -> Vec<ProfileRecord> {
        self.store().leaderboard(self.config.leaderboard_size)
    }

    /// Explicit reset: drops every persisted profile key and returns to the
    /// placeholder.
    pub fn reset_all(&mut self) {
        self.store().clear();
        self.cache().clear();
        self.remove_keys(&keys::LEGACY);
        self.current = self.config.placeholder.clone();
        info!("profile data reset");
    }

    fn remove_keys(&self, names: &[&str]) {
        for key in names {
            if let Err(err) = self.backend.remove(key) {
                warn!("failed to remove {}: {}", key, err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pc_storage::{InMemoryBackend, StorageError};

    fn controller() -> ProfileCardController<InMemoryBackend> {
        ProfileCardController::new(InMemoryBackend::new(), ProfileCardConfig::default())
    }

    fn alice(name: &str) -> CurrentProfile {
        CurrentProfile {
            name: name.to_owned(),
            title: "T".to_owned(),
            handle: "alice".to_owned(),
            status: "Online".to_owned(),
            avatar_url: "u".to_owned(),
        }
    }

    /// Rejects writes to the profile collection only.
    #[derive(Default)]
    struct BrokenProfilesBackend(InMemoryBackend);

    impl KvBackend for BrokenProfilesBackend {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if key == keys::PROFILES {
                return Err(StorageError::Backend("disk full".to_owned()));
            }
            self.0.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.0.remove(key)
        }
    }

    #[test]
    fn update_on_empty_store_inserts_with_zero_count() {
        let mut controller = controller();

        controller.on_update(&alice("Alice"));

        let records = controller.store().list();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].handle, "alice");
        assert_eq!(records[0].search_count, 0);
        assert_eq!(controller.cache().load(), Some(alice("Alice")));
        assert_eq!(controller.current(), &alice("Alice"));
    }

    #[test]
    fn update_preserves_existing_search_count() {
        let mut controller = controller();
        controller
            .store()
            .upsert(ProfileUpdate::from(alice("Alice")).with_search_count(5));

        let record = controller.on_update(&alice("Alice2"));

        assert_eq!(record.search_count, 5);
        let stored = controller.store().find_by_handle("alice").unwrap();
        assert_eq!(stored.search_count, 5);
        assert_eq!(stored.name, "Alice2");
    }

    #[test]
    fn update_fills_blank_status() {
        let mut controller = controller();
        let mut edited = alice("Alice");
        edited.status = String::new();

        let record = controller.on_update(&edited);

        assert_eq!(record.status, "Online");
        assert_eq!(controller.current().status, "Online");
    }

    #[test]
    fn select_fills_blank_status() {
        let mut controller = controller();
        let mut chosen = alice("Alice");
        chosen.status = String::new();

        controller.on_select(&chosen);

        assert_eq!(controller.current().status, "Online");
        assert_eq!(controller.cache().load().map(|p| p.status).as_deref(), Some("Online"));
    }

    #[test]
    fn snapshot_saved_even_when_store_write_fails() {
        let mut controller =
            ProfileCardController::new(BrokenProfilesBackend::default(), ProfileCardConfig::default());

        controller.on_update(&alice("Alice"));

        assert!(controller.store().list().is_empty());
        assert_eq!(controller.cache().load(), Some(alice("Alice")));
    }

    #[test]
    fn select_saves_snapshot_without_touching_store() {
        let mut controller = controller();
        controller
            .store()
            .upsert(ProfileUpdate::from(alice("Alice")).with_search_count(2));

        controller.on_select(&alice("Alice"));

        assert_eq!(controller.cache().load(), Some(alice("Alice")));
        assert_eq!(controller.store().find_by_handle("alice").map(|r| r.search_count), Some(2));
        assert_eq!(controller.store().list().len(), 1);
    }

    #[test]
    fn boot_falls_back_to_placeholder() {
        let mut controller = controller();
        let security = SecurityManager::new();
        let mut session = SessionState::default();

        let current = controller.boot(&mut session, &security).clone();

        assert_eq!(current, ProfileCardConfig::default().placeholder);
        assert!(security.is_initialized());
    }

    #[test]
    fn boot_restores_saved_profile() {
        let mut controller = controller();
        controller.cache().save(&alice("Alice"));

        let current = controller
            .boot(&mut SessionState::default(), &SecurityManager::new())
            .clone();

        assert_eq!(current, alice("Alice"));
    }

    #[test]
    fn boot_ignores_unparseable_snapshot() -> anyhow::Result<()> {
        let mut controller = controller();
        controller.backend().set(keys::CURRENT_PROFILE, "]]")?;

        let current = controller
            .boot(&mut SessionState::default(), &SecurityManager::new())
            .clone();

        assert_eq!(current.handle, "monad_xyz");
        Ok(())
    }

    #[test]
    fn legacy_reset_runs_once_per_session() -> anyhow::Result<()> {
        let mut controller = controller();
        let security = SecurityManager::new();
        for key in keys::LEGACY {
            controller.backend().set(key, "{}")?;
        }
        controller.cache().save(&alice("Alice"));
        let mut session = SessionState::default();

        controller.boot(&mut session, &security);

        assert!(session.data_cleared);
        for key in keys::LEGACY {
            assert!(!controller.backend().contains(key), "{key} should be cleared");
        }
        assert_eq!(controller.current(), &alice("Alice"));

        for key in keys::LEGACY {
            controller.backend().set(key, "{}")?;
        }
        controller.boot(&mut session, &security);

        for key in keys::LEGACY {
            assert!(controller.backend().contains(key), "{key} should survive");
        }
        Ok(())
    }

    #[test]
    fn session_flag_round_trips_through_storage() {
        let session_storage = InMemoryBackend::new();
        assert_eq!(SessionState::load(&session_storage), SessionState::default());

        SessionState { data_cleared: true }.persist(&session_storage);

        assert!(SessionState::load(&session_storage).data_cleared);
    }

    #[test]
    fn contact_url_uses_current_handle() {
        let mut controller = controller();
        assert_eq!(controller.contact_url(), "https://x.com/monad_xyz");

        controller.on_select(&alice("Alice"));
        assert_eq!(controller.contact_url(), "https://x.com/alice");
    }

    #[test]
    fn reset_all_returns_to_placeholder() {
        let mut controller = controller();
        controller.on_update(&alice("Alice"));

        controller.reset_all();

        assert!(controller.store().list().is_empty());
        assert_eq!(controller.cache().load(), None);
        assert_eq!(controller.current().handle, "monad_xyz");
    }

    #[test]
    fn leaderboard_respects_configured_size() {
        let mut config = ProfileCardConfig::default();
        config.leaderboard_size = 2;
        let controller = ProfileCardController::new(InMemoryBackend::new(), config);
        for (handle, count) in [("a", 1), ("b", 3), ("c", 2)] {
            controller.store().upsert(ProfileUpdate {
                handle: handle.to_owned(),
                name: handle.to_uppercase(),
                title: String::new(),
                avatar_url: String::new(),
                status: "Online".to_owned(),
                search_count: Some(count),
            });
        }

        let top: Vec<String> = controller.leaderboard().into_iter().map(|r| r.handle).collect();
        assert_eq!(top, vec!["b", "c"]);
        assert_eq!(controller.search("A").len(), 1);
    }
}
