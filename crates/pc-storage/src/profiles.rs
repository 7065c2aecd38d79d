//! Profile collection and current-profile snapshot.
//!
//! Both types are thin views over a [`KvBackend`]. Neither returns errors:
//! unreadable data degrades to empty/absent and failed writes are logged.

use pc_types::{CurrentProfile, ProfileRecord, ProfileUpdate};
use std::cmp::Ordering;
use tracing::warn;

use crate::{KvBackend, keys, read_json, write_json};

pub struct ProfileStore<'a, B: ?Sized> {
    backend: &'a B,
}

impl<'a, B> ProfileStore<'a, B>
where
    B: KvBackend + ?Sized,
{
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    pub fn list(&self) -> Vec<ProfileRecord> {
        match read_json::<Vec<ProfileRecord>, _>(self.backend, keys::PROFILES) {
            Ok(records) => records.unwrap_or_default(),
            Err(err) => {
                warn!("failed to read stored profiles, treating as empty: {}", err);
                Vec::new()
            }
        }
    }

    pub fn find_by_handle(&self, handle: &str) -> Option<ProfileRecord> {
        self.list().into_iter().find(|record| record.handle == handle)
    }

    /// Insert or replace the record for `update.handle` and persist the whole
    /// collection. Returns the record as built, whether or not the write landed.
    pub fn upsert(&self, update: ProfileUpdate) -> ProfileRecord {
        let mut records = self.list();

        let prior_search_count = records
            .iter()
            .find(|record| record.handle == update.handle)
            .map(|record| record.search_count)
            .unwrap_or(0);
        let record = update.into_record(prior_search_count);

        match records.iter().position(|entry| entry.handle == record.handle) {
            Some(first) => {
                records[first] = record.clone();
                let mut index = 0;
                records.retain(|entry| {
                    let keep = index <= first || entry.handle != record.handle;
                    index += 1;
                    keep
                });
            }
            None => records.push(record.clone()),
        }

        if let Err(err) = write_json(self.backend, keys::PROFILES, &records) {
            warn!("failed to persist profile {}: {}", record.handle, err);
        }

        record
    }

    /// Case-insensitive match on handle or name, best ranked first.
    pub fn search(&self, query: &str) -> Vec<ProfileRecord> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<ProfileRecord> = self
            .list()
            .into_iter()
            .filter(|record| {
                record.handle.to_lowercase().contains(&needle)
                    || record.name.to_lowercase().contains(&needle)
            })
            .collect();
        hits.sort_by(rank);
        hits
    }

    pub fn leaderboard(&self, limit: usize) -> Vec<ProfileRecord> {
        let mut records = self.list();
        records.sort_by(rank);
        records.truncate(limit);
        records
    }

    pub fn clear(&self) {
        if let Err(err) = self.backend.remove(keys::PROFILES) {
            warn!("failed to clear stored profiles: {}", err);
        }
    }
}

fn rank(a: &ProfileRecord, b: &ProfileRecord) -> Ordering {
    b.search_count
        .cmp(&a.search_count)
        .then_with(|| a.handle.cmp(&b.handle))
}

pub struct CurrentProfileCache<'a, B: ?Sized> {
    backend: &'a B,
}

impl<'a, B> CurrentProfileCache<'a, B>
where
    B: KvBackend + ?Sized,
{
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    pub fn load(&self) -> Option<CurrentProfile> {
        match read_json(self.backend, keys::CURRENT_PROFILE) {
            Ok(profile) => profile,
            Err(err) => {
                warn!("failed to load saved profile data: {}", err);
                None
            }
        }
    }

    pub fn save(&self, profile: &CurrentProfile) {
        if let Err(err) = write_json(self.backend, keys::CURRENT_PROFILE, profile) {
            warn!("failed to save current profile {}: {}", profile.handle, err);
        }
    }

    pub fn clear(&self) {
        if let Err(err) = self.backend.remove(keys::CURRENT_PROFILE) {
            warn!("failed to clear current profile: {}", err);
        }
    }
}
