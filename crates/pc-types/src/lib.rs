use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_STATUS: &str = "Online";

fn default_status() -> String {
    DEFAULT_STATUS.to_owned()
}

/// Stored JSON may carry `null` where a value is expected; read it as the default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_status<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_status))
}

/// Returns `status` unless it is blank, in which case the default status is used.
pub fn normalize_status(status: &str) -> String {
    if status.trim().is_empty() {
        default_status()
    } else {
        status.to_owned()
    }
}

/// A stored profile, keyed by `handle`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub handle: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub avatar_url: String,
    #[serde(default = "default_status", deserialize_with = "null_as_status")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub search_count: u64,
}

impl ProfileRecord {
    pub fn displayable(&self) -> CurrentProfile {
        CurrentProfile {
            name: self.name.clone(),
            title: self.title.clone(),
            handle: self.handle.clone(),
            status: self.status.clone(),
            avatar_url: self.avatar_url.clone(),
        }
    }
}

/// The profile the card is currently displaying.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CurrentProfile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    pub handle: String,
    #[serde(default = "default_status", deserialize_with = "null_as_status")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub avatar_url: String,
}

impl CurrentProfile {
    /// Copy with a blank status replaced by the default.
    pub fn normalized(&self) -> Self {
        Self {
            status: normalize_status(&self.status),
            ..self.clone()
        }
    }
}

/// Input to a store upsert.
///
/// `search_count: None` keeps the stored counter (or 0 for a new handle).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub handle: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub avatar_url: String,
    #[serde(default = "default_status", deserialize_with = "null_as_status")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_count: Option<u64>,
}

impl ProfileUpdate {
    pub fn with_search_count(mut self, search_count: u64) -> Self {
        self.search_count = Some(search_count);
        self
    }

    pub fn into_record(self, prior_search_count: u64) -> ProfileRecord {
        ProfileRecord {
            search_count: self.search_count.unwrap_or(prior_search_count),
            handle: self.handle,
            name: self.name,
            title: self.title,
            avatar_url: self.avatar_url,
            status: self.status,
        }
    }
}

impl From<CurrentProfile> for ProfileUpdate {
    fn from(profile: CurrentProfile) -> Self {
        Self {
            handle: profile.handle,
            name: profile.name,
            title: profile.title,
            avatar_url: profile.avatar_url,
            status: profile.status,
            search_count: None,
        }
    }
}

impl From<ProfileRecord> for CurrentProfile {
    fn from(record: ProfileRecord) -> Self {
        Self {
            name: record.name,
            title: record.title,
            handle: record.handle,
            status: record.status,
            avatar_url: record.avatar_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_decodes_camel_case_with_defaults() {
        let raw = r#"[{"handle":"alice","avatarUrl":"u","searchCount":3},{"handle":"bob"}]"#;
        let records: Vec<ProfileRecord> = serde_json::from_str(raw).unwrap();

        assert_eq!(records[0].avatar_url, "u");
        assert_eq!(records[0].search_count, 3);
        assert_eq!(records[0].status, DEFAULT_STATUS);
        assert_eq!(records[1].name, "");
        assert_eq!(records[1].search_count, 0);
    }

    #[test]
    fn null_fields_decode_as_defaults() {
        let raw = r#"{"handle":"alice","name":null,"avatarUrl":null,"status":null,"searchCount":null}"#;
        let record: ProfileRecord = serde_json::from_str(raw).unwrap();

        assert_eq!(record.name, "");
        assert_eq!(record.avatar_url, "");
        assert_eq!(record.status, DEFAULT_STATUS);
        assert_eq!(record.search_count, 0);

        let current: CurrentProfile =
            serde_json::from_str(r#"{"handle":"bob","title":null,"status":null}"#).unwrap();
        assert_eq!(current.title, "");
        assert_eq!(current.status, DEFAULT_STATUS);
    }

    #[test]
    fn current_profile_uses_wire_field_names() {
        let profile = CurrentProfile {
            name: "Alice".into(),
            title: "T".into(),
            handle: "alice".into(),
            status: "Away".into(),
            avatar_url: "u".into(),
        };
        let value = serde_json::to_value(&profile).unwrap();

        assert_eq!(value["avatarUrl"], "u");
        assert!(value.get("searchCount").is_none());
    }

    #[test]
    fn blank_status_normalizes_to_online() {
        assert_eq!(normalize_status(""), "Online");
        assert_eq!(normalize_status("  "), "Online");
        assert_eq!(normalize_status("Busy"), "Busy");
    }

    #[test]
    fn update_without_count_takes_prior() {
        let update = ProfileUpdate {
            handle: "alice".into(),
            name: "Alice".into(),
            title: String::new(),
            avatar_url: String::new(),
            status: "Online".into(),
            search_count: None,
        };

        assert_eq!(update.clone().into_record(5).search_count, 5);
        assert_eq!(update.with_search_count(9).into_record(5).search_count, 9);
    }
}
