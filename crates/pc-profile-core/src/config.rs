use pc_types::{CurrentProfile, DEFAULT_STATUS};
use tracing::warn;

pub const DEFAULT_CONTACT_BASE_URL: &str = "https://x.com";
pub const DEFAULT_LEADERBOARD_SIZE: usize = 10;

#[derive(Debug, Clone)]
pub struct ProfileCardConfig {
    /// Rendered when no current profile has been saved.
    pub placeholder: CurrentProfile,
    pub contact_base_url: String,
    pub leaderboard_size: usize,
}

impl Default for ProfileCardConfig {
    fn default() -> Self {
        Self {
            placeholder: CurrentProfile {
                name: "MONAD".to_owned(),
                title: "Currently Testnet".to_owned(),
                handle: "monad_xyz".to_owned(),
                status: DEFAULT_STATUS.to_owned(),
                avatar_url: "https://docs.monad.xyz/img/monad_logo.png".to_owned(),
            },
            contact_base_url: DEFAULT_CONTACT_BASE_URL.to_owned(),
            leaderboard_size: DEFAULT_LEADERBOARD_SIZE,
        }
    }
}

impl ProfileCardConfig {
    /// Defaults overlaid with `PROFILE_CARD_CONTACT_BASE` and
    /// `PROFILE_CARD_LEADERBOARD_SIZE` when set.
    pub fn from_env() -> Self {
        Self::default().with_overrides(
            std::env::var("PROFILE_CARD_CONTACT_BASE").ok(),
            std::env::var("PROFILE_CARD_LEADERBOARD_SIZE").ok(),
        )
    }

    fn with_overrides(mut self, contact_base: Option<String>, leaderboard_size: Option<String>) -> Self {
        if let Some(base) = contact_base.filter(|value| !value.trim().is_empty()) {
            self.contact_base_url = base.trim().trim_end_matches('/').to_owned();
        }

        if let Some(raw) = leaderboard_size {
            match raw.trim().parse::<usize>() {
                Ok(size) => self.leaderboard_size = size,
                Err(err) => warn!("ignoring PROFILE_CARD_LEADERBOARD_SIZE={}: {}", raw, err),
            }
        }

        self
    }
}
