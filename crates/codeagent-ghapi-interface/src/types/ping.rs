use serde::Deserialize;

use super::{GhRepository, GhUser};

/// GitHub Ping event.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct GhPingEvent {
    /// Zen text.
    #[serde(default)]
    pub zen: String,
    /// Hook ID.
    #[serde(default)]
    pub hook_id: u64,
    /// Repository.
    pub repository: Option<GhRepository>,
    /// Sender.
    pub sender: Option<GhUser>,
}
