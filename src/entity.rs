/// Blocked entry types for Card Warden
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// One kind of blockable entry: its storage key, popup wording, and the
/// accessors the generic scanner and popup need. The two implementations
/// differ only in their serialized label field (`name` vs `title`).
pub trait Entity: Clone + PartialEq + Serialize + DeserializeOwned + 'static {
    const STORAGE_KEY: &'static str;
    const EXPORT_FILENAME: &'static str;
    const PANEL_TITLE: &'static str;
    const RECENT_HEADING: &'static str;
    const TOTAL_LABEL: &'static str;
    const EMPTY_MESSAGE: &'static str;
    const SEARCH_PLACEHOLDER: &'static str;

    fn new(id: String, label: String) -> Self;
    fn id(&self) -> &str;
    fn label(&self) -> &str;
}

/// A hidden friend, keyed by the numeric user id from the profile URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlockedFriend {
    pub id: String,
    pub name: String,
}

impl Entity for BlockedFriend {
    const STORAGE_KEY: &'static str = "blockedFriends";
    const EXPORT_FILENAME: &'static str = "hidden_friends.json";
    const PANEL_TITLE: &'static str = "Hidden Friends";
    const RECENT_HEADING: &'static str = "Recently Hidden";
    const TOTAL_LABEL: &'static str = "Total hidden friends";
    const EMPTY_MESSAGE: &'static str = "No hidden friends";
    const SEARCH_PLACEHOLDER: &'static str = "Search hidden friends...";

    fn new(id: String, label: String) -> Self {
        BlockedFriend { id, name: label }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }
}

/// A blocked game, keyed by the numeric universe id from the game URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlockedGame {
    pub id: String,
    pub title: String,
}

impl Entity for BlockedGame {
    const STORAGE_KEY: &'static str = "blockedGames";
    const EXPORT_FILENAME: &'static str = "blocked_games.json";
    const PANEL_TITLE: &'static str = "Blocked Games";
    const RECENT_HEADING: &'static str = "Recently Blocked";
    const TOTAL_LABEL: &'static str = "Total blocked games";
    const EMPTY_MESSAGE: &'static str = "No blocked games";
    const SEARCH_PLACEHOLDER: &'static str = "Search blocked games...";

    fn new(id: String, label: String) -> Self {
        BlockedGame { id, title: label }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.title
    }
}
