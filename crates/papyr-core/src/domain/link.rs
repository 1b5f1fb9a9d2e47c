use serde::{Deserialize, Serialize};

/// Friend-link entry - one row of the link directory.
///
/// The directory is read-mostly and replaced as a whole list on edit; entries
/// are not individually addressable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendLink {
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
}
