use serde::Serialize;

/// A named collection of songs. `source_url` is set only for playlists
/// mirrored from an external playlist URL; manually created playlists carry
/// `None`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: u64,
    pub name: String,
    pub source_url: Option<String>,
}

/// A single playable item. `url` is the watch page URL; it doubles as the
/// identity key when a sync decides what is already present, and is resolved
/// to an audio stream at play time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: u64,
    pub title: String,
    pub url: String,
    pub playlist_id: u64,
    pub manual: bool,
}
