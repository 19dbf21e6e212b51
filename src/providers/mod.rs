use anyhow::Result;
use async_trait::async_trait;

pub mod youtube;

pub use youtube::YoutubeProvider;

/// Metadata for a remote playlist plus the items it currently lists.
#[derive(Debug, Clone)]
pub struct RemotePlaylist {
    pub title: String,
    pub tracks: Vec<RemoteTrack>,
}

/// One item of a remote playlist, or a single resolved video.
#[derive(Debug, Clone)]
pub struct RemoteTrack {
    pub title: String,
    pub url: String,
}

/// The stream-extraction seam. Everything network-facing goes through this
/// trait so the rest of the app can be exercised against a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StreamProvider: Send + Sync {
    /// Resolve a playlist URL to its metadata and current item list.
    async fn fetch_playlist(&self, url: &str) -> Result<RemotePlaylist>;

    /// Resolve a single video URL to its metadata.
    async fn fetch_track(&self, url: &str) -> Result<RemoteTrack>;

    /// Resolve a video URL to a directly playable audio stream URL.
    async fn stream_url(&self, url: &str) -> Result<String>;
}
