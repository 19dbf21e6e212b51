use anyhow::{anyhow, Result};
use async_trait::async_trait;
use rusty_ytdl::search::{Playlist, PlaylistSearchOptions};
use rusty_ytdl::Video;

use super::{RemotePlaylist, RemoteTrack, StreamProvider};

/// Stream provider backed by YouTube. Playlist and video pages are resolved
/// with `rusty_ytdl`, which also deciphers the direct stream URLs.
pub struct YoutubeProvider;

impl YoutubeProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for YoutubeProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StreamProvider for YoutubeProvider {
    async fn fetch_playlist(&self, url: &str) -> Result<RemotePlaylist> {
        let options = PlaylistSearchOptions {
            fetch_all: true,
            ..Default::default()
        };
        let playlist = Playlist::get(url, Some(&options)).await?;

        let tracks = playlist
            .videos
            .into_iter()
            .map(|video| RemoteTrack {
                title: video.title,
                url: video.url,
            })
            .collect();

        Ok(RemotePlaylist {
            title: playlist.name,
            tracks,
        })
    }

    async fn fetch_track(&self, url: &str) -> Result<RemoteTrack> {
        let video = Video::new(url)?;
        let info = video.get_info().await?;
        let details = info.video_details;

        Ok(RemoteTrack {
            title: details.title,
            url: details.video_url,
        })
    }

    async fn stream_url(&self, url: &str) -> Result<String> {
        let video = Video::new(url)?;
        let info = video.get_info().await?;

        // Audio-only streams first. itag 140 is the AAC stream present on
        // nearly every video; the player decodes AAC but not WebM Opus, so
        // it outranks higher-bitrate Opus formats. Fall back to a combined
        // stream when the page offers nothing audio-only.
        let format = info
            .formats
            .iter()
            .filter(|f| f.has_audio && !f.has_video)
            .max_by_key(|f| (f.itag == 140, f.audio_bitrate.unwrap_or(0)))
            .or_else(|| info.formats.iter().find(|f| f.has_audio))
            .ok_or_else(|| anyhow!("no playable audio format for {}", url))?;

        Ok(format.url.clone())
    }
}
