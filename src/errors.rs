use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(u64),

    #[error("Song not found: {0}")]
    SongNotFound(u64),
}
