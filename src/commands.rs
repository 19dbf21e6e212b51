use std::sync::Arc;

use serde::Serialize;
use tauri::{AppHandle, Emitter, State};

use crate::errors::AppError;
use crate::library::Library;
use crate::models::{Playlist, Song};
use crate::playback::PlaybackManager;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackStatus {
    pub playing: bool,
    pub title: Option<String>,
}

#[tauri::command]
pub async fn create_playlist(
    app: AppHandle,
    library: State<'_, Arc<Library>>,
    name: String,
) -> Result<Playlist, AppError> {
    log::info!("Creating playlist {}", name);
    let playlist = library.create_playlist(name);
    let _ = app.emit("playlists-changed", ());
    Ok(playlist)
}

/// Kick off a playlist import in the background and return right away; the
/// frontend hears about the outcome through change events.
#[tauri::command]
pub async fn import_playlist(
    app: AppHandle,
    library: State<'_, Arc<Library>>,
    url: String,
) -> Result<(), AppError> {
    log::info!("Importing playlist from {}", url);
    let library = library.inner().clone();
    tauri::async_runtime::spawn(async move {
        if library.import_playlist(url).await {
            let _ = app.emit("playlists-changed", ());
            let _ = app.emit("songs-changed", ());
        }
    });
    Ok(())
}

#[tauri::command]
pub async fn add_song(
    app: AppHandle,
    library: State<'_, Arc<Library>>,
    playlist_id: u64,
    url: String,
) -> Result<(), AppError> {
    log::info!("Adding song from {} to playlist {}", url, playlist_id);
    let library = library.inner().clone();
    tauri::async_runtime::spawn(async move {
        if library.add_song(playlist_id, url).await {
            let _ = app.emit("songs-changed", ());
        }
    });
    Ok(())
}

#[tauri::command]
pub async fn sync_playlist(
    app: AppHandle,
    library: State<'_, Arc<Library>>,
    playlist_id: u64,
) -> Result<(), AppError> {
    let playlist = library
        .playlist(playlist_id)
        .ok_or(AppError::PlaylistNotFound(playlist_id))?;
    log::info!("Syncing playlist {}", playlist.name);
    let library = library.inner().clone();
    tauri::async_runtime::spawn(async move {
        if library.sync_playlist(playlist).await {
            let _ = app.emit("songs-changed", ());
        }
    });
    Ok(())
}

#[tauri::command]
pub async fn get_playlists(library: State<'_, Arc<Library>>) -> Result<Vec<Playlist>, AppError> {
    Ok(library.playlists())
}

#[tauri::command]
pub async fn get_songs(
    library: State<'_, Arc<Library>>,
    playlist_id: u64,
) -> Result<Vec<Song>, AppError> {
    Ok(library.songs_for_playlist(playlist_id))
}

#[tauri::command]
pub async fn play_song(
    app: AppHandle,
    library: State<'_, Arc<Library>>,
    playback: State<'_, Arc<PlaybackManager>>,
    song_id: u64,
) -> Result<(), AppError> {
    let song = library
        .song(song_id)
        .ok_or(AppError::SongNotFound(song_id))?;
    log::info!("Playing {}", song.title);

    library.reset_queue(song.clone());
    let _ = app.emit("track-changed", song.clone());
    playback.play(&song).await;
    Ok(())
}

/// Step the queue forward and start whatever comes up. Shared between the
/// `next_song` command and the media-key handler.
pub(crate) async fn advance_and_play(
    app: &AppHandle,
    library: &Arc<Library>,
    playback: &Arc<PlaybackManager>,
) {
    let Some(song) = library.advance_queue() else {
        log::debug!("End of queue, nothing to play");
        return;
    };
    let _ = app.emit("track-changed", song.clone());
    playback.play(&song).await;
}

#[tauri::command]
pub async fn next_song(
    app: AppHandle,
    library: State<'_, Arc<Library>>,
    playback: State<'_, Arc<PlaybackManager>>,
) -> Result<(), AppError> {
    advance_and_play(&app, library.inner(), playback.inner()).await;
    Ok(())
}

#[tauri::command]
pub async fn enqueue_next(
    app: AppHandle,
    library: State<'_, Arc<Library>>,
    playback: State<'_, Arc<PlaybackManager>>,
    song_id: u64,
) -> Result<(), AppError> {
    let song = library
        .song(song_id)
        .ok_or(AppError::SongNotFound(song_id))?;

    if library.enqueue_after_current(song.clone()) {
        log::info!("Queued {} after the current song", song.title);
        return Ok(());
    }

    // Nothing queued yet, start playing right away.
    library.reset_queue(song.clone());
    let _ = app.emit("track-changed", song.clone());
    playback.play(&song).await;
    Ok(())
}

#[tauri::command]
pub async fn toggle_playback(playback: State<'_, Arc<PlaybackManager>>) -> Result<(), AppError> {
    playback.toggle();
    Ok(())
}

#[tauri::command]
pub async fn stop_playback(playback: State<'_, Arc<PlaybackManager>>) -> Result<(), AppError> {
    playback.stop();
    Ok(())
}

#[tauri::command]
pub async fn playback_status(
    playback: State<'_, Arc<PlaybackManager>>,
) -> Result<PlaybackStatus, AppError> {
    Ok(PlaybackStatus {
        playing: playback.is_playing(),
        title: playback.current_title(),
    })
}
