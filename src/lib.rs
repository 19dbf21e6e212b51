pub mod commands;
pub mod errors;
pub mod library;
pub mod media_controls;
pub mod models;
pub mod playback;
pub mod providers;
pub mod queue;

use std::sync::Arc;

use library::Library;
use media_controls::MediaControlEvent;
use playback::PlaybackManager;
use providers::{StreamProvider, YoutubeProvider};
use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let handle = app.handle().clone();

            let provider: Arc<dyn StreamProvider> = Arc::new(YoutubeProvider::new());
            let library = Arc::new(Library::new(provider.clone()));
            let playback = Arc::new(PlaybackManager::new(handle.clone(), provider));

            // Wire the OS media keys to the same paths the UI buttons use.
            let playback_for_controls = playback.clone();
            let library_for_controls = library.clone();
            let app_for_controls = handle;
            playback
                .media_controls
                .attach_handler(move |event| match event {
                    MediaControlEvent::Play
                    | MediaControlEvent::Pause
                    | MediaControlEvent::Toggle => {
                        playback_for_controls.toggle();
                    }
                    MediaControlEvent::Next => {
                        let app = app_for_controls.clone();
                        let library = library_for_controls.clone();
                        let playback = playback_for_controls.clone();
                        tauri::async_runtime::spawn(async move {
                            commands::advance_and_play(&app, &library, &playback).await;
                        });
                    }
                    MediaControlEvent::Stop => {
                        playback_for_controls.stop();
                    }
                    _ => {}
                });

            app.manage(library);
            app.manage(playback);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::create_playlist,
            commands::import_playlist,
            commands::add_song,
            commands::sync_playlist,
            commands::get_playlists,
            commands::get_songs,
            commands::play_song,
            commands::next_song,
            commands::enqueue_next,
            commands::toggle_playback,
            commands::stop_playback,
            commands::playback_status
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
