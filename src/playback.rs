use std::io::Cursor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use parking_lot::RwLock;
use rodio::{Decoder, OutputStream, Sink};
use tauri::{AppHandle, Emitter};

use crate::media_controls::MediaControlsManager;
use crate::models::Song;
use crate::providers::StreamProvider;

enum PlayerCommand {
    Play { stream_url: String },
    Toggle,
    Stop,
}

/// Owns the audio side of the app. The output device handle cannot leave
/// the thread it was created on, so all sink work happens on a dedicated
/// player thread and this struct only exchanges commands with it.
pub struct PlaybackManager {
    provider: Arc<dyn StreamProvider>,
    command_tx: Sender<PlayerCommand>,
    is_playing: Arc<AtomicBool>,
    current_title: Arc<RwLock<Option<String>>>,
    pub media_controls: Arc<MediaControlsManager>,
}

impl PlaybackManager {
    pub fn new(app: AppHandle, provider: Arc<dyn StreamProvider>) -> Self {
        let (command_tx, command_rx) = crossbeam_channel::unbounded();
        let is_playing = Arc::new(AtomicBool::new(false));
        let media_controls = Arc::new(MediaControlsManager::new());

        let loop_playing = is_playing.clone();
        let loop_media = media_controls.clone();
        thread::spawn(move || {
            player_loop(app, command_rx, loop_playing, loop_media);
        });

        Self {
            provider,
            command_tx,
            is_playing,
            current_title: Arc::new(RwLock::new(None)),
            media_controls,
        }
    }

    /// Resolve the song to a raw audio stream and hand it to the player
    /// thread. The media session shows the title right away, even while
    /// resolution is still in flight; a failed resolution is logged and
    /// leaves the previous playback state alone.
    pub async fn play(&self, song: &Song) {
        *self.current_title.write() = Some(song.title.clone());
        self.media_controls.set_metadata(&song.title);

        match self.provider.stream_url(&song.url).await {
            Ok(stream_url) => {
                log::info!("Resolved stream for {}", song.title);
                let _ = self.command_tx.send(PlayerCommand::Play { stream_url });
            }
            Err(e) => {
                log::warn!("Stream resolution failed for {}: {}", song.url, e);
            }
        }
    }

    pub fn toggle(&self) {
        let _ = self.command_tx.send(PlayerCommand::Toggle);
    }

    pub fn stop(&self) {
        let _ = self.command_tx.send(PlayerCommand::Stop);
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing.load(Ordering::Relaxed)
    }

    pub fn current_title(&self) -> Option<String> {
        self.current_title.read().clone()
    }
}

fn player_loop(
    app: AppHandle,
    command_rx: Receiver<PlayerCommand>,
    is_playing: Arc<AtomicBool>,
    media_controls: Arc<MediaControlsManager>,
) {
    let (_stream, handle) = match OutputStream::try_default() {
        Ok(pair) => pair,
        Err(e) => {
            log::error!("[Player] No audio output device: {}", e);
            return;
        }
    };
    let sink = match Sink::try_new(&handle) {
        Ok(sink) => sink,
        Err(e) => {
            log::error!("[Player] Failed to create sink: {}", e);
            return;
        }
    };
    let http = reqwest::blocking::Client::new();

    log::info!("[Player] Started");

    loop {
        match command_rx.recv_timeout(Duration::from_secs(1)) {
            Ok(PlayerCommand::Play { stream_url }) => {
                sink.stop();
                match fetch_and_decode(&http, &stream_url) {
                    Ok(source) => {
                        sink.append(source);
                        sink.play();
                        is_playing.store(true, Ordering::Relaxed);
                        media_controls.set_playback(true, Some(0.0));
                        let _ = app.emit("playback-state-changed", true);
                    }
                    Err(e) => {
                        log::warn!("[Player] Could not start stream: {}", e);
                        is_playing.store(false, Ordering::Relaxed);
                        media_controls.set_stopped();
                        let _ = app.emit("playback-state-changed", false);
                    }
                }
            }
            Ok(PlayerCommand::Toggle) => {
                if sink.is_paused() {
                    sink.play();
                } else {
                    sink.pause();
                }
                let playing = !sink.is_paused() && !sink.empty();
                is_playing.store(playing, Ordering::Relaxed);
                media_controls.set_playback(playing, Some(sink.get_pos().as_secs_f64()));
                let _ = app.emit("playback-state-changed", playing);
            }
            Ok(PlayerCommand::Stop) => {
                sink.stop();
                is_playing.store(false, Ordering::Relaxed);
                media_controls.set_stopped();
                let _ = app.emit("playback-state-changed", false);
            }
            Err(RecvTimeoutError::Timeout) => {
                // Heartbeat: keep the media session position fresh, and
                // notice when the sink runs out of audio on its own.
                if is_playing.load(Ordering::Relaxed) {
                    if sink.empty() {
                        is_playing.store(false, Ordering::Relaxed);
                        media_controls.set_playback(false, None);
                        let _ = app.emit("playback-state-changed", false);
                    } else if !sink.is_paused() {
                        media_controls.set_playback(true, Some(sink.get_pos().as_secs_f64()));
                    }
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}

/// Download the whole stream into memory and stand up a decoder over it.
/// Tracks are a few megabytes of audio, buffering them whole keeps the
/// player free of mid-stream network stalls.
fn fetch_and_decode(
    http: &reqwest::blocking::Client,
    url: &str,
) -> Result<Decoder<Cursor<Vec<u8>>>> {
    let response = http.get(url).send()?.error_for_status()?;
    let bytes = response.bytes()?;
    log::debug!("[Player] Fetched {} bytes", bytes.len());
    Ok(Decoder::new(Cursor::new(bytes.to_vec()))?)
}
