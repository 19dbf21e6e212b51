use std::time::Duration;

use parking_lot::RwLock;
use souvlaki::{MediaControls, MediaMetadata, MediaPlayback, MediaPosition, PlatformConfig};

pub use souvlaki::MediaControlEvent;

/// Thin wrapper around the OS media session. Construction can fail (no
/// session bus, or no window handle on Windows); in that case `controls`
/// stays `None` and every call below is a silent no-op, so playback works
/// without the system integration.
pub struct MediaControlsManager {
    controls: RwLock<Option<MediaControls>>,
}

unsafe impl Send for MediaControlsManager {}
unsafe impl Sync for MediaControlsManager {}

impl Default for MediaControlsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaControlsManager {
    pub fn new() -> Self {
        let config = PlatformConfig {
            dbus_name: "vireo",
            display_name: "Vireo",
            hwnd: None,
        };

        let controls = MediaControls::new(config).ok();
        if controls.is_none() {
            log::warn!("System media controls unavailable, continuing without them");
        }
        Self {
            controls: RwLock::new(controls),
        }
    }

    pub fn attach_handler<F>(&self, handler: F)
    where
        F: Fn(MediaControlEvent) + Send + 'static,
    {
        if let Some(ref mut controls) = *self.controls.write() {
            let _ = controls.attach(handler);
        }
    }

    /// Publish the current track. Only the title is known here; streams
    /// carry no artist or album tags worth showing.
    pub fn set_metadata(&self, title: &str) {
        if let Some(ref mut controls) = *self.controls.write() {
            let _ = controls.set_metadata(MediaMetadata {
                title: Some(title),
                ..Default::default()
            });
        }
    }

    pub fn set_playback(&self, playing: bool, position_secs: Option<f64>) {
        if let Some(ref mut controls) = *self.controls.write() {
            let progress = position_secs.map(|secs| MediaPosition(Duration::from_secs_f64(secs)));

            let playback = if playing {
                MediaPlayback::Playing { progress }
            } else {
                MediaPlayback::Paused { progress }
            };
            let _ = controls.set_playback(playback);
        }
    }

    pub fn set_stopped(&self) {
        if let Some(ref mut controls) = *self.controls.write() {
            let _ = controls.set_playback(MediaPlayback::Stopped);
        }
    }
}
