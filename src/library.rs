use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::models::{Playlist, Song};
use crate::providers::StreamProvider;
use crate::queue::PlayQueue;

/// The state holder: the two process-lifetime lists plus the playback queue.
/// Nothing here is persisted; the lists live and die with the process.
pub struct Library {
    playlists: RwLock<Vec<Playlist>>,
    songs: RwLock<Vec<Song>>,
    queue: RwLock<PlayQueue>,
    playlist_id_counter: AtomicU64,
    song_id_counter: AtomicU64,
    provider: Arc<dyn StreamProvider>,
}

impl Library {
    pub fn new(provider: Arc<dyn StreamProvider>) -> Self {
        Self {
            playlists: RwLock::new(Vec::new()),
            songs: RwLock::new(Vec::new()),
            queue: RwLock::new(PlayQueue::new()),
            playlist_id_counter: AtomicU64::new(1),
            song_id_counter: AtomicU64::new(1),
            provider,
        }
    }

    fn next_playlist_id(&self) -> u64 {
        self.playlist_id_counter.fetch_add(1, Ordering::Relaxed)
    }

    fn next_song_id(&self) -> u64 {
        self.song_id_counter.fetch_add(1, Ordering::Relaxed)
    }

    pub fn create_playlist(&self, name: String) -> Playlist {
        let playlist = Playlist {
            id: self.next_playlist_id(),
            name,
            source_url: None,
        };
        self.playlists.write().push(playlist.clone());
        playlist
    }

    /// One-time import of a remote playlist: appends one playlist and one
    /// song per remote item. Returns whether anything was appended; failures
    /// are logged and swallowed.
    pub async fn import_playlist(&self, url: String) -> bool {
        let remote = match self.provider.fetch_playlist(&url).await {
            Ok(remote) => remote,
            Err(e) => {
                log::warn!("Playlist import failed for {}: {}", url, e);
                return false;
            }
        };

        let playlist_id = self.next_playlist_id();
        self.playlists.write().push(Playlist {
            id: playlist_id,
            name: remote.title,
            source_url: Some(url),
        });

        let mut songs = self.songs.write();
        for track in remote.tracks {
            songs.push(Song {
                id: self.next_song_id(),
                title: track.title,
                url: track.url,
                playlist_id,
                manual: false,
            });
        }
        true
    }

    /// Resolve a single video and append it to the given playlist, flagged
    /// as a manual addition.
    pub async fn add_song(&self, playlist_id: u64, url: String) -> bool {
        let track = match self.provider.fetch_track(&url).await {
            Ok(track) => track,
            Err(e) => {
                log::warn!("Song resolution failed for {}: {}", url, e);
                return false;
            }
        };

        self.songs.write().push(Song {
            id: self.next_song_id(),
            title: track.title,
            url: track.url,
            playlist_id,
            manual: true,
        });
        true
    }

    /// Re-resolve an imported playlist and append the items whose URL is not
    /// yet among its imported songs. Never removes and never duplicates;
    /// manual additions are invisible to the comparison.
    pub async fn sync_playlist(&self, playlist: Playlist) -> bool {
        let Some(source_url) = playlist.source_url else {
            log::debug!("Playlist {} has no source URL, nothing to sync", playlist.id);
            return false;
        };

        let remote = match self.provider.fetch_playlist(&source_url).await {
            Ok(remote) => remote,
            Err(e) => {
                log::warn!("Playlist sync failed for {}: {}", source_url, e);
                return false;
            }
        };

        let mut songs = self.songs.write();
        let existing_urls: HashSet<String> = songs
            .iter()
            .filter(|s| s.playlist_id == playlist.id && !s.manual)
            .map(|s| s.url.clone())
            .collect();

        let mut appended = 0usize;
        for track in remote.tracks {
            if existing_urls.contains(&track.url) {
                continue;
            }
            songs.push(Song {
                id: self.next_song_id(),
                title: track.title,
                url: track.url,
                playlist_id: playlist.id,
                manual: false,
            });
            appended += 1;
        }

        log::info!("Synced playlist {}: {} new songs", playlist.id, appended);
        appended > 0
    }

    pub fn playlists(&self) -> Vec<Playlist> {
        self.playlists.read().clone()
    }

    pub fn playlist(&self, id: u64) -> Option<Playlist> {
        self.playlists.read().iter().find(|p| p.id == id).cloned()
    }

    pub fn songs(&self) -> Vec<Song> {
        self.songs.read().clone()
    }

    /// The songs belonging to one playlist. A plain filtered view; songs of
    /// other playlists are untouched.
    pub fn songs_for_playlist(&self, playlist_id: u64) -> Vec<Song> {
        self.songs
            .read()
            .iter()
            .filter(|s| s.playlist_id == playlist_id)
            .cloned()
            .collect()
    }

    pub fn song(&self, id: u64) -> Option<Song> {
        self.songs.read().iter().find(|s| s.id == id).cloned()
    }

    // Queue operations.

    pub fn reset_queue(&self, song: Song) {
        self.queue.write().reset_to(song);
    }

    pub fn advance_queue(&self) -> Option<Song> {
        self.queue.write().advance()
    }

    /// Returns `false` when nothing is playing yet; the caller is expected
    /// to start playback directly in that case.
    pub fn enqueue_after_current(&self, song: Song) -> bool {
        self.queue.write().insert_after_current(song)
    }

    pub fn current_song(&self) -> Option<Song> {
        self.queue.read().current()
    }
}
