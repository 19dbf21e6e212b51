use crate::models::Song;

/// In-memory playback queue: the songs scheduled for playback plus a pointer
/// to the one currently playing. Starting a song replaces the whole queue;
/// "play next" inserts behind the pointer.
pub struct PlayQueue {
    items: Vec<Song>,
    current_index: Option<usize>,
}

impl PlayQueue {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            current_index: None,
        }
    }

    /// Drop whatever was queued and start over with a single song.
    pub fn reset_to(&mut self, song: Song) {
        self.items.clear();
        self.items.push(song);
        self.current_index = Some(0);
    }

    /// Move the pointer to the next queued song and return it, or `None` at
    /// the end of the queue. The pointer is left untouched when there is
    /// nothing to advance to.
    pub fn advance(&mut self) -> Option<Song> {
        let next_idx = match self.current_index {
            Some(idx) => idx + 1,
            None => 0,
        };

        if next_idx >= self.items.len() {
            return None;
        }

        self.current_index = Some(next_idx);
        self.items.get(next_idx).cloned()
    }

    /// Insert a song right after the one currently playing. Returns `false`
    /// when nothing is playing; the caller decides what to do instead.
    pub fn insert_after_current(&mut self, song: Song) -> bool {
        match self.current_index {
            Some(idx) => {
                self.items.insert(idx + 1, song);
                true
            }
            None => false,
        }
    }

    pub fn current(&self) -> Option<Song> {
        self.current_index
            .and_then(|idx| self.items.get(idx).cloned())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(id: u64, title: &str) -> Song {
        Song {
            id,
            title: title.to_string(),
            url: format!("https://www.youtube.com/watch?v=vid{}", id),
            playlist_id: 1,
            manual: false,
        }
    }

    #[test]
    fn reset_points_at_the_single_song() {
        let mut queue = PlayQueue::new();
        queue.reset_to(song(1, "one"));
        queue.reset_to(song(2, "two"));

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.current().map(|s| s.id), Some(2));
    }

    #[test]
    fn advance_walks_the_queue_in_order() {
        let mut queue = PlayQueue::new();
        queue.reset_to(song(1, "one"));
        assert!(queue.insert_after_current(song(2, "two")));
        assert!(queue.insert_after_current(song(3, "three")));

        // Insertion goes right after the pointer, so the later insert
        // comes up first.
        assert_eq!(queue.advance().map(|s| s.id), Some(3));
        assert_eq!(queue.advance().map(|s| s.id), Some(2));
        assert!(queue.advance().is_none());
    }

    #[test]
    fn advance_at_the_end_is_a_no_op() {
        let mut queue = PlayQueue::new();
        queue.reset_to(song(1, "one"));

        assert!(queue.advance().is_none());
        assert_eq!(queue.current().map(|s| s.id), Some(1));
    }

    #[test]
    fn advance_on_an_empty_queue_returns_none() {
        let mut queue = PlayQueue::new();
        assert!(queue.advance().is_none());
        assert!(queue.current().is_none());
    }

    #[test]
    fn insert_with_nothing_playing_is_refused() {
        let mut queue = PlayQueue::new();
        assert!(!queue.insert_after_current(song(1, "one")));
        assert!(queue.is_empty());
    }
}
