use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Best completion times kept across sessions.
pub const LEADERBOARD_CAPACITY: usize = 10;

/// Ascending list of at most [`LEADERBOARD_CAPACITY`] completion times in whole seconds. Persisted as a bare JSON
/// array of integers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    times: Vec<u32>,
}

impl StorageKey for Leaderboard {
    const KEY: &'static str = "minegrid:leaderboard";
}

impl Leaderboard {
    pub fn from_times(times: impl IntoIterator<Item = u32>) -> Self {
        let mut times: Vec<u32> = times.into_iter().collect();
        times.sort_unstable();
        times.truncate(LEADERBOARD_CAPACITY);
        Self { times }
    }

    /// Loads the persisted list. Absent or corrupt data reads as an empty board.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let stored = Self::stored_or_default(store);
        Self::from_times(stored.times)
    }

    /// Inserts `secs` and persists the result. Returns the 0-based rank reached, if any.
    pub fn record<S: KeyValueStore + ?Sized>(&mut self, secs: u32, store: &mut S) -> Option<usize> {
        let rank = self.insert(secs);
        if let Err(err) = self.save_to(store) {
            log::error!("Could not save leaderboard: {}", err);
        }
        rank
    }

    /// Inserts `secs` after any equal times and drops whatever falls past the capacity.
    pub fn insert(&mut self, secs: u32) -> Option<usize> {
        let rank = self.times.partition_point(|&time| time <= secs);
        if rank >= LEADERBOARD_CAPACITY {
            return None;
        }
        self.times.insert(rank, secs);
        self.times.truncate(LEADERBOARD_CAPACITY);
        Some(rank)
    }

    pub fn times(&self) -> &[u32] {
        &self.times
    }

    pub fn best(&self) -> Option<u32> {
        self.times.first().copied()
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn read(&self, _key: &str) -> Option<String> {
            None
        }

        fn write(&mut self, _key: &str, _value: String) -> Result<()> {
            Err(GameError::StorageError("quota exceeded".into()))
        }
    }

    fn full_board() -> Leaderboard {
        Leaderboard::from_times((1..=10).map(|n| n * 10))
    }

    #[test]
    fn load_absent_is_empty() {
        assert!(Leaderboard::load(&MemoryStore::new()).is_empty());
    }

    #[test]
    fn load_corrupt_or_non_array_is_empty() {
        for raw in ["not json", "{\"times\":[1]}", "42", "[1, \"two\"]", "[-3]"] {
            let store = MemoryStore::new().with_entry(Leaderboard::KEY, raw);
            assert!(Leaderboard::load(&store).is_empty(), "{raw}");
        }
    }

    #[test]
    fn load_normalizes_order_and_length() {
        let store = MemoryStore::new()
            .with_entry(Leaderboard::KEY, "[90, 5, 40, 1, 2, 3, 4, 6, 7, 8, 9, 10]");
        let board = Leaderboard::load(&store);

        assert_eq!(board.times(), &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn record_sorts_and_persists() {
        let mut store = MemoryStore::new();
        let mut board = Leaderboard::default();

        assert_eq!(board.record(42, &mut store), Some(0));
        assert_eq!(board.record(17, &mut store), Some(0));
        assert_eq!(board.record(30, &mut store), Some(1));

        assert_eq!(board.times(), &[17, 30, 42]);
        assert_eq!(store.read(Leaderboard::KEY).as_deref(), Some("[17,30,42]"));
        assert_eq!(Leaderboard::load(&store), board);
    }

    #[test]
    fn slower_time_leaves_full_board_unchanged() {
        let mut store = MemoryStore::new();
        let mut board = full_board();
        let before = board.clone();

        assert_eq!(board.record(500, &mut store), None);
        assert_eq!(board.record(100, &mut store), None);

        assert_eq!(board, before);
        assert!(board.times().is_sorted());
    }

    #[test]
    fn faster_time_evicts_slowest() {
        let mut store = MemoryStore::new();
        let mut board = full_board();

        assert_eq!(board.record(15, &mut store), Some(1));

        assert_eq!(board.len(), LEADERBOARD_CAPACITY);
        assert_eq!(board.times(), &[10, 15, 20, 30, 40, 50, 60, 70, 80, 90]);
        assert_eq!(board.best(), Some(10));
    }

    #[test]
    fn never_exceeds_capacity() {
        let mut store = MemoryStore::new();
        let mut board = Leaderboard::default();
        for secs in (0..50).rev() {
            board.record(secs, &mut store);
            assert!(board.len() <= LEADERBOARD_CAPACITY);
        }
        assert_eq!(board.times(), (0..10).collect::<Vec<_>>().as_slice());
    }

    #[test]
    fn failed_write_keeps_in_memory_list() {
        let mut board = Leaderboard::default();

        assert_eq!(board.record(12, &mut BrokenStore), Some(0));
        assert_eq!(board.times(), vec![12].as_slice());
    }
}
