use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Snapshot of where the current game stands.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub status: GameStatus,
    pub elapsed_secs: u32,
}

/// Everything one player's game needs: the current grid, its timer, the persisted leaderboard, and the injected
/// random source and storage backend.
///
/// All mutation happens through `&mut self`, so a status change and the timer stop that goes with it can never be
/// interleaved with a tick.
#[derive(Debug)]
pub struct GameSession<R, S> {
    difficulty: Difficulty,
    first_move: FirstMovePolicy,
    engine: GridEngine,
    timer: Timer,
    leaderboard: Leaderboard,
    rng: R,
    store: S,
}

impl<R: Rng, S: KeyValueStore> GameSession<R, S> {
    pub fn new(settings: Settings, mut rng: R, store: S) -> Self {
        let grid = RandomGridGenerator::new(&mut rng).generate(settings.difficulty.config());
        Self::with_grid(grid, settings, rng, store)
    }

    /// Starts on a prepared grid. Later restarts generate from `settings.difficulty`.
    pub fn with_grid(grid: Grid, settings: Settings, rng: R, store: S) -> Self {
        let leaderboard = Leaderboard::load(&store);
        log::debug!(
            "Session started on {}x{} with {} mines, {} leaderboard entries",
            grid.size(),
            grid.size(),
            grid.mine_count(),
            leaderboard.len()
        );
        Self {
            difficulty: settings.difficulty,
            first_move: settings.first_move,
            engine: GridEngine::new(grid),
            timer: Timer::new(),
            leaderboard,
            rng,
            store,
        }
    }

    pub fn grid(&self) -> &Grid {
        self.engine.grid()
    }

    pub fn engine(&self) -> &GridEngine {
        &self.engine
    }

    pub fn status(&self) -> GameStatus {
        self.engine.status()
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.timer.elapsed_secs()
    }

    pub fn state(&self) -> GameState {
        GameState {
            status: self.status(),
            elapsed_secs: self.elapsed_secs(),
        }
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn settings(&self) -> Settings {
        Settings {
            difficulty: self.difficulty,
            first_move: self.first_move,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn set_first_move(&mut self, first_move: FirstMovePolicy) {
        self.first_move = first_move;
    }

    /// Replaces the grid with a fresh one for `difficulty` and resets the timer.
    pub fn regenerate(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        let grid = RandomGridGenerator::new(&mut self.rng).generate(difficulty.config());
        log::debug!("Regenerated grid for {}", difficulty);
        self.engine = GridEngine::new(grid);
        self.timer.reset();
    }

    pub fn restart(&mut self) {
        self.regenerate(self.difficulty);
    }

    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        if self.engine.is_finished() {
            return RevealOutcome::NoChange;
        }
        self.protect_first_reveal(coords);

        let outcome = self.engine.reveal(coords);
        match outcome {
            RevealOutcome::HitMine => {
                self.timer.stop();
                log::info!("Lost after {}s", self.timer.elapsed_secs());
            }
            RevealOutcome::Won => {
                self.timer.stop();
                let secs = self.timer.elapsed_secs();
                let rank = self.leaderboard.record(secs, &mut self.store);
                log::info!("Won in {}s, leaderboard rank {:?}", secs, rank);
            }
            RevealOutcome::Revealed | RevealOutcome::NoChange => {}
        }
        outcome
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        self.engine.toggle_flag(coords)
    }

    /// Token for the next scheduled tick, `None` once the game is over.
    pub fn tick_token(&self) -> Option<TickToken> {
        if self.engine.status().is_playing() {
            self.timer.token()
        } else {
            None
        }
    }

    /// Advances the clock by one second. Tokens from replaced grids or finished games are ignored.
    pub fn tick(&mut self, token: TickToken) -> bool {
        self.engine.status().is_playing() && self.timer.tick(token)
    }

    /// With [`FirstMovePolicy::Safe`], moves the mines elsewhere if the first reveal of this grid would hit one.
    fn protect_first_reveal(&mut self, coords: Coord2) {
        if self.first_move != FirstMovePolicy::Safe || self.grid().revealed_count() > 0 {
            return;
        }
        let Some(cell) = self.grid().get(coords) else {
            return;
        };
        if !cell.is_mine() || cell.is_flagged() {
            return;
        }

        log::debug!("Moving mines away from first reveal at {:?}", coords);
        let config = self.grid().config();
        let grid = RandomGridGenerator::new(&mut self.rng)
            .avoiding(coords)
            .generate(config);
        self.engine.relayout(grid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    type TestSession = GameSession<SmallRng, MemoryStore>;

    fn session_with(mines: &[Coord2], store: MemoryStore) -> TestSession {
        let grid = Grid::from_mine_coords(9, mines).unwrap();
        GameSession::with_grid(
            grid,
            Settings::default(),
            SmallRng::seed_from_u64(1),
            store,
        )
    }

    /// Mine wall down column 6 plus one mine in the top-right corner: 10 mines on 9x9.
    fn walled_mines() -> Vec<Coord2> {
        let mut mines: Vec<Coord2> = (0..9).map(|row| (row, 6)).collect();
        mines.push((0, 8));
        mines
    }

    fn tick_n(session: &mut TestSession, n: u32) {
        for _ in 0..n {
            let token = session.tick_token().unwrap();
            assert!(session.tick(token));
        }
    }

    #[test]
    fn new_session_generates_from_settings() {
        let settings = Settings {
            difficulty: Difficulty::Intermediate,
            ..Default::default()
        };
        let session = GameSession::new(settings, SmallRng::seed_from_u64(9), MemoryStore::new());

        assert_eq!(session.grid().size(), 16);
        assert_eq!(session.grid().mine_count(), 40);
        assert_eq!(
            session.state(),
            GameState {
                status: GameStatus::Playing,
                elapsed_secs: 0
            }
        );
    }

    #[test]
    fn flood_fill_covers_zero_region_of_beginner_board() {
        let mut session = session_with(&walled_mines(), MemoryStore::new());
        assert_eq!(session.grid()[(4, 4)].adjacent_mines(), 0);

        assert_eq!(session.reveal((4, 4)), RevealOutcome::Revealed);

        for (coords, cell) in session.grid().iter() {
            assert_eq!(cell.is_revealed(), coords.1 <= 5, "{coords:?}");
        }
        assert_eq!(session.grid().revealed_count(), 54);
        for row in 0..9 {
            assert!(session.grid()[(row, 5)].adjacent_mines() > 0);
        }
        assert_eq!(session.status(), GameStatus::Playing);
    }

    #[test]
    fn hitting_a_mine_freezes_timer_and_leaderboard() {
        let mut session = session_with(&walled_mines(), MemoryStore::new());
        tick_n(&mut session, 3);
        let token = session.tick_token().unwrap();

        assert_eq!(session.reveal((2, 6)), RevealOutcome::HitMine);
        assert_eq!(session.status(), GameStatus::Lost);
        assert!(!session.tick(token));
        assert_eq!(session.tick_token(), None);
        assert_eq!(session.elapsed_secs(), 3);
        assert!(session.leaderboard().is_empty());
        assert_eq!(session.store().read(Leaderboard::KEY), None);
    }

    #[test]
    fn winning_records_final_time_once() {
        let store = MemoryStore::new().with_entry(Leaderboard::KEY, "[50, 5]");
        let mut session = session_with(&walled_mines(), store);

        tick_n(&mut session, 4);
        assert_eq!(session.reveal((4, 4)), RevealOutcome::Revealed);
        tick_n(&mut session, 3);
        assert_eq!(session.reveal((8, 8)), RevealOutcome::Revealed);
        // (0, 7) borders three mines and no zero cell, so only a direct reveal opens it
        assert!(!session.grid()[(0, 7)].is_revealed());
        assert_eq!(session.leaderboard().len(), 2);
        assert_eq!(session.reveal((0, 7)), RevealOutcome::Won);

        assert_eq!(session.status(), GameStatus::Won);
        assert_eq!(session.elapsed_secs(), 7);
        assert_eq!(session.leaderboard().times(), &[5, 7, 50]);
        assert_eq!(
            session.store().read(Leaderboard::KEY).as_deref(),
            Some("[5,7,50]")
        );

        assert_eq!(session.reveal((0, 6)), RevealOutcome::NoChange);
        assert_eq!(session.reveal((0, 7)), RevealOutcome::NoChange);
        assert_eq!(session.status(), GameStatus::Won);
        assert_eq!(session.tick_token(), None);
        assert_eq!(session.leaderboard().len(), 3);
        assert_eq!(
            session.store().read(Leaderboard::KEY).as_deref(),
            Some("[5,7,50]")
        );
    }

    #[test]
    fn stale_tick_does_not_touch_new_grid() {
        let mut session = session_with(&walled_mines(), MemoryStore::new());
        let stale = session.tick_token().unwrap();
        tick_n(&mut session, 2);

        session.restart();

        assert_eq!(session.elapsed_secs(), 0);
        assert!(!session.tick(stale));
        assert_eq!(session.elapsed_secs(), 0);
        assert!(session.tick_token().is_some());
    }

    #[test]
    fn regenerate_resets_state_and_switches_difficulty() {
        let mut session = session_with(&walled_mines(), MemoryStore::new());
        session.reveal((2, 6));
        assert_eq!(session.status(), GameStatus::Lost);

        session.regenerate(Difficulty::Expert);

        assert_eq!(session.difficulty(), Difficulty::Expert);
        assert_eq!(session.grid().size(), 30);
        assert_eq!(session.grid().mine_count(), 99);
        assert_eq!(session.grid().revealed_count(), 0);
        assert_eq!(session.status(), GameStatus::Playing);
        assert_eq!(session.elapsed_secs(), 0);
    }

    #[test]
    fn safe_first_move_relocates_mine() {
        let mut session = session_with(&walled_mines(), MemoryStore::new());
        session.set_first_move(FirstMovePolicy::Safe);
        session.toggle_flag((0, 0));

        let outcome = session.reveal((3, 6));

        assert_ne!(outcome, RevealOutcome::HitMine);
        assert!(!session.grid()[(3, 6)].is_mine());
        assert!(session.grid()[(3, 6)].is_revealed());
        assert_eq!(session.grid().mine_count(), 10);
        assert!(session.grid()[(0, 0)].is_flagged());
    }

    #[test]
    fn safe_policy_only_applies_to_first_reveal() {
        let mut session = session_with(&walled_mines(), MemoryStore::new());
        session.set_first_move(FirstMovePolicy::Safe);

        assert_eq!(session.reveal((8, 8)), RevealOutcome::Revealed);
        let layout: Vec<bool> = session.grid().iter().map(|(_, c)| c.is_mine()).collect();
        let target = session
            .grid()
            .iter()
            .find(|(_, c)| c.is_mine())
            .map(|(coords, _)| coords)
            .unwrap();

        assert_eq!(session.reveal(target), RevealOutcome::HitMine);
        let after: Vec<bool> = session.grid().iter().map(|(_, c)| c.is_mine()).collect();
        assert_eq!(layout, after);
    }

    #[test]
    fn settings_reflect_session() {
        let mut session = session_with(&walled_mines(), MemoryStore::new());
        session.set_first_move(FirstMovePolicy::Safe);
        session.regenerate(Difficulty::Intermediate);

        assert_eq!(
            session.settings(),
            Settings {
                difficulty: Difficulty::Intermediate,
                first_move: FirstMovePolicy::Safe,
            }
        );
    }
}
