use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};

use flowline_core::{PairId, Position, Puzzle};

use crate::{
    ApplyMode, BeginOutcome, Board, CellState, CommitOutcome, ConnectOutcome, ConnectRejection,
    DrawnPath, MoveOutcome, MoveRejection,
};

/// A flow puzzle being played.
///
/// Holds the board, one [`DrawnPath`] per pair, the path currently being drawn
/// and the set of connected pairs. All mutation goes through the path
/// operations below, which keep the board and the paths in agreement.
///
/// # Example
///
/// ```
/// use flowline_core::{Difficulty, Position, Puzzle};
/// use flowline_game::{CommitOutcome, Game};
///
/// let puzzle = Puzzle::from_layout(0, Difficulty::Easy, "Line", "R.R\n...\n...").unwrap();
/// let mut game = Game::new(puzzle);
///
/// assert!(game.begin_path(Position::new(0, 0)).is_started());
/// assert!(game.extend_or_retrace(Position::new(1, 0)).is_extended());
/// assert!(game.extend_or_retrace(Position::new(2, 0)).is_extended());
/// assert!(game.commit().is_committed());
/// assert!(!game.is_solved()); // six cells are still empty
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    puzzle: Arc<Puzzle>,
    board: Board,
    paths: BTreeMap<PairId, DrawnPath>,
    active: Option<PairId>,
    completed: BTreeSet<PairId>,
}

impl Game {
    /// Starts a fresh game: dots stamped, every path empty, nothing connected.
    #[must_use]
    pub fn new(puzzle: impl Into<Arc<Puzzle>>) -> Self {
        let puzzle = puzzle.into();
        let board = Board::new(&puzzle);
        let paths = puzzle
            .flows
            .iter()
            .map(|flow| {
                let path = DrawnPath::new(flow.pair_id.clone(), flow.color.clone());
                (flow.pair_id.clone(), path)
            })
            .collect();
        log::debug!(
            "new game: puzzle {} {:?} ({}x{}, {} pairs)",
            puzzle.id,
            puzzle.name,
            puzzle.size,
            puzzle.size,
            puzzle.flows.len()
        );
        Self {
            puzzle,
            board,
            paths,
            active: None,
            completed: BTreeSet::new(),
        }
    }

    /// Discards all progress and starts over on the same puzzle.
    pub fn reset(&mut self) {
        *self = Self::new(Arc::clone(&self.puzzle));
    }

    /// Returns the puzzle being played.
    #[must_use]
    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// Returns a shared handle to the puzzle.
    #[must_use]
    pub fn shared_puzzle(&self) -> Arc<Puzzle> {
        Arc::clone(&self.puzzle)
    }

    /// Returns the board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the path of `pair_id`.
    #[must_use]
    pub fn path(&self, pair_id: &PairId) -> Option<&DrawnPath> {
        self.paths.get(pair_id)
    }

    /// Returns all paths ordered by pair id.
    pub fn paths(&self) -> impl Iterator<Item = &DrawnPath> {
        self.paths.values()
    }

    /// Returns the path being drawn, if any.
    #[must_use]
    pub fn active_path(&self) -> Option<&DrawnPath> {
        self.active.as_ref().and_then(|id| self.paths.get(id))
    }

    /// Returns the connected pairs.
    #[must_use]
    pub fn completed_pairs(&self) -> &BTreeSet<PairId> {
        &self.completed
    }

    /// Returns `true` if `pair_id` is connected.
    #[must_use]
    pub fn is_pair_complete(&self, pair_id: &PairId) -> bool {
        self.completed.contains(pair_id)
    }

    /// Checks whether the active path may step onto `target`.
    ///
    /// Rules apply in order: there must be an active path; the target must be on
    /// the board; a dot is enterable only if it is the partner of the path's
    /// start; a cell covered by another pair's path is blocked; anything else is
    /// allowed. Adjacency is not checked here.
    ///
    /// # Errors
    ///
    /// Returns the first rule the move violates.
    pub fn check_move(&self, target: Position) -> Result<(), MoveRejection> {
        let path = self.active_path().ok_or(MoveRejection::NoActivePath)?;
        let cell = self.board.cell(target).ok_or(MoveRejection::OutOfBounds)?;
        if let Some(dot) = cell.dot() {
            if &dot.pair_id != path.id() {
                return Err(MoveRejection::ForeignDot);
            }
            if path.start() == Some(target) {
                return Err(MoveRejection::StartDot);
            }
            return Ok(());
        }
        if let Some(mark) = cell.occupant()
            && &mark.pair_id != path.id()
        {
            return Err(MoveRejection::Crossing);
        }
        Ok(())
    }

    /// Returns `true` if [`check_move`](Self::check_move) allows `target`.
    #[must_use]
    pub fn is_move_valid(&self, target: Position) -> bool {
        self.check_move(target).is_ok()
    }

    /// Starts drawing from the dot at `start`.
    ///
    /// Any other path being drawn is discarded, and a stale partial path of the
    /// same pair is erased before the new one begins.
    pub fn begin_path(&mut self, start: Position) -> BeginOutcome {
        let Some(dot) = self.board.cell(start).and_then(CellState::dot) else {
            return BeginOutcome::NotADot;
        };
        let pair_id = dot.pair_id.clone();
        if self.completed.contains(&pair_id) {
            return BeginOutcome::PairComplete(pair_id);
        }

        self.discard_active();
        self.clear_partial(&pair_id);
        let Some(path) = self.paths.get_mut(&pair_id) else {
            log::warn!("dot at {start} belongs to unknown pair {pair_id}");
            return BeginOutcome::NotADot;
        };
        path.reset();
        path.push(start);
        self.board = self.board.apply_points(&path.mark(), &[start], ApplyMode::Mark);
        self.active = Some(pair_id.clone());
        log::debug!("begin {pair_id} at {start}");
        BeginOutcome::Started(pair_id)
    }

    /// Moves the end of the active path to `target`.
    ///
    /// If `target` is already on the path, the path is cut back so that
    /// `target` becomes its end. Otherwise `target` is appended when it is
    /// adjacent to the current end and [`check_move`](Self::check_move) allows
    /// it. The partner dot can be entered even if the path wanders on past it
    /// later.
    pub fn extend_or_retrace(&mut self, target: Position) -> MoveOutcome {
        let Some(pair_id) = self.active.clone() else {
            return MoveOutcome::Rejected(MoveRejection::NoActivePath);
        };
        let Some(path) = self.paths.get(&pair_id) else {
            return MoveOutcome::Rejected(MoveRejection::NoActivePath);
        };
        let Some(last) = path.last() else {
            return MoveOutcome::Rejected(MoveRejection::NoActivePath);
        };
        if target == last {
            return MoveOutcome::Unchanged;
        }
        if !last.is_adjacent(target) {
            return MoveOutcome::Rejected(MoveRejection::NotAdjacent);
        }

        if let Some(index) = path.index_of(target) {
            let removed = self.truncate_path(&pair_id, index + 1);
            return MoveOutcome::Retraced { removed };
        }

        if let Err(rejection) = self.check_move(target) {
            return MoveOutcome::Rejected(rejection);
        }
        let reached_partner = self.board.cell(target).is_some_and(CellState::is_dot);
        if let Some(path) = self.paths.get_mut(&pair_id) {
            path.push(target);
            self.board = self.board.apply_points(&path.mark(), &[target], ApplyMode::Mark);
        }
        MoveOutcome::Extended { reached_partner }
    }

    /// Finishes the active path.
    ///
    /// A path of at least two points ending on its partner dot is marked
    /// complete and its pair becomes connected. Any other path is erased from
    /// the board and emptied.
    pub fn commit(&mut self) -> CommitOutcome {
        let Some(pair_id) = self.active.take() else {
            return CommitOutcome::NoActivePath;
        };
        let Some(path) = self.paths.get_mut(&pair_id) else {
            return CommitOutcome::NoActivePath;
        };

        let ends_on_partner = path.len() >= 2
            && path.last() != path.start()
            && path
                .last()
                .and_then(|end| self.board.cell(end))
                .and_then(CellState::dot)
                .is_some_and(|dot| dot.pair_id == pair_id);
        if ends_on_partner {
            path.set_complete(true);
            self.completed.insert(pair_id.clone());
            log::debug!("committed {pair_id} ({} cells)", path.len());
            return CommitOutcome::Committed(pair_id);
        }

        self.board = self.board.apply_path(path, ApplyMode::Clear);
        path.reset();
        log::debug!("discarded {pair_id}");
        CommitOutcome::Discarded(pair_id)
    }

    /// Erases the active path without trying to commit it.
    ///
    /// Returns the pair whose path was dropped.
    pub fn discard_active(&mut self) -> Option<PairId> {
        let pair_id = self.active.take()?;
        if let Some(path) = self.paths.get_mut(&pair_id) {
            self.board = self.board.apply_path(path, ApplyMode::Clear);
            path.reset();
        }
        Some(pair_id)
    }

    /// Erases the incomplete, non-empty path of `pair_id`.
    ///
    /// Complete paths are left alone. Returns `true` if anything was erased.
    pub fn clear_partial(&mut self, pair_id: &PairId) -> bool {
        let Some(path) = self.paths.get_mut(pair_id) else {
            return false;
        };
        if !path.is_partial() {
            return false;
        }
        self.board = self.board.apply_path(path, ApplyMode::Clear);
        path.reset();
        if self.active.as_ref() == Some(pair_id) {
            self.active = None;
        }
        log::debug!("cleared stale partial path of {pair_id}");
        true
    }

    /// Connects two adjacent partner dots with a two-point path.
    ///
    /// Any path being drawn and any stale partial path of the pair are erased
    /// first.
    pub fn connect_adjacent(&mut self, from: Position, to: Position) -> ConnectOutcome {
        let dot_pair = |pos| {
            self.board
                .cell(pos)
                .and_then(CellState::dot)
                .map(|dot| dot.pair_id.clone())
        };
        let (Some(pair_id), Some(other)) = (dot_pair(from), dot_pair(to)) else {
            return ConnectOutcome::Rejected(ConnectRejection::NotDots);
        };
        if pair_id != other || from == to {
            return ConnectOutcome::Rejected(ConnectRejection::NotPartners);
        }
        if self.completed.contains(&pair_id) {
            return ConnectOutcome::Rejected(ConnectRejection::PairComplete);
        }
        if !from.is_adjacent(to) {
            return ConnectOutcome::Rejected(ConnectRejection::NotAdjacent);
        }

        self.discard_active();
        self.clear_partial(&pair_id);
        let Some(path) = self.paths.get_mut(&pair_id) else {
            return ConnectOutcome::Rejected(ConnectRejection::NotDots);
        };
        path.reset();
        path.push(from);
        path.push(to);
        path.set_complete(true);
        self.board = self.board.apply_path(path, ApplyMode::Mark);
        self.completed.insert(pair_id.clone());
        log::debug!("tap-connected {pair_id} between {from} and {to}");
        ConnectOutcome::Connected(pair_id)
    }

    fn truncate_path(&mut self, pair_id: &PairId, len: usize) -> usize {
        let Some(path) = self.paths.get_mut(pair_id) else {
            return 0;
        };
        let removed = path.truncate(len);
        self.board = self
            .board
            .apply_points(&path.mark(), &removed, ApplyMode::Clear);
        removed.len()
    }
}

#[cfg(test)]
mod tests {
    use flowline_core::Difficulty;

    use super::*;

    // red: (0,0)-(2,0)  blue: (0,1)-(0,2)  green: (2,1)-(2,2)
    fn small() -> Game {
        let puzzle = Puzzle::from_layout(
            1,
            Difficulty::Easy,
            "Small",
            "
            R . R
            B . G
            B . G
            ",
        )
        .unwrap();
        Game::new(puzzle)
    }

    fn p(x: u8, y: u8) -> Position {
        Position::new(x, y)
    }

    fn red() -> PairId {
        PairId::from("red")
    }

    fn points(game: &Game, pair: &str) -> Vec<Position> {
        game.path(&PairId::from(pair)).unwrap().points().to_vec()
    }

    #[test]
    fn test_new_game_is_blank() {
        let game = small();
        assert_eq!(game.paths().count(), 3);
        assert!(game.paths().all(DrawnPath::is_empty));
        assert!(game.active_path().is_none());
        assert!(game.completed_pairs().is_empty());
        assert!(!game.is_solved());
    }

    #[test]
    fn test_check_move_order() {
        let mut game = small();
        assert_eq!(game.check_move(p(1, 0)), Err(MoveRejection::NoActivePath));

        game.begin_path(p(0, 0));
        assert_eq!(game.check_move(p(9, 9)), Err(MoveRejection::OutOfBounds));
        assert_eq!(game.check_move(p(0, 1)), Err(MoveRejection::ForeignDot));
        assert_eq!(game.check_move(p(0, 0)), Err(MoveRejection::StartDot));
        assert_eq!(game.check_move(p(2, 0)), Ok(()));
        assert_eq!(game.check_move(p(1, 1)), Ok(()));
        // not adjacent, still allowed by the predicate
        assert!(game.is_move_valid(p(1, 2)));
    }

    #[test]
    fn test_crossing_is_rejected() {
        let mut game = small();
        game.begin_path(p(0, 1));
        game.extend_or_retrace(p(1, 1));
        game.commit();
        assert_eq!(points(&game, "blue"), Vec::new());

        game.begin_path(p(0, 1));
        game.extend_or_retrace(p(1, 1));
        game.extend_or_retrace(p(1, 2));
        game.extend_or_retrace(p(0, 2));
        assert!(game.commit().is_committed());

        game.begin_path(p(0, 0));
        assert!(game.extend_or_retrace(p(1, 0)).is_extended());
        assert_eq!(
            game.extend_or_retrace(p(1, 1)),
            MoveOutcome::Rejected(MoveRejection::Crossing)
        );
        assert_eq!(points(&game, "red"), vec![p(0, 0), p(1, 0)]);
    }

    #[test]
    fn test_extend_rejects_jumps() {
        let mut game = small();
        game.begin_path(p(0, 0));
        assert_eq!(
            game.extend_or_retrace(p(2, 0)),
            MoveOutcome::Rejected(MoveRejection::NotAdjacent)
        );
        assert_eq!(game.extend_or_retrace(p(0, 0)), MoveOutcome::Unchanged);
    }

    #[test]
    fn test_retrace_cuts_and_clears() {
        let mut game = small();
        game.begin_path(p(0, 0));
        game.extend_or_retrace(p(1, 0));
        game.extend_or_retrace(p(1, 1));
        game.extend_or_retrace(p(1, 2));
        assert_eq!(game.board().unfilled_cells().count(), 5);

        assert_eq!(
            game.extend_or_retrace(p(1, 1)),
            MoveOutcome::Retraced { removed: 1 }
        );
        assert_eq!(points(&game, "red"), vec![p(0, 0), p(1, 0), p(1, 1)]);
        assert!(game.board().cell(p(1, 2)).unwrap().is_empty());

        assert_eq!(
            game.extend_or_retrace(p(1, 0)),
            MoveOutcome::Retraced { removed: 1 }
        );
        assert_eq!(
            game.extend_or_retrace(p(0, 0)),
            MoveOutcome::Retraced { removed: 1 }
        );
        assert_eq!(points(&game, "red"), vec![p(0, 0)]);
        assert!(game.board().cell(p(0, 0)).unwrap().is_occupied_by(&red()));
    }

    #[test]
    fn test_commit_requires_partner() {
        let mut game = small();
        game.begin_path(p(0, 0));
        game.extend_or_retrace(p(1, 0));
        assert_eq!(game.commit(), CommitOutcome::Discarded(red()));
        assert!(game.path(&red()).unwrap().is_empty());
        assert!(game.board().cell(p(1, 0)).unwrap().is_empty());
        assert!(game.board().cell(p(0, 0)).unwrap().occupant().is_none());

        game.begin_path(p(0, 0));
        game.extend_or_retrace(p(1, 0));
        let outcome = game.extend_or_retrace(p(2, 0));
        assert_eq!(outcome, MoveOutcome::Extended { reached_partner: true });
        assert_eq!(game.commit(), CommitOutcome::Committed(red()));
        assert!(game.path(&red()).unwrap().is_complete());
        assert!(game.is_pair_complete(&red()));
        assert_eq!(game.commit(), CommitOutcome::NoActivePath);
    }

    #[test]
    fn test_single_point_path_is_discarded() {
        let mut game = small();
        game.begin_path(p(0, 0));
        assert!(game.commit().is_discarded());
        assert!(game.board().cell(p(0, 0)).unwrap().occupant().is_none());
    }

    #[test]
    fn test_completed_pair_cannot_restart() {
        let mut game = small();
        assert!(game.connect_adjacent(p(0, 1), p(0, 2)).is_connected());
        assert_eq!(
            game.begin_path(p(0, 2)),
            BeginOutcome::PairComplete(PairId::from("blue"))
        );
        assert_eq!(game.begin_path(p(1, 1)), BeginOutcome::NotADot);
    }

    #[test]
    fn test_begin_clears_stale_partial() {
        let mut game = small();
        game.begin_path(p(0, 0));
        game.extend_or_retrace(p(1, 0));
        game.extend_or_retrace(p(1, 1));

        // Another pair takes over; red is dropped.
        game.begin_path(p(2, 1));
        assert!(game.path(&red()).unwrap().is_empty());
        assert!(game.board().cell(p(1, 1)).unwrap().is_empty());

        // Restarting from the other end wipes what was left of green.
        game.extend_or_retrace(p(1, 1));
        game.begin_path(p(2, 2));
        assert_eq!(points(&game, "green"), vec![p(2, 2)]);
        assert!(game.board().cell(p(1, 1)).unwrap().is_empty());
        assert!(game.board().cell(p(2, 1)).unwrap().occupant().is_none());
    }

    #[test]
    fn test_clear_partial_keeps_complete_paths() {
        let mut game = small();
        game.connect_adjacent(p(2, 1), p(2, 2));
        assert!(!game.clear_partial(&PairId::from("green")));
        assert_eq!(points(&game, "green"), vec![p(2, 1), p(2, 2)]);
    }

    #[test]
    fn test_connect_adjacent_rules() {
        let mut game = small();
        assert_eq!(
            game.connect_adjacent(p(0, 0), p(2, 0)),
            ConnectOutcome::Rejected(ConnectRejection::NotAdjacent)
        );
        assert_eq!(
            game.connect_adjacent(p(0, 0), p(0, 1)),
            ConnectOutcome::Rejected(ConnectRejection::NotPartners)
        );
        assert_eq!(
            game.connect_adjacent(p(0, 1), p(0, 1)),
            ConnectOutcome::Rejected(ConnectRejection::NotPartners)
        );
        assert_eq!(
            game.connect_adjacent(p(0, 1), p(1, 1)),
            ConnectOutcome::Rejected(ConnectRejection::NotDots)
        );
        assert!(game.connect_adjacent(p(0, 2), p(0, 1)).is_connected());
        assert_eq!(points(&game, "blue"), vec![p(0, 2), p(0, 1)]);
        assert_eq!(
            game.connect_adjacent(p(0, 1), p(0, 2)),
            ConnectOutcome::Rejected(ConnectRejection::PairComplete)
        );
    }

    #[test]
    fn test_path_may_pass_partner() {
        let puzzle = Puzzle::from_layout(0, Difficulty::Easy, "Pass", "R.R\n...\n...").unwrap();
        let mut game = Game::new(puzzle);
        game.begin_path(p(0, 0));
        game.extend_or_retrace(p(1, 0));
        game.extend_or_retrace(p(2, 0));
        assert!(game.extend_or_retrace(p(2, 1)).is_extended());
        // The end is no longer on the partner dot.
        assert!(game.commit().is_discarded());
    }

    #[test]
    fn test_reset() {
        let mut game = small();
        game.connect_adjacent(p(0, 1), p(0, 2));
        game.begin_path(p(0, 0));
        game.reset();
        assert_eq!(game, small());
    }
}
