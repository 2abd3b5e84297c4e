use flowline_core::{PairId, Position, Puzzle};

use crate::{
    BeginOutcome, CommitOutcome, ConnectOutcome, Game, MoveOutcome,
    pointer::{CellMapper, PointerPos},
};

/// The dot picked by the last press, kept for tap-to-connect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Pair of the selected dot.
    pub pair_id: PairId,
    /// Position of the selected dot.
    pub position: Position,
}

/// What a single input event did.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum InteractionEvent {
    /// The event had no effect.
    Ignored,
    /// A path started from a dot.
    Started(PairId),
    /// The selected dot was pressed again and deselected.
    Deselected(PairId),
    /// A cell without a dot was pressed; any selection was dropped.
    Cleared,
    /// A dot of an already connected pair was pressed.
    PairComplete(PairId),
    /// The active path was extended, retraced, or a move was rejected.
    Moved(MoveOutcome),
    /// Two adjacent partner dots were joined by tapping them in turn.
    Connected(PairId),
    /// The released path reached its partner dot.
    Committed(PairId),
    /// The released path did not reach its partner dot and was erased.
    Discarded(PairId),
}

/// Result of a press, move or release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionOutcome {
    /// What the event did.
    pub event: InteractionEvent,
    /// `true` if this event solved the puzzle.
    pub newly_solved: bool,
}

impl InteractionOutcome {
    fn new(event: InteractionEvent) -> Self {
        Self {
            event,
            newly_solved: false,
        }
    }

    fn ignored() -> Self {
        Self::new(InteractionEvent::Ignored)
    }
}

/// Turns press / move / release events into path engine calls.
///
/// Supports drag-drawing (press a dot, move through cells, release) and
/// tap-to-connect (press one dot, release, press its adjacent partner). The
/// win check runs whenever an event leaves no gesture, path or selection in
/// flight. Once solved, the controller ignores further input.
///
/// # Example
///
/// ```
/// use flowline_core::{Difficulty, Position, Puzzle};
/// use flowline_game::Controller;
///
/// let puzzle = Puzzle::from_layout(0, Difficulty::Easy, "Tiny", "RR\nBB").unwrap();
/// let mut controller = Controller::new(puzzle);
///
/// // drag
/// controller.press(Position::new(0, 0));
/// controller.move_to(Position::new(1, 0));
/// assert!(controller.release().event.is_committed());
///
/// // tap, tap
/// controller.press(Position::new(0, 1));
/// controller.release();
/// let outcome = controller.press(Position::new(1, 1));
/// assert!(outcome.event.is_connected());
/// assert!(outcome.newly_solved);
/// assert!(controller.is_solved());
/// ```
#[derive(Debug, Clone)]
pub struct Controller {
    game: Game,
    drawing: bool,
    selection: Option<Selection>,
    solved: bool,
}

impl Controller {
    /// Creates a controller for a fresh game of `puzzle`.
    #[must_use]
    pub fn new(puzzle: Puzzle) -> Self {
        Self::from_game(Game::new(puzzle))
    }

    /// Creates a controller driving an existing game.
    #[must_use]
    pub fn from_game(game: Game) -> Self {
        let solved = game.is_solved();
        Self {
            game,
            drawing: false,
            selection: None,
            solved,
        }
    }

    /// Returns the game.
    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Returns the selected dot.
    #[must_use]
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Returns `true` while a drag is in progress.
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Returns `true` once the puzzle has been solved.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Returns `true` if no gesture, active path or selection is pending.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        !self.drawing && self.selection.is_none() && self.game.active_path().is_none()
    }

    /// Handles a press on `pos`.
    ///
    /// - Pressing a dot of a connected pair, or a cell without a dot, drops
    ///   the selection and any path being drawn.
    /// - Pressing the selected dot again deselects it.
    /// - Pressing the partner of the selected dot connects them if they are
    ///   adjacent.
    /// - Pressing any other dot selects it and starts a new path there.
    pub fn press(&mut self, pos: Position) -> InteractionOutcome {
        if self.solved {
            return InteractionOutcome::ignored();
        }
        let Some(cell) = self.game.board().cell(pos) else {
            return InteractionOutcome::ignored();
        };
        let Some(pair_id) = cell.dot().map(|dot| dot.pair_id.clone()) else {
            self.drop_gesture();
            return self.settle(InteractionEvent::Cleared);
        };

        if self.game.is_pair_complete(&pair_id) {
            self.drop_gesture();
            return self.settle(InteractionEvent::PairComplete(pair_id));
        }

        if let Some(selection) = self.selection.take() {
            if selection.position == pos {
                self.drop_gesture();
                return self.settle(InteractionEvent::Deselected(pair_id));
            }
            if selection.pair_id == pair_id
                && selection.position.is_adjacent(pos)
                && let ConnectOutcome::Connected(pair_id) =
                    self.game.connect_adjacent(selection.position, pos)
            {
                self.drawing = false;
                return self.settle(InteractionEvent::Connected(pair_id));
            }
        }

        // A partner that is not adjacent starts its own path and takes the selection.
        match self.game.begin_path(pos) {
            BeginOutcome::Started(pair_id) => {
                self.drawing = true;
                self.selection = Some(Selection {
                    pair_id: pair_id.clone(),
                    position: pos,
                });
                InteractionOutcome::new(InteractionEvent::Started(pair_id))
            }
            BeginOutcome::PairComplete(pair_id) => {
                self.settle(InteractionEvent::PairComplete(pair_id))
            }
            BeginOutcome::NotADot => self.settle(InteractionEvent::Ignored),
        }
    }

    /// Handles the pointer moving onto `pos` while a drag is in progress.
    ///
    /// Moves outside the board or outside a drag are ignored.
    pub fn move_to(&mut self, pos: Position) -> InteractionOutcome {
        if self.solved || !self.drawing || !self.game.board().contains(pos) {
            return InteractionOutcome::ignored();
        }
        InteractionOutcome::new(InteractionEvent::Moved(self.game.extend_or_retrace(pos)))
    }

    /// Handles the pointer being released, wherever that happens.
    ///
    /// The active path is committed if it ends on its partner dot and erased
    /// otherwise. A discarded drag also drops the selection; a plain tap keeps
    /// it so the next press can connect an adjacent partner.
    pub fn release(&mut self) -> InteractionOutcome {
        if self.solved {
            return InteractionOutcome::ignored();
        }
        let was_drawing = std::mem::take(&mut self.drawing);
        let Some(path) = self.game.active_path() else {
            return self.settle(InteractionEvent::Ignored);
        };
        let tap = path.len() == 1;

        if !was_drawing {
            if let Some(pair_id) = self.game.discard_active() {
                return self.settle(InteractionEvent::Discarded(pair_id));
            }
            return self.settle(InteractionEvent::Ignored);
        }

        match self.game.commit() {
            CommitOutcome::Committed(pair_id) => {
                self.selection = None;
                self.settle(InteractionEvent::Committed(pair_id))
            }
            CommitOutcome::Discarded(pair_id) => {
                if !tap {
                    self.selection = None;
                }
                self.settle(InteractionEvent::Discarded(pair_id))
            }
            CommitOutcome::NoActivePath => self.settle(InteractionEvent::Ignored),
        }
    }

    /// Maps `point` through `mapper` and presses the cell under it.
    ///
    /// Presses off the board are ignored.
    pub fn pointer_down<M>(&mut self, mapper: &M, point: PointerPos) -> InteractionOutcome
    where
        M: CellMapper + ?Sized,
    {
        match mapper.cell_at(point) {
            Some(pos) => self.press(pos),
            None => InteractionOutcome::ignored(),
        }
    }

    /// Maps `point` through `mapper` and moves to the cell under it.
    ///
    /// Moves off the board are ignored; the path keeps its current end.
    pub fn pointer_move<M>(&mut self, mapper: &M, point: PointerPos) -> InteractionOutcome
    where
        M: CellMapper + ?Sized,
    {
        match mapper.cell_at(point) {
            Some(pos) => self.move_to(pos),
            None => InteractionOutcome::ignored(),
        }
    }

    /// Releases the pointer. The release position does not matter.
    pub fn pointer_up(&mut self) -> InteractionOutcome {
        self.release()
    }

    /// Abandons the current gesture and selection, erasing any path being drawn.
    ///
    /// Returns `true` if anything was pending.
    pub fn cancel(&mut self) -> bool {
        let pending = self.drawing || self.selection.is_some();
        let dropped = self.drop_gesture();
        pending || dropped
    }

    /// Erases a stale partial path of `pair_id`.
    ///
    /// Returns `true` if anything was erased. Has no effect once solved.
    pub fn clear_partial(&mut self, pair_id: &PairId) -> bool {
        !self.solved && self.game.clear_partial(pair_id)
    }

    /// Replaces the game, dropping any gesture and selection.
    pub fn restore(&mut self, game: Game) {
        *self = Self::from_game(game);
    }

    /// Starts the puzzle over.
    pub fn reset(&mut self) {
        self.game.reset();
        self.drawing = false;
        self.selection = None;
        self.solved = false;
    }

    fn drop_gesture(&mut self) -> bool {
        self.drawing = false;
        self.selection = None;
        self.game.discard_active().is_some()
    }

    fn settle(&mut self, event: InteractionEvent) -> InteractionOutcome {
        let newly_solved = !self.solved && self.is_settled() && self.game.is_solved();
        if newly_solved {
            self.solved = true;
            log::debug!("puzzle {} solved", self.game.puzzle().id);
        }
        InteractionOutcome {
            event,
            newly_solved,
        }
    }
}
