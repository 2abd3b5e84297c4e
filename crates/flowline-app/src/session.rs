use std::time::Instant;

use flowline_core::{Position, Puzzle};
use flowline_game::{
    Controller, Game, InteractionEvent, InteractionOutcome,
    pointer::{CellMapper, PointerPos},
};

use crate::{
    hint::{HintReveal, HintUnavailable, Hints},
    history::History,
    progress::{ProgressError, ProgressStore},
    settings::Settings,
};

/// One attempt at a puzzle.
///
/// Routes input to the [`Controller`], keeps the hint budget and undo
/// history, and records the level in the progress store the first time it is
/// solved. Input is ignored while a hint is showing; the press, move and
/// release paths have no clock, so call [`Session::tick`] before routing input
/// to drop a hint that has run its course.
#[derive(Debug)]
pub struct Session<P> {
    controller: Controller,
    hints: Hints,
    history: History,
    settings: Settings,
    progress: P,
}

impl<P: ProgressStore> Session<P> {
    #[must_use]
    pub fn new(puzzle: Puzzle, settings: Settings, progress: P) -> Self {
        let hints = Hints::new(settings.hints.clone());
        Self::with_hints(puzzle, settings, progress, hints)
    }

    /// Creates a session with a prepared hint state, e.g. one with a seeded
    /// generator.
    #[must_use]
    pub fn with_hints(puzzle: Puzzle, settings: Settings, progress: P, hints: Hints) -> Self {
        let controller = Controller::new(puzzle);
        let history = History::new(settings.history.capacity, controller.game().clone());
        Self {
            controller,
            hints,
            history,
            settings,
            progress,
        }
    }

    #[must_use]
    pub fn puzzle(&self) -> &Puzzle {
        self.controller.game().puzzle()
    }

    #[must_use]
    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    #[must_use]
    pub fn game(&self) -> &Game {
        self.controller.game()
    }

    #[must_use]
    pub fn hints(&self) -> &Hints {
        &self.hints
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn progress(&self) -> &P {
        &self.progress
    }

    #[must_use]
    pub fn into_progress(self) -> P {
        self.progress
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.controller.is_solved()
    }

    pub fn press(&mut self, pos: Position) -> Result<InteractionOutcome, ProgressError> {
        if self.hints.is_showing() {
            return Ok(ignored());
        }
        let outcome = self.controller.press(pos);
        self.after_input(outcome)
    }

    pub fn move_to(&mut self, pos: Position) -> InteractionOutcome {
        if self.hints.is_showing() {
            return ignored();
        }
        self.controller.move_to(pos)
    }

    pub fn release(&mut self) -> Result<InteractionOutcome, ProgressError> {
        if self.hints.is_showing() {
            return Ok(ignored());
        }
        let outcome = self.controller.release();
        self.after_input(outcome)
    }

    pub fn pointer_down<M>(
        &mut self,
        mapper: &M,
        point: PointerPos,
    ) -> Result<InteractionOutcome, ProgressError>
    where
        M: CellMapper + ?Sized,
    {
        match mapper.cell_at(point) {
            Some(pos) => self.press(pos),
            None => Ok(ignored()),
        }
    }

    pub fn pointer_move<M>(&mut self, mapper: &M, point: PointerPos) -> InteractionOutcome
    where
        M: CellMapper + ?Sized,
    {
        match mapper.cell_at(point) {
            Some(pos) => self.move_to(pos),
            None => ignored(),
        }
    }

    pub fn pointer_up(&mut self) -> Result<InteractionOutcome, ProgressError> {
        self.release()
    }

    /// Starts revealing the solution of a random unconnected flow.
    pub fn request_hint(&mut self, now: Instant) -> Result<&HintReveal, HintUnavailable> {
        let result = self.hints.request(&mut self.controller, now);
        if result.is_ok() {
            self.history.record(self.controller.game());
        }
        result
    }

    /// Hides the hint once it has run its course.
    ///
    /// Input stays blocked by an expired hint until this is called.
    ///
    /// Returns `true` if a hint disappeared.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.hints.tick(now)
    }

    /// Returns the hint points shown at `now`.
    #[must_use]
    pub fn hint_points(&self, now: Instant) -> Option<&[Position]> {
        self.hints.current().and_then(|hint| hint.visible_points(now))
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history_unlocked() && self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history_unlocked() && self.history.can_redo()
    }

    /// Restores the previous settled board. Returns `false` if refused.
    pub fn undo(&mut self) -> bool {
        if !self.history_unlocked() {
            return false;
        }
        match self.history.undo() {
            Some(game) => {
                self.controller.restore(game.clone());
                true
            }
            None => false,
        }
    }

    /// Reapplies an undone board. Returns `false` if refused.
    pub fn redo(&mut self) -> bool {
        if !self.history_unlocked() {
            return false;
        }
        match self.history.redo() {
            Some(game) => {
                self.controller.restore(game.clone());
                true
            }
            None => false,
        }
    }

    /// Starts the attempt over with a full hint budget and empty history.
    pub fn reset(&mut self) {
        self.controller.reset();
        self.hints.reset();
        self.history.reset(self.controller.game().clone());
    }

    fn history_unlocked(&self) -> bool {
        !self.controller.is_drawing() && !self.hints.is_showing() && !self.controller.is_solved()
    }

    fn after_input(
        &mut self,
        outcome: InteractionOutcome,
    ) -> Result<InteractionOutcome, ProgressError> {
        if self.controller.is_settled() {
            self.history.record(self.controller.game());
        }
        if outcome.newly_solved {
            let puzzle = self.controller.game().puzzle();
            log::info!("solved {} puzzle {} ({})", puzzle.difficulty, puzzle.id, puzzle.name);
            self.progress.mark_completed(puzzle.difficulty, puzzle.id)?;
        }
        Ok(outcome)
    }
}

fn ignored() -> InteractionOutcome {
    InteractionOutcome {
        event: InteractionEvent::Ignored,
        newly_solved: false,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use flowline_core::{Difficulty, PairId};
    use flowline_game::pointer::BoardTransform;

    use super::*;
    use crate::{progress::MemoryProgress, settings::HintSettings};

    const LAYOUT: &str = "
        R r R
        B b B
        G g G
    ";

    fn session() -> Session<MemoryProgress> {
        let puzzle = Puzzle::from_solved_layout(4, Difficulty::Medium, "Rows", LAYOUT).unwrap();
        let settings = Settings::default();
        let hints = Hints::with_seed(settings.hints.clone(), 11);
        Session::with_hints(puzzle, settings, MemoryProgress::default(), hints)
    }

    fn draw(session: &mut Session<MemoryProgress>, row: u8) -> InteractionOutcome {
        session.press(Position::new(0, row)).unwrap();
        session.move_to(Position::new(1, row));
        session.move_to(Position::new(2, row));
        session.release().unwrap()
    }

    #[test]
    fn test_win_marks_progress_once() {
        let mut session = session();
        draw(&mut session, 0);
        draw(&mut session, 1);
        assert!(!session.progress().is_completed(Difficulty::Medium, 4));
        let outcome = draw(&mut session, 2);
        assert!(outcome.newly_solved);
        assert!(session.is_solved());
        assert_eq!(session.progress().completed_levels(Difficulty::Medium), vec![4]);

        let again = session.press(Position::new(0, 0)).unwrap();
        assert!(again.event.is_ignored());
        assert!(!session.undo());
    }

    #[test]
    fn test_undo_redo_settled_boards() {
        let mut session = session();
        draw(&mut session, 0);
        draw(&mut session, 1);
        assert_eq!(session.history().len(), 3);

        assert!(session.undo());
        assert!(!session.game().is_pair_complete(&PairId::from("blue")));
        assert!(session.game().is_pair_complete(&PairId::from("red")));
        assert!(session.undo());
        assert!(session.game().completed_pairs().is_empty());
        assert!(!session.undo());

        assert!(session.redo());
        assert!(session.redo());
        assert!(session.game().is_pair_complete(&PairId::from("blue")));
        assert!(!session.can_redo());

        session.press(Position::new(0, 2)).unwrap();
        assert!(!session.undo());
        session.release().unwrap();
        assert!(session.can_undo());
    }

    #[test]
    fn test_failed_gesture_leaves_history_alone() {
        let mut session = session();
        session.press(Position::new(0, 0)).unwrap();
        session.move_to(Position::new(1, 0));
        session.release().unwrap();
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_input_ignored_while_hint_showing() {
        let mut session = session();
        let now = Instant::now();
        let pair = session.request_hint(now).unwrap().pair_id().clone();
        assert_eq!(session.hints().remaining(), 2);
        assert_eq!(session.hint_points(now).map(<[_]>::len), Some(1));

        assert!(session.press(Position::new(0, 0)).unwrap().event.is_ignored());
        assert!(!session.undo());

        let later = now + HintSettings::default().animation;
        assert_eq!(session.hint_points(later).map(<[_]>::len), Some(3));
        assert!(!session.tick(later));

        let gone = now + HintSettings::default().total() + Duration::from_millis(1);
        assert!(session.tick(gone));
        assert!(session.hint_points(gone).is_none());
        assert!(session.press(Position::new(0, 0)).unwrap().event.is_started());
        assert!(session.game().path(&pair).is_some());
    }

    #[test]
    fn test_expired_hint_releases_hint_and_input() {
        let mut session = session();
        let now = Instant::now();
        session.request_hint(now).unwrap();

        let later = now + Duration::from_secs(60);
        assert!(session.hint_points(later).is_none());
        assert!(session.request_hint(later).is_ok());
        assert_eq!(session.hints().remaining(), 1);

        let gone = later + HintSettings::default().total();
        assert!(session.press(Position::new(0, 0)).unwrap().event.is_ignored());
        assert!(session.tick(gone));
        assert!(!session.press(Position::new(0, 0)).unwrap().event.is_ignored());
    }

    #[test]
    fn test_pointer_routing() {
        let mut session = session();
        let transform = BoardTransform::new(3, 10.0);
        let outside = PointerPos::new(100.0, 5.0);
        assert!(session.pointer_down(&transform, outside).unwrap().event.is_ignored());

        for x in 0..3 {
            let point = transform.cell_center(Position::new(x, 0));
            if x == 0 {
                assert!(session.pointer_down(&transform, point).unwrap().event.is_started());
            } else {
                assert!(session.pointer_move(&transform, point).event.is_moved());
            }
        }
        assert!(session.pointer_up().unwrap().event.is_committed());
    }

    #[test]
    fn test_reset_restores_budget_and_history() {
        let mut session = session();
        draw(&mut session, 0);
        let now = Instant::now();
        session.request_hint(now).unwrap();
        session.reset();
        assert_eq!(session.hints().remaining(), 3);
        assert!(!session.hints().is_showing());
        assert_eq!(session.history().len(), 1);
        assert!(session.game().completed_pairs().is_empty());
    }
}
