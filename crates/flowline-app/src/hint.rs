//! Per-attempt hints that briefly reveal one flow's solution path.

use std::time::{Duration, Instant};

use flowline_core::{Color, Flow, PairId, Position};
use flowline_game::Controller;
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg64Mcg;

use crate::settings::HintSettings;

/// Reasons a hint request is declined.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum HintUnavailable {
    #[display("no hints left")]
    NoHintsLeft,
    #[display("a hint is already showing")]
    HintShowing,
    #[display("the puzzle is already solved")]
    Solved,
    #[display("every pair is already connected")]
    NothingToHint,
    /// The chosen flow carries no usable solution path. The hint is refunded.
    #[display("pair {pair_id} has no usable solution path")]
    MalformedSolution {
        #[error(not(source))]
        pair_id: PairId,
    },
}

/// A solution path being revealed point by point.
///
/// The reveal is a pure function of elapsed time and never touches the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintReveal {
    pair_id: PairId,
    color: Color,
    points: Vec<Position>,
    started_at: Instant,
    animation: Duration,
    visible: Duration,
}

impl HintReveal {
    #[must_use]
    pub fn new(flow: &Flow, started_at: Instant, settings: &HintSettings) -> Self {
        Self {
            pair_id: flow.pair_id.clone(),
            color: flow.color.clone(),
            points: flow.solution_path.clone(),
            started_at,
            animation: settings.animation,
            visible: settings.visible,
        }
    }

    #[must_use]
    pub fn pair_id(&self) -> &PairId {
        &self.pair_id
    }

    #[must_use]
    pub fn color(&self) -> &Color {
        &self.color
    }

    #[must_use]
    pub fn points(&self) -> &[Position] {
        &self.points
    }

    #[must_use]
    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    /// Returns the number of points shown `elapsed` after the start, or
    /// `None` once the hint has disappeared.
    ///
    /// The first point shows at once and one more follows every
    /// `animation / segments`, so the last point lands exactly when the
    /// animation ends.
    #[must_use]
    pub fn visible_count_at(&self, elapsed: Duration) -> Option<usize> {
        if elapsed >= self.animation + self.visible {
            return None;
        }
        let len = self.points.len();
        let segments = len.saturating_sub(1);
        if segments == 0 || self.animation.is_zero() {
            return Some(len);
        }
        let stepped = elapsed.as_nanos() * segments as u128 / self.animation.as_nanos();
        let shown = usize::try_from(stepped).unwrap_or(usize::MAX).saturating_add(1);
        Some(shown.min(len))
    }

    /// Returns the points shown at `now`, or `None` once the hint has disappeared.
    #[must_use]
    pub fn visible_points(&self, now: Instant) -> Option<&[Position]> {
        let elapsed = now.saturating_duration_since(self.started_at);
        self.visible_count_at(elapsed)
            .map(|count| &self.points[..count])
    }

    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        self.visible_points(now).is_none()
    }
}

/// Hint budget and the hint currently on screen.
#[derive(Debug, Clone)]
pub struct Hints {
    settings: HintSettings,
    remaining: u32,
    current: Option<HintReveal>,
    rng: Pcg64Mcg,
}

impl Hints {
    /// Creates a full budget with a randomly seeded generator.
    #[must_use]
    pub fn new(settings: HintSettings) -> Self {
        Self::with_rng(settings, Pcg64Mcg::from_rng(&mut rand::rng()))
    }

    /// Creates a full budget picking flows with `rng`.
    #[must_use]
    pub fn with_rng(settings: HintSettings, rng: Pcg64Mcg) -> Self {
        Self {
            remaining: settings.max_hints,
            settings,
            current: None,
            rng,
        }
    }

    /// Creates a full budget with a generator seeded from `seed`.
    #[must_use]
    pub fn with_seed(settings: HintSettings, seed: u64) -> Self {
        Self::with_rng(settings, Pcg64Mcg::seed_from_u64(seed))
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn max(&self) -> u32 {
        self.settings.max_hints
    }

    #[must_use]
    pub fn current(&self) -> Option<&HintReveal> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn is_showing(&self) -> bool {
        self.current.is_some()
    }

    /// Reveals the solution of a random unconnected flow.
    ///
    /// Any gesture in progress is abandoned first. A hint that has already
    /// disappeared by `now` no longer blocks the request.
    pub fn request(
        &mut self,
        controller: &mut Controller,
        now: Instant,
    ) -> Result<&HintReveal, HintUnavailable> {
        self.tick(now);
        if controller.is_solved() {
            return Err(HintUnavailable::Solved);
        }
        if self.current.is_some() {
            return Err(HintUnavailable::HintShowing);
        }
        if self.remaining == 0 {
            return Err(HintUnavailable::NoHintsLeft);
        }

        controller.cancel();
        let puzzle = controller.game().shared_puzzle();
        let incomplete: Vec<&Flow> = puzzle
            .flows
            .iter()
            .filter(|flow| !controller.game().is_pair_complete(&flow.pair_id))
            .collect();
        if incomplete.is_empty() {
            return Err(HintUnavailable::NothingToHint);
        }

        self.remaining -= 1;
        let flow = incomplete[self.rng.random_range(0..incomplete.len())];
        if !flow.has_usable_solution() {
            log::warn!(
                "puzzle {} pair {} has no usable solution path, refunding hint",
                puzzle.id,
                flow.pair_id
            );
            self.remaining += 1;
            return Err(HintUnavailable::MalformedSolution {
                pair_id: flow.pair_id.clone(),
            });
        }

        controller.clear_partial(&flow.pair_id);
        log::debug!("revealing pair {} ({} left)", flow.pair_id, self.remaining);
        Ok(self
            .current
            .insert(HintReveal::new(flow, now, &self.settings)))
    }

    /// Drops the hint once it has disappeared.
    ///
    /// Returns `true` if a hint was dropped.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.current.as_ref().is_some_and(|hint| hint.is_expired(now)) {
            self.current = None;
            return true;
        }
        false
    }

    /// Restores the full budget and hides any hint.
    pub fn reset(&mut self) {
        self.remaining = self.settings.max_hints;
        self.current = None;
    }
}
