//! The puzzles shipped with the game, written as solved layouts.

use flowline_core::Difficulty;

/// A built-in puzzle: tier, display name and solved layout.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BuiltinLevel {
    pub(crate) difficulty: Difficulty,
    pub(crate) name: &'static str,
    pub(crate) layout: &'static str,
}

const fn level(difficulty: Difficulty, name: &'static str, layout: &'static str) -> BuiltinLevel {
    BuiltinLevel {
        difficulty,
        name,
        layout,
    }
}

/// Ids are assigned per tier in declaration order.
pub(crate) const LEVELS: &[BuiltinLevel] = &[
    level(
        Difficulty::Easy,
        "First Steps",
        "
        R r r R
        B b b B
        G Y y Y
        g g g G
        ",
    ),
    level(
        Difficulty::Easy,
        "Corner",
        "
        R r r r
        B b b r
        Y Y B r
        G g G R
        ",
    ),
    level(
        Difficulty::Easy,
        "Stripes",
        "
        R B b B
        r Y y Y
        r G g G
        R O o O
        ",
    ),
    level(
        Difficulty::Medium,
        "Hook",
        "
        R r r r r
        B b b G r
        Y y b g r
        O Y B g r
        o o O G R
        ",
    ),
    level(
        Difficulty::Medium,
        "Frame",
        "
        G g g g G
        R r r r R
        B Y y Y B
        b O o O b
        b b b b b
        ",
    ),
    level(
        Difficulty::Medium,
        "Ladder",
        "
        R r r r r
        Y y y y r
        B b B Y r
        G g g G r
        O o o O R
        ",
    ),
    level(
        Difficulty::Hard,
        "Cradle",
        "
        R r r r r r
        B b b b B r
        G Y y Y G r
        g O o O g r
        g g g g g r
        P p p p P R
        ",
    ),
    level(
        Difficulty::Hard,
        "Cascade",
        "
        R r r r r r
        B b b b b r
        G g g G b r
        Y y y Y b r
        O o o O B r
        P p p p P R
        ",
    ),
];
