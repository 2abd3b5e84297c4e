//! Plain-text board rendering.
//!
//! Dots are drawn as their uppercase palette letter, path cells in lowercase,
//! empty cells as `.`, and cells of a showing hint as `*`. Cells are separated
//! by single spaces, so an untouched board renders back into a valid layout.

use flowline_core::{Grid, PairId, Position, Puzzle, palette};
use flowline_game::{CellState, Game};

/// Returns the letter drawn for dots of `pair_id`.
///
/// Pairs outside the palette fall back to the first letter of their id.
#[must_use]
pub fn pair_letter(pair_id: &PairId) -> char {
    palette::by_name(pair_id.as_str())
        .map(|entry| entry.letter)
        .or_else(|| pair_id.as_str().chars().next())
        .map_or('?', |ch| ch.to_ascii_uppercase())
}

/// Renders the current board, overlaying `hint` if given.
#[must_use]
pub fn render_game(game: &Game, hint: Option<&[Position]>) -> String {
    let mut chars = Grid::from_fn(game.board().size(), |pos| match game.board().cell(pos) {
        Some(CellState::Dot(dot)) => pair_letter(&dot.pair_id),
        Some(CellState::Path(mark)) => pair_letter(&mark.pair_id).to_ascii_lowercase(),
        Some(CellState::Empty) | None => '.',
    });
    for &pos in hint.unwrap_or_default() {
        if let Some(ch) = chars.get_mut(pos)
            && !ch.is_ascii_uppercase()
        {
            *ch = '*';
        }
    }
    join_rows(&chars)
}

/// Renders a puzzle's dots, with its solution paths if `solution` is set.
#[must_use]
pub fn render_puzzle(puzzle: &Puzzle, solution: bool) -> String {
    let mut chars = Grid::new(puzzle.size, '.');
    for flow in &puzzle.flows {
        let letter = pair_letter(&flow.pair_id);
        if solution {
            for &pos in &flow.solution_path {
                if let Some(ch) = chars.get_mut(pos) {
                    *ch = letter.to_ascii_lowercase();
                }
            }
        }
        for dot in &flow.dots {
            if let Some(ch) = chars.get_mut(dot.position) {
                *ch = letter;
            }
        }
    }
    join_rows(&chars)
}

/// Summarises connected pairs, board fill and the win state in one line.
#[must_use]
pub fn status_line(game: &Game) -> String {
    let progress = game.progress();
    let mut line = format!(
        "pairs {}/{}, filled {}%",
        progress.connected_pairs,
        progress.total_pairs,
        progress.fill_percent()
    );
    if game.is_solved() {
        line.push_str(", solved");
    }
    line
}

fn join_rows(chars: &Grid<char>) -> String {
    let mut out = String::new();
    for row in chars.rows() {
        for (i, &ch) in row.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push(ch);
        }
        out.push('\n');
    }
    out
}
