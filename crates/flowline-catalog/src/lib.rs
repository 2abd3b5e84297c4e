//! Puzzle library for flowline.
//!
//! A [`Catalog`] holds puzzles bucketed by [`Difficulty`], each bucket ordered
//! by id. The built-in library ships with the crate; further packs can be loaded
//! from JSON in the puzzle contract format.
//!
//! # Examples
//!
//! ```
//! use flowline_catalog::Catalog;
//! use flowline_core::Difficulty;
//!
//! let catalog = Catalog::builtin();
//! assert!(catalog.level_count(Difficulty::Easy) > 0);
//!
//! let first = catalog.get(Difficulty::Easy, 0).unwrap();
//! assert_eq!(first.id, 0);
//! assert!(first.flows.iter().all(|flow| flow.has_usable_solution()));
//! ```

use std::collections::BTreeMap;

use flowline_core::{Difficulty, Puzzle, PuzzleError};

mod builtin;

/// Errors raised while building a catalog.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum CatalogError {
    /// The pack is not valid JSON or does not match the puzzle contract.
    #[display("malformed puzzle pack: {_0}")]
    Json(serde_json::Error),
    /// A puzzle failed validation.
    #[display("invalid puzzle {difficulty}/{id}: {source}")]
    #[from(ignore)]
    InvalidPuzzle {
        /// Tier of the puzzle.
        difficulty: Difficulty,
        /// Puzzle id.
        id: u32,
        /// What is wrong with it.
        source: PuzzleError,
    },
    /// Two puzzles share a tier and id.
    #[display("puzzle {difficulty}/{id} is defined more than once")]
    #[from(ignore)]
    DuplicateId {
        /// Tier of the puzzles.
        difficulty: Difficulty,
        /// Shared id.
        id: u32,
    },
}

/// Puzzles bucketed by difficulty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    levels: BTreeMap<Difficulty, Vec<Puzzle>>,
}

impl Catalog {
    /// Returns the built-in library.
    ///
    /// Ids are assigned per tier in declaration order, starting at zero. A
    /// layout that fails to parse is logged and left out.
    #[must_use]
    pub fn builtin() -> Self {
        let mut next_id: BTreeMap<Difficulty, u32> = BTreeMap::new();
        let mut levels: BTreeMap<Difficulty, Vec<Puzzle>> = BTreeMap::new();
        for level in builtin::LEVELS {
            let id = next_id.entry(level.difficulty).or_default();
            match Puzzle::from_solved_layout(*id, level.difficulty, level.name, level.layout) {
                Ok(puzzle) => levels.entry(level.difficulty).or_default().push(puzzle),
                Err(err) => log::error!("built-in puzzle {:?} is broken: {err}", level.name),
            }
            *id += 1;
        }
        let catalog = Self { levels };
        catalog.validate_ids();
        catalog
    }

    /// Builds a catalog from puzzles, validating each one.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidPuzzle`] if a puzzle fails
    /// [`Puzzle::validate`], or [`CatalogError::DuplicateId`] if two puzzles
    /// share a tier and id.
    pub fn from_puzzles<I>(puzzles: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = Puzzle>,
    {
        let mut catalog = Self::default();
        for puzzle in puzzles {
            catalog.insert(puzzle)?;
        }
        Ok(catalog)
    }

    /// Loads a JSON pack: an array of puzzles in the contract format.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Json`] for malformed JSON, otherwise the errors of
    /// [`from_puzzles`](Self::from_puzzles).
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let puzzles: Vec<Puzzle> = serde_json::from_str(json)?;
        let catalog = Self::from_puzzles(puzzles)?;
        catalog.validate_ids();
        Ok(catalog)
    }

    /// Adds every puzzle of `other`, replacing puzzles with the same tier and id.
    pub fn merge(&mut self, other: Self) {
        for puzzle in other.levels.into_values().flatten() {
            let bucket = self.levels.entry(puzzle.difficulty).or_default();
            match bucket.binary_search_by_key(&puzzle.id, |p| p.id) {
                Ok(index) => bucket[index] = puzzle,
                Err(index) => bucket.insert(index, puzzle),
            }
        }
    }

    fn insert(&mut self, puzzle: Puzzle) -> Result<(), CatalogError> {
        let (difficulty, id) = (puzzle.difficulty, puzzle.id);
        puzzle
            .validate()
            .map_err(|source| CatalogError::InvalidPuzzle {
                difficulty,
                id,
                source,
            })?;
        let bucket = self.levels.entry(difficulty).or_default();
        match bucket.binary_search_by_key(&id, |p| p.id) {
            Ok(_) => Err(CatalogError::DuplicateId { difficulty, id }),
            Err(index) => {
                bucket.insert(index, puzzle);
                Ok(())
            }
        }
    }

    /// Returns the puzzle with `id` in `difficulty`.
    ///
    /// Logs a warning when no such puzzle exists.
    #[must_use]
    pub fn get(&self, difficulty: Difficulty, id: u32) -> Option<&Puzzle> {
        let found = self
            .puzzles(difficulty)
            .iter()
            .find(|puzzle| puzzle.id == id);
        if found.is_none() {
            log::warn!("no {difficulty} puzzle with id {id}");
        }
        found
    }

    /// Returns the number of puzzles in `difficulty`.
    #[must_use]
    pub fn level_count(&self, difficulty: Difficulty) -> usize {
        self.puzzles(difficulty).len()
    }

    /// Returns the puzzles of `difficulty`, ordered by id.
    #[must_use]
    pub fn puzzles(&self, difficulty: Difficulty) -> &[Puzzle] {
        self.levels.get(&difficulty).map_or(&[], Vec::as_slice)
    }

    /// Returns the puzzle following `id` in `difficulty`.
    #[must_use]
    pub fn next(&self, difficulty: Difficulty, id: u32) -> Option<&Puzzle> {
        self.puzzles(difficulty).iter().find(|puzzle| puzzle.id > id)
    }

    /// Returns every puzzle, easiest tier first.
    pub fn iter(&self) -> impl Iterator<Item = &Puzzle> {
        self.levels.values().flatten()
    }

    /// Checks that each tier's ids run `0, 1, 2, ...` and that every puzzle
    /// sits in the bucket of its own difficulty.
    ///
    /// Problems are logged as errors; returns `true` if none were found.
    pub fn validate_ids(&self) -> bool {
        let mut ok = true;
        for (&difficulty, puzzles) in &self.levels {
            for (expected, puzzle) in (0..).zip(puzzles) {
                if puzzle.id != expected {
                    log::error!(
                        "{difficulty} puzzle ids break sequence: expected {expected}, found {}",
                        puzzle.id
                    );
                    ok = false;
                    break;
                }
            }
            for puzzle in puzzles {
                if puzzle.difficulty != difficulty {
                    log::error!(
                        "puzzle {} is marked {} but listed under {difficulty}",
                        puzzle.id,
                        puzzle.difficulty
                    );
                    ok = false;
                }
            }
        }
        ok
    }
}
