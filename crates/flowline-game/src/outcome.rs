use flowline_core::PairId;

/// Why a cell cannot be entered by the active path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum MoveRejection {
    /// No path is being drawn.
    #[display("no path is being drawn")]
    NoActivePath,
    /// The target lies outside the board.
    #[display("target is outside the board")]
    OutOfBounds,
    /// The target is not orthogonally adjacent to the path's last point.
    #[display("target is not adjacent to the path end")]
    NotAdjacent,
    /// The target holds a dot of another pair.
    #[display("target holds another pair's dot")]
    ForeignDot,
    /// The target is the dot the path started from.
    #[display("target is the path's own start dot")]
    StartDot,
    /// The target is covered by another pair's path.
    #[display("target is covered by another path")]
    Crossing,
}

/// Result of [`Game::extend_or_retrace`](crate::Game::extend_or_retrace).
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum MoveOutcome {
    /// The target was appended to the active path.
    Extended {
        /// `true` if the target is the partner dot of the path's start.
        reached_partner: bool,
    },
    /// The target was already on the path; everything after it was removed.
    Retraced {
        /// Number of points removed.
        removed: usize,
    },
    /// The target is the path's current end.
    Unchanged,
    /// The move was refused and nothing changed.
    Rejected(MoveRejection),
}

/// Result of [`Game::begin_path`](crate::Game::begin_path).
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum BeginOutcome {
    /// A new path was started from the dot.
    Started(PairId),
    /// The dot belongs to a pair that is already connected.
    PairComplete(PairId),
    /// The position holds no dot.
    NotADot,
}

/// Result of [`Game::commit`](crate::Game::commit).
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum CommitOutcome {
    /// The path connects both dots and the pair is now complete.
    Committed(PairId),
    /// The path did not reach its partner dot and was erased.
    Discarded(PairId),
    /// No path was being drawn.
    NoActivePath,
}

/// Why a tap-to-connect was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum ConnectRejection {
    /// One of the positions holds no dot.
    #[display("both positions must hold dots")]
    NotDots,
    /// The dots belong to different pairs, or are the same dot.
    #[display("dots are not partners")]
    NotPartners,
    /// The dots are not orthogonally adjacent.
    #[display("dots are not adjacent")]
    NotAdjacent,
    /// The pair is already connected.
    #[display("pair is already connected")]
    PairComplete,
}

/// Result of [`Game::connect_adjacent`](crate::Game::connect_adjacent).
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum ConnectOutcome {
    /// The two dots were joined by a two-point path.
    Connected(PairId),
    /// Nothing changed.
    Rejected(ConnectRejection),
}
