use derive_more::IsVariant;
use gemcascade_core::Position;

/// The two-step swap selection.
///
/// A swap is entered as two selections: the first cell is remembered here,
/// and selecting an adjacent cell commits the swap.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, IsVariant)]
pub enum Selection {
    /// Nothing is selected.
    #[default]
    None,
    /// One cell is waiting for its swap partner.
    One(Position),
}

impl Selection {
    /// Returns the selected cell, if any.
    #[must_use]
    pub fn position(self) -> Option<Position> {
        match self {
            Self::None => None,
            Self::One(pos) => Some(pos),
        }
    }

    /// Decides what selecting `pos` means given the current state.
    ///
    /// Only the selection itself is updated; the engine performs the swap for
    /// [`Step::Commit`].
    pub(crate) fn step(&mut self, pos: Position) -> Step {
        match *self {
            Self::None => {
                *self = Self::One(pos);
                Step::Select
            }
            Self::One(first) if first == pos => {
                *self = Self::None;
                Step::Deselect(first)
            }
            Self::One(first) if first.is_adjacent(pos) => {
                *self = Self::None;
                Step::Commit(first)
            }
            Self::One(first) => {
                *self = Self::One(pos);
                Step::Reselect(first)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Select,
    Deselect(Position),
    Reselect(Position),
    Commit(Position),
}

/// What an accepted or ignored selection did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IsVariant)]
pub enum SelectOutcome {
    /// The input was ignored: out of bounds, or a cascade is in progress.
    Rejected,
    /// The cell became the first selection.
    Selected,
    /// The already selected cell was selected again and dropped.
    Deselected,
    /// A non-adjacent cell replaced the previous selection.
    Reselected,
    /// An adjacent swap produced a match and a cascade started.
    Committed,
    /// An adjacent swap produced no match and was undone.
    Reverted,
}

impl SelectOutcome {
    /// Returns `true` unless the input was ignored.
    #[must_use]
    pub fn is_accepted(self) -> bool {
        !self.is_rejected()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_same_cell_twice_clears() {
        let mut selection = Selection::None;
        let pos = Position::new(0, 0);
        assert_eq!(selection.step(pos), Step::Select);
        assert_eq!(selection.position(), Some(pos));
        assert_eq!(selection.step(pos), Step::Deselect(pos));
        assert!(selection.is_none());
    }

    #[test]
    fn test_adjacent_commits_and_far_reselects() {
        let mut selection = Selection::None;
        selection.step(Position::new(2, 2));
        assert_eq!(
            selection.step(Position::new(4, 2)),
            Step::Reselect(Position::new(2, 2))
        );
        assert_eq!(selection, Selection::One(Position::new(4, 2)));

        assert_eq!(
            selection.step(Position::new(4, 3)),
            Step::Commit(Position::new(4, 2))
        );
        assert!(selection.is_none());
    }

    #[test]
    fn test_diagonal_is_not_adjacent() {
        let mut selection = Selection::One(Position::new(1, 1));
        assert_eq!(
            selection.step(Position::new(2, 2)),
            Step::Reselect(Position::new(1, 1))
        );
    }
}
