use crate::grid::FlightGrid;
use grid_util::point::Point;
use smallvec::SmallVec;

/// Cost of a diagonal move. Orthogonal moves cost 1.
pub const DIAGONAL_COST: f64 = std::f64::consts::SQRT_2;

/// A single grid move. Deltas are expressed as `(d_row, d_col)` where the
/// row index grows with north ([Point::y]) and the column index grows with
/// east ([Point::x]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

/// All eight moves in canonical order. Successor expansion iterates this
/// array, so the order doubles as the tie-break rule of the FIFO planner.
pub const ACTIONS: [Action; 8] = [
    Action::Up,
    Action::Down,
    Action::Left,
    Action::Right,
    Action::UpLeft,
    Action::UpRight,
    Action::DownLeft,
    Action::DownRight,
];

impl Action {
    /// `(d_row, d_col)` of the move.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Action::Up => (-1, 0),
            Action::Down => (1, 0),
            Action::Left => (0, -1),
            Action::Right => (0, 1),
            Action::UpLeft => (-1, -1),
            Action::UpRight => (-1, 1),
            Action::DownLeft => (1, -1),
            Action::DownRight => (1, 1),
        }
    }

    pub const fn diagonal(self) -> bool {
        matches!(
            self,
            Action::UpLeft | Action::UpRight | Action::DownLeft | Action::DownRight
        )
    }

    pub const fn cost(self) -> f64 {
        if self.diagonal() {
            DIAGONAL_COST
        } else {
            1.0
        }
    }

    /// Rendering glyph for the move. The two diagonal axes share a slash
    /// each, matching the direction of travel through the cell.
    pub const fn glyph(self) -> char {
        match self {
            Action::Up => '^',
            Action::Down => 'v',
            Action::Left => '<',
            Action::Right => '>',
            Action::UpLeft => '\\',
            Action::UpRight => '/',
            Action::DownLeft => '/',
            Action::DownRight => '\\',
        }
    }

    /// The cell reached by taking this move from `cell`.
    pub fn apply(self, cell: Point) -> Point {
        let (d_row, d_col) = self.delta();
        Point::new(cell.x + d_col, cell.y + d_row)
    }
}

/// The subset of [ACTIONS] that stay on the grid and land on a free cell
/// when taken from `cell`, in canonical order. A diagonal move is checked
/// against its destination only; both orthogonal neighbours of the corner
/// may be blocked.
pub fn valid_actions(grid: &FlightGrid, cell: Point) -> SmallVec<[Action; 8]> {
    ACTIONS
        .iter()
        .copied()
        .filter(|action| grid.can_move_to(action.apply(cell)))
        .collect()
}
