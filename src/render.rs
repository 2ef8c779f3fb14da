//! Character-array rendering of a grid and a route across it, for logs
//! and terminal output. Blocked cells print as `O`, free cells as blanks,
//! the route as one direction glyph per action at the cell it leaves,
//! with `S` and `G` over the endpoints.

use crate::action::Action;
use crate::grid::FlightGrid;
use grid_util::grid::ValueGrid;
use grid_util::point::Point;

/// Renders `grid` with `actions` walked from `start`, row 0 first. Steps
/// that would leave the grid are skipped rather than drawn.
pub fn render_route(grid: &FlightGrid, start: Point, actions: &[Action]) -> String {
    let mut rows: Vec<Vec<char>> = (0..grid.north_size() as i32)
        .map(|y| {
            (0..grid.east_size() as i32)
                .map(|x| if grid.grid.get(x, y) { 'O' } else { ' ' })
                .collect()
        })
        .collect();
    let mut mark = |cell: Point, glyph: char| {
        if grid.in_bounds(cell.x, cell.y) {
            rows[cell.y as usize][cell.x as usize] = glyph;
        }
    };
    let mut pos = start;
    for action in actions {
        mark(pos, action.glyph());
        pos = action.apply(pos);
    }
    mark(start, 'S');
    mark(pos, 'G');
    let mut out = String::new();
    for row in rows {
        out.extend(row);
        out.push('\n');
    }
    out
}
