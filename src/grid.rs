use crate::obstacle::ObstacleRecord;
use core::fmt;
use grid_util::grid::{BoolGrid, ValueGrid};
use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// Grid extents are the extrema over the obstacle set, so an empty set
    /// has no geometry to rasterize.
    #[error("cannot build a grid from an empty obstacle set")]
    DegenerateObstacleSet,
}

/// A single-altitude occupancy slice of the obstacle field. Wraps a
/// [BoolGrid] of cell values (`true` = blocked) together with the world
/// offsets `north_min`/`east_min` that map world coordinates to cell
/// indices, and a [UnionFind] over free cells for cheap reachability
/// queries.
///
/// Cells are addressed as [Point]s with `x` the east/column index and `y`
/// the north/row index.
#[derive(Clone, Debug)]
pub struct FlightGrid {
    pub grid: BoolGrid,
    pub north_min: f64,
    pub east_min: f64,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl FlightGrid {
    /// Rasterizes `obstacles` into an occupancy grid at `altitude`, with
    /// every footprint inflated by `safety_distance` on all sides.
    ///
    /// An obstacle is painted only when the altitude lies strictly inside
    /// its safety-inflated vertical extent; a slice exactly tangent to the
    /// inflated top or bottom face stays free. The painted footprint is
    /// floored on its low edges, ceiled on its high edges and clamped to
    /// the grid.
    pub fn from_obstacles(
        obstacles: &[ObstacleRecord],
        altitude: f64,
        safety_distance: f64,
    ) -> Result<FlightGrid, GridError> {
        if obstacles.is_empty() {
            return Err(GridError::DegenerateObstacleSet);
        }
        let mut north_min = f64::INFINITY;
        let mut north_max = f64::NEG_INFINITY;
        let mut east_min = f64::INFINITY;
        let mut east_max = f64::NEG_INFINITY;
        for o in obstacles {
            north_min = north_min.min(o.north - o.half_north);
            north_max = north_max.max(o.north + o.half_north);
            east_min = east_min.min(o.east - o.half_east);
            east_max = east_max.max(o.east + o.half_east);
        }
        let north_min = north_min.floor();
        let east_min = east_min.floor();
        let north_size = (north_max.ceil() - north_min).ceil() as usize;
        let east_size = (east_max.ceil() - east_min).ceil() as usize;

        let mut grid = BoolGrid::new(east_size, north_size, false);
        let mut painted = 0;
        if north_size > 0 && east_size > 0 {
            for o in obstacles {
                if !o.crosses_altitude(altitude, safety_distance) {
                    continue;
                }
                painted += 1;
                let row_lo = clamp_index(
                    (o.north - o.half_north - safety_distance - north_min).floor(),
                    north_size,
                );
                let row_hi = clamp_index(
                    (o.north + o.half_north + safety_distance - north_min).ceil(),
                    north_size,
                );
                let col_lo = clamp_index(
                    (o.east - o.half_east - safety_distance - east_min).floor(),
                    east_size,
                );
                let col_hi = clamp_index(
                    (o.east + o.half_east + safety_distance - east_min).ceil(),
                    east_size,
                );
                for row in row_lo..=row_hi {
                    for col in col_lo..=col_hi {
                        grid.set(col as i32, row as i32, true);
                    }
                }
            }
        }
        let mut flight_grid = FlightGrid {
            grid,
            north_min,
            east_min,
            components: UnionFind::new(east_size * north_size),
            components_dirty: true,
        };
        flight_grid.generate_components();
        info!(
            "rasterized {}/{} obstacles into {}x{} cells at altitude {} (safety margin {})",
            painted,
            obstacles.len(),
            north_size,
            east_size,
            altitude,
            safety_distance
        );
        Ok(flight_grid)
    }

    /// Number of rows (the north extent).
    pub fn north_size(&self) -> usize {
        self.grid.height
    }

    /// Number of columns (the east extent).
    pub fn east_size(&self) -> usize {
        self.grid.width
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.grid.index_in_bounds(x, y)
    }

    /// Whether `pos` is a legal destination: on the grid and free.
    pub fn can_move_to(&self, pos: Point) -> bool {
        self.in_bounds(pos.x, pos.y) && !self.grid.get_point(pos)
    }

    /// Cell containing the world coordinate `(north, east)`.
    pub fn world_to_cell(&self, north: f64, east: f64) -> Point {
        Point::new(
            (east - self.east_min).floor() as i32,
            (north - self.north_min).floor() as i32,
        )
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> usize {
        self.components.find(self.grid.get_ix_point(point))
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.in_bounds(start.x, start.y) && self.in_bounds(goal.x, goal.y) {
            let start_ix = self.grid.get_ix_point(start);
            let goal_ix = self.grid.get_ix_point(goal);
            !self.components.equiv(start_ix, goal_ix)
        } else {
            true
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up grid neighbours
    /// to the same components. Neighbourhood is the full 8-connectivity
    /// used by the planners, so diagonal corner passages join components.
    pub fn generate_components(&mut self) {
        let w = self.grid.width;
        let h = self.grid.height;
        self.components = UnionFind::new(w * h);
        self.components_dirty = false;
        for x in 0..w as i32 {
            for y in 0..h as i32 {
                if self.grid.get(x, y) {
                    continue;
                }
                let point = Point::new(x, y);
                let parent_ix = self.grid.get_ix_point(&point);
                let neighbours = [
                    Point::new(point.x + 1, point.y),
                    Point::new(point.x, point.y + 1),
                    Point::new(point.x + 1, point.y + 1),
                    Point::new(point.x + 1, point.y - 1),
                ]
                .into_iter()
                .filter(|p| self.can_move_to(*p))
                .map(|p| self.grid.get_ix_point(&p))
                .collect::<Vec<usize>>();
                for ix in neighbours {
                    self.components.union(parent_ix, ix);
                }
            }
        }
    }
}

fn clamp_index(value: f64, size: usize) -> usize {
    (value.max(0.0) as usize).min(size - 1)
}

impl fmt::Display for FlightGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.grid.height as i32 {
            let values = (0..self.grid.width as i32)
                .map(|x| self.grid.get(x, y) as i32)
                .collect::<Vec<i32>>();
            writeln!(f, "{:?}", values)?;
        }
        Ok(())
    }
}

impl ValueGrid<bool> for FlightGrid {
    fn new(width: usize, height: usize, default_value: bool) -> Self {
        FlightGrid {
            grid: BoolGrid::new(width, height, default_value),
            north_min: 0.0,
            east_min: 0.0,
            components: UnionFind::new(width * height),
            components_dirty: true,
        }
    }
    fn get(&self, x: i32, y: i32) -> bool {
        self.grid.get(x, y)
    }
    /// Updates a position on the grid. Joins newly connected components and
    /// flags the components as dirty if components are (potentially) broken
    /// apart into multiple.
    fn set(&mut self, x: i32, y: i32, blocked: bool) {
        let p = Point::new(x, y);
        if self.grid.get(x, y) != blocked && blocked {
            self.components_dirty = true;
        } else {
            let p_ix = self.grid.get_ix_point(&p);
            for n in [
                Point::new(p.x + 1, p.y),
                Point::new(p.x - 1, p.y),
                Point::new(p.x, p.y + 1),
                Point::new(p.x, p.y - 1),
                Point::new(p.x + 1, p.y + 1),
                Point::new(p.x + 1, p.y - 1),
                Point::new(p.x - 1, p.y + 1),
                Point::new(p.x - 1, p.y - 1),
            ] {
                if self.can_move_to(n) {
                    self.components.union(p_ix, self.grid.get_ix_point(&n));
                }
            }
        }
        self.grid.set(x, y, blocked);
    }
    fn width(&self) -> usize {
        self.grid.width()
    }
    fn height(&self) -> usize {
        self.grid.height()
    }
}
