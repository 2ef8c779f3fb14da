use flightgrid::{render_route, BreadthFirstPlanner, FlightGrid, RoutePlanner};
use grid_util::grid::ValueGrid;
use grid_util::point::Point;

// In this example a route is found on a grid with shape
// S#....
// .#.#..
// .#....
// .#..#.
// ...#G.
// where
// - # marks a blocked cell
// - S marks the start
// - G marks the goal
fn main() {
    let mut grid = FlightGrid::new(6, 5, false);
    for (x, y) in [(1, 0), (1, 1), (3, 1), (1, 2), (1, 3), (4, 3), (3, 4)] {
        grid.set(x, y, true);
    }
    grid.generate_components();
    let start = Point::new(0, 0);
    let goal = Point::new(4, 4);
    if let Some(route) = BreadthFirstPlanner.route(&grid, start, goal).unwrap() {
        println!("A route with cost {} has been found:", route.cost);
        print!("{}", render_route(&grid, start, &route.actions));
    }
}
