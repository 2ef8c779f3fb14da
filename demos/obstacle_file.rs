use flightgrid::{render_route, BreadthFirstPlanner, FlightGrid, ObstacleTable, RoutePlanner};

// Loads the sample obstacle table, rasterizes it at 5 m altitude with a
// 3 m safety margin and routes across the resulting grid.
fn main() {
    let table =
        ObstacleTable::load("data/colliders_small.csv").expect("could not load obstacle table");
    let grid =
        FlightGrid::from_obstacles(&table.records, 5.0, 3.0).expect("obstacle table is empty");
    println!(
        "{} obstacles, {}x{} cells, origin ({}, {})",
        table.records.len(),
        grid.north_size(),
        grid.east_size(),
        grid.north_min,
        grid.east_min
    );
    let start = grid.world_to_cell(12.0, 25.0);
    let goal = grid.world_to_cell(47.0, 25.0);
    match BreadthFirstPlanner
        .route(&grid, start, goal)
        .expect("start or goal is blocked")
    {
        Some(route) => {
            println!("route over {} actions, cost {}", route.len(), route.cost);
            print!("{}", render_route(&grid, start, &route.actions));
        }
        None => println!("goal is not reachable"),
    }
}
