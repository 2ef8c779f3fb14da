//! End-to-end tests of the obstacle-table → grid → route pipeline.

use flightgrid::{
    render_route, BreadthFirstPlanner, FlightGrid, ObstacleRecord, ObstacleTable, Route,
    RoutePlanner, UniformCostPlanner,
};
use grid_util::point::Point;

fn sample_obstacles() -> Vec<ObstacleRecord> {
    vec![
        ObstacleRecord::new(15.0, 15.0, 10.0, 3.0, 3.0, 10.0),
        ObstacleRecord::new(15.0, 35.0, 10.0, 3.0, 3.0, 10.0),
        ObstacleRecord::new(30.0, 25.0, 15.0, 4.0, 4.0, 15.0),
        ObstacleRecord::new(45.0, 15.0, 10.0, 3.0, 3.0, 10.0),
        ObstacleRecord::new(45.0, 35.0, 10.0, 3.0, 3.0, 10.0),
    ]
}

fn replay(grid: &FlightGrid, start: Point, route: &Route) -> Point {
    let mut pos = start;
    let mut total = 0.0;
    for action in &route.actions {
        assert!(flightgrid::valid_actions(grid, pos).contains(action));
        pos = action.apply(pos);
        total += action.cost();
    }
    assert!((total - route.cost).abs() < 1e-9);
    pos
}

#[test]
fn obstacles_to_route() {
    let grid = FlightGrid::from_obstacles(&sample_obstacles(), 5.0, 3.0).unwrap();
    assert_eq!(grid.north_size(), 36);
    assert_eq!(grid.east_size(), 26);
    assert_eq!(grid.north_min, 12.0);
    assert_eq!(grid.east_min, 12.0);

    let start = grid.world_to_cell(12.0, 25.0);
    let goal = grid.world_to_cell(47.0, 25.0);
    assert_eq!(start, Point::new(13, 0));
    assert_eq!(goal, Point::new(13, 35));

    let route = BreadthFirstPlanner.route(&grid, start, goal).unwrap().unwrap();
    assert_eq!(replay(&grid, start, &route), goal);

    let rendered = render_route(&grid, start, &route.actions);
    assert_eq!(rendered.lines().count(), grid.north_size());
    assert!(rendered.contains('S'));
    assert!(rendered.contains('G'));
    assert!(rendered.contains('O'));
}

#[test]
fn planners_agree_on_reachability_and_order() {
    let grid = FlightGrid::from_obstacles(&sample_obstacles(), 5.0, 3.0).unwrap();
    let start = Point::new(13, 0);
    let goal = Point::new(13, 35);

    let fifo = BreadthFirstPlanner.route(&grid, start, goal).unwrap().unwrap();
    let ordered = UniformCostPlanner.route(&grid, start, goal).unwrap().unwrap();
    assert!(ordered.cost <= fifo.cost + 1e-9);
    assert_eq!(replay(&grid, start, &ordered), goal);
}

#[test]
fn high_altitude_slice_is_unobstructed() {
    // All sample obstacles top out below 31 m once inflated by 3 m.
    let grid = FlightGrid::from_obstacles(&sample_obstacles(), 40.0, 3.0).unwrap();
    let start = Point::new(0, 0);
    let goal = Point::new(25, 35);
    let route = BreadthFirstPlanner.route(&grid, start, goal).unwrap().unwrap();
    assert_eq!(replay(&grid, start, &route), goal);
}

#[test]
fn pipeline_is_deterministic() {
    let table = ObstacleTable::load(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/data/colliders_small.csv"
    ))
    .unwrap();
    assert_eq!(table.records, sample_obstacles());
    assert_eq!(table.center.lat0, 37.792480);

    let start = Point::new(13, 0);
    let goal = Point::new(13, 35);
    let first_grid = FlightGrid::from_obstacles(&table.records, 5.0, 3.0).unwrap();
    let first = BreadthFirstPlanner
        .route(&first_grid, start, goal)
        .unwrap()
        .unwrap();
    for _ in 0..3 {
        let grid = FlightGrid::from_obstacles(&table.records, 5.0, 3.0).unwrap();
        let route = BreadthFirstPlanner.route(&grid, start, goal).unwrap().unwrap();
        assert_eq!(route, first);
    }
}
