use gridlink_core::{DispatchQueue, FlatGround, PlacementPlanner, RandomAssetPicker, Session, WalkerPhase};
use gridlink_service::{run_tick, submit, TracingRenderer};

fn session() -> Session<TracingRenderer, FlatGround> {
    let planner = PlacementPlanner::new(1.0, vec!["a".into(), "b".into()], RandomAssetPicker::seeded(3)).unwrap();
    Session::new(planner, 0.2, TracingRenderer::default(), FlatGround::default())
}

#[test]
fn first_agent_update_spawns_walker_idle() {
    let q = DispatchQueue::new();
    let mut s = session();
    submit(&q, "{\"agentPosition\":[2,3]}").unwrap();
    let summary = run_tick(&q, &mut s);
    assert_eq!(summary.executed, 1);
    assert_eq!(s.walker().phase(), WalkerPhase::Idle);
    assert_eq!(s.renderer().footprints, 0);
}

#[test]
fn tick_applies_grid_and_settles_motion() {
    let q = DispatchQueue::new();
    let mut s = session();
    submit(&q, "{\"matrix\":[[-10,1,-10],[1,1,1],[-10,-10,2]],\"agentPosition\":[1,0]}").unwrap();
    submit(&q, "{\"agentPosition\":[1,1]}").unwrap();
    submit(&q, "{\"agentPosition\":[1,2]}").unwrap();

    let summary = run_tick(&q, &mut s);
    assert_eq!(summary.executed, 4);
    assert_eq!(summary.rejected, 0);
    assert_eq!(s.renderer().buildings, 3);
    assert_eq!(s.renderer().tiles, 5);
    // two moves in one tick: one motion in flight, one footprint
    assert_eq!(s.renderer().footprints, 1);
    assert_eq!(s.walker().phase(), WalkerPhase::Idle);
    assert!(q.is_empty());
}

#[test]
fn rejected_grid_is_counted_and_previous_grid_kept() {
    let q = DispatchQueue::new();
    let mut s = session();
    submit(&q, "{\"matrix\":[[1,2]]}").unwrap();
    run_tick(&q, &mut s);
    submit(&q, "{\"matrix\":[[1,2],[3]]}").unwrap();
    let summary = run_tick(&q, &mut s);
    assert_eq!(summary.rejected, 1);
    assert_eq!(s.grid().dims(), Some((1, 2)));
}

#[test]
fn agent_moves_at_coordinate_extremes_do_not_break_the_tick() {
    let q = DispatchQueue::new();
    let mut s = session();
    submit(&q, "{\"agentPosition\":[-2147483648,0]}").unwrap();
    submit(&q, "{\"agentPosition\":[2147483647,0]}").unwrap();

    let summary = run_tick(&q, &mut s);
    assert_eq!(summary.executed, 2);
    assert_eq!(s.walker().state().position, gridlink_core::Cell::new(i32::MAX, 0));
    assert_eq!(s.walker().state().facing, gridlink_core::Direction { x: 0.0, z: 1.0 });
    assert_eq!(s.renderer().footprints, 1);
}
