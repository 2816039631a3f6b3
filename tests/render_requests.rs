//! The cast's contract with its renderer.

use ceviwalk::{Cast, RenderRequest, Renderer, Role, ScriptedRandom, WalkerId, Z_ORDER_BASE};
use glam::DVec2;
use mockall::{mock, Sequence};
use rstest::{fixture, rstest};
use test_utils::fixtures::place;
use test_utils::{TEST_CELL, TEST_VIEWPORT};

mock! {
    pub Sink {}
    impl Renderer for Sink {
        fn present(&mut self, walker: WalkerId, request: &RenderRequest);
    }
}

/// Every walker stationary at the origin.
#[fixture]
fn idle_cast() -> Cast {
    Cast::with_cell_size(TEST_CELL, TEST_CELL).unwrap_or_else(|e| panic!("cast rejected: {e}"))
}

#[rstest]
fn walkers_are_presented_in_cast_order(mut idle_cast: Cast) {
    let mut sink = MockSink::new();
    let mut seq = Sequence::new();
    for id in 0..3 {
        sink.expect_present()
            .withf(move |walker, request| *walker == WalkerId(id) && request.cell.is_some())
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
    }

    let mut rng = ScriptedRandom::default();
    idle_cast.process_all(TEST_VIEWPORT, &mut rng, &mut sink);
}

#[rstest]
fn unchanged_cells_are_not_resent(mut idle_cast: Cast) {
    let mut rng = ScriptedRandom::default();
    let mut first = Vec::new();
    idle_cast.process_all(TEST_VIEWPORT, &mut rng, &mut first);
    assert_eq!(first.len(), 3);

    let mut sink = MockSink::new();
    sink.expect_present()
        .withf(|_, request| request.cell.is_none() && request.placement.x == 0)
        .times(3)
        .return_const(());
    idle_cast.process_all(TEST_VIEWPORT, &mut rng, &mut sink);
}

#[rstest]
fn lower_walkers_draw_on_top(mut idle_cast: Cast) {
    let mut rng = ScriptedRandom::default();
    place(&mut idle_cast, Role::Tak, DVec2::new(40.0, 120.0), DVec2::ZERO);
    let mut requests = Vec::new();
    idle_cast.process_all(TEST_VIEWPORT, &mut rng, &mut requests);

    let z_orders: Vec<i32> = requests
        .iter()
        .map(|(_, request)| request.placement.z_order)
        .collect();
    assert_eq!(z_orders, vec![Z_ORDER_BASE, Z_ORDER_BASE, Z_ORDER_BASE + 120]);
}
