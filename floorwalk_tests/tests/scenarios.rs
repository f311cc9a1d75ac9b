// End-to-end navigation scenarios through `NavigationService`.

use floorwalk_nav::types::FloorId;
use floorwalk_nav::{ErrorKind, MapDatabase, NavError};
use floorwalk_tests::{TEST_BUILDING, TestBuilding, service_for, two_floor_building};

fn floors(ids: &[&str]) -> Vec<FloorId> {
    ids.iter().map(|&f| FloorId::from(f)).collect()
}

#[test]
fn two_floor_route_uses_the_stair() {
    let service = service_for(two_floor_building());
    let response = service.navigate(TEST_BUILDING, "R0", "R1").unwrap();

    assert_eq!(
        response.path,
        vec!["R0", "R0_SNAP", "C1", "S1_F0", "S1_F1", "C4", "R1_SNAP", "R1"]
    );
    assert_eq!(response.route.floor_order, floors(&["F0", "F1"]));
    assert_eq!(response.route.start_floor, Some(FloorId::from("F0")));
    // Three segments per floor (30 + 10 + 30) plus exactly 1 for the flight.
    assert_eq!(response.total_cost, Some(2.0 * (30.0 + 10.0 + 30.0) + 1.0));

    let f0 = &response.route.floor_points[&FloorId::from("F0")];
    assert_eq!(f0, &vec![50.0, 60.0, 50.0, 90.0, 50.0, 100.0, 50.0, 130.0]);
    let f1 = &response.route.floor_points[&FloorId::from("F1")];
    assert_eq!(f1, &vec![50.0, 130.0, 50.0, 100.0, 50.0, 90.0, 50.0, 60.0]);
    assert_eq!(response.route.floor_images[&FloorId::from("F1")], "maps/F1.jpeg");
}

#[test]
fn same_room_is_a_single_node_route() {
    let service = service_for(two_floor_building());
    let response = service.navigate(TEST_BUILDING, "R1", "R1").unwrap();
    assert_eq!(response.path, vec!["R1"]);
    assert_eq!(response.total_cost, Some(0.0));
    assert_eq!(response.route.floor_order, floors(&["F1"]));
}

#[test]
fn room_without_corridor_on_its_floor_fails_to_build() {
    let building = TestBuilding::new()
        .floor("F0")
        .floor("F1")
        .corridor("F0", &[(0.0, 0.0), (40.0, 0.0)])
        .room("A", "F0", (0.0, -20.0), (0.0, -5.0))
        .room("B", "F1", (0.0, -20.0), (0.0, -5.0))
        .build();
    let err = service_for(building).navigate(TEST_BUILDING, "A", "A").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
    match err {
        NavError::NoCorridorOnFloor { entity, floor } => {
            assert_eq!(entity, "room B");
            assert_eq!(floor, FloorId::from("F1"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn disconnected_rooms_give_an_empty_route() {
    let building = TestBuilding::new()
        .floor("F0")
        .corridor("F0", &[(0.0, 0.0), (40.0, 0.0)])
        .corridor("F0", &[(200.0, 0.0), (240.0, 0.0)])
        .room("WEST", "F0", (0.0, -20.0), (0.0, -5.0))
        .room("EAST", "F0", (240.0, -20.0), (240.0, -5.0))
        .build();
    let response = service_for(building)
        .navigate(TEST_BUILDING, "WEST", "EAST")
        .unwrap();
    assert!(response.is_empty());
    assert!(response.route.floor_points.is_empty());
    assert!(response.route.floor_order.is_empty());
    assert!(response.route.floor_images.is_empty());
    assert_eq!(response.route.start_floor, None);
    assert_eq!(response.total_cost, None);
}

#[test]
fn separate_corridors_meet_at_junctions() {
    // An L: the second corridor starts 12px from the end of the first.
    let building = TestBuilding::new()
        .floor("F0")
        .corridor("F0", &[(0.0, 0.0), (40.0, 0.0), (80.0, 0.0)])
        .corridor("F0", &[(80.0, 12.0), (80.0, 52.0), (80.0, 92.0)])
        .room("A", "F0", (0.0, -20.0), (0.0, -5.0))
        .exit("B", "F0", (100.0, 92.0), (85.0, 92.0))
        .build();
    let response = service_for(building).navigate(TEST_BUILDING, "A", "B").unwrap();
    assert_eq!(
        response.path,
        vec!["A", "A_SNAP", "C0", "C1", "C2", "C3", "C4", "C5", "B_SNAP", "B"]
    );
}

#[test]
fn cheap_floor_change_beats_long_same_floor_walk() {
    // Walking along F0 from A to B costs 400. Going up S1, across F1 and
    // back down S2 costs 2 stair flights plus a short F1 hop.
    let building = TestBuilding::new()
        .floor("F0")
        .floor("F1")
        .corridor("F0", &[(0.0, 0.0), (400.0, 0.0)])
        .corridor("F1", &[(0.0, 0.0), (10.0, 0.0)])
        .room("A", "F0", (0.0, -10.0), (0.0, 0.0))
        .room("B", "F0", (400.0, -10.0), (400.0, 0.0))
        .stair("S1", "F0", (0.0, 5.0))
        .stair("S1", "F1", (0.0, 5.0))
        .stair("S2", "F0", (395.0, 5.0))
        .stair("S2", "F1", (10.0, 5.0))
        .build();
    let response = service_for(building).navigate(TEST_BUILDING, "A", "B").unwrap();

    assert_eq!(
        response.path,
        vec![
            "A", "A_SNAP", "C0", "S1_F0", "S1_F1", "C2", "C3", "S2_F1", "S2_F0", "C1", "B_SNAP", "B"
        ]
    );
    // F0 is revisited: order lists it once, its points are one merged run.
    assert_eq!(response.route.floor_order, floors(&["F0", "F1"]));
    let f0 = &response.route.floor_points[&FloorId::from("F0")];
    assert_eq!(f0.len(), 2 * 8);
    assert_eq!(&f0[..2], &[0.0, -10.0]);
    assert_eq!(&f0[f0.len() - 2..], &[400.0, -10.0]);
}

#[test]
fn exits_are_valid_endpoints() {
    let building = TestBuilding::new()
        .floor("F0")
        .corridor("F0", &[(0.0, 0.0), (40.0, 0.0)])
        .room("R", "F0", (0.0, -20.0), (0.0, -5.0))
        .exit("GATE", "F0", (60.0, 0.0), (40.0, 0.0))
        .build();
    let service = service_for(building);
    let response = service.navigate(TEST_BUILDING, "GATE", "R").unwrap();
    assert_eq!(response.path.first().unwrap(), "GATE");
    assert_eq!(response.path.last().unwrap(), "R");

    let dir = service.directory(TEST_BUILDING).unwrap();
    assert_eq!(dir.destinations, vec!["R", "GATE"]);
}

#[test]
fn every_room_pair_is_routable_in_a_connected_building() {
    let building = TestBuilding::new()
        .floor("F0")
        .floor("F1")
        .floor("F2")
        .corridor("F0", &[(0.0, 0.0), (40.0, 0.0), (80.0, 0.0), (120.0, 0.0)])
        .corridor("F1", &[(0.0, 0.0), (40.0, 0.0), (80.0, 0.0), (120.0, 0.0)])
        .corridor("F2", &[(0.0, 0.0), (40.0, 0.0)])
        .corridor("F2", &[(40.0, 10.0), (40.0, 50.0)])
        .room("A", "F0", (0.0, -20.0), (0.0, -5.0))
        .room("B", "F0", (120.0, -20.0), (120.0, -5.0))
        .room("C", "F1", (80.0, -20.0), (80.0, -5.0))
        .room("D", "F2", (60.0, 50.0), (40.0, 50.0))
        .exit("E", "F0", (60.0, 20.0), (60.0, 0.0))
        .stair("S", "F0", (120.0, 10.0))
        .stair("S", "F1", (120.0, 10.0))
        .stair("T", "F1", (0.0, 10.0))
        .stair("T", "F2", (0.0, 10.0))
        .build();
    let service = service_for(building);
    let ids = service.directory(TEST_BUILDING).unwrap().destinations;

    for start in &ids {
        for end in &ids {
            let response = service.navigate(TEST_BUILDING, start, end).unwrap();
            assert_eq!(response.path.first(), Some(start), "{start} -> {end}");
            assert_eq!(response.path.last(), Some(end), "{start} -> {end}");

            // No node repeats on a shortest path.
            let mut seen = response.path.clone();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), response.path.len(), "{start} -> {end}");

            // Floor order has no duplicates and follows first appearance.
            let order = &response.route.floor_order;
            let mut distinct = order.clone();
            distinct.sort();
            distinct.dedup();
            assert_eq!(distinct.len(), order.len());
            assert_eq!(response.route.start_floor.as_ref(), order.first());
        }
    }
}

#[test]
fn repeated_requests_return_identical_routes() {
    let service = service_for(two_floor_building());
    let first = service.navigate(TEST_BUILDING, "R1", "R0").unwrap();
    for _ in 0..5 {
        assert_eq!(service.navigate(TEST_BUILDING, "R1", "R0").unwrap(), first);
    }
}

#[test]
fn loaded_database_round_trips_through_service() {
    let json = serde_json::to_string(&serde_json::json!({
        "buildings": { "test": two_floor_building() }
    }))
    .unwrap();
    let db = MapDatabase::from_json(&json).unwrap();
    assert_eq!(db.building(TEST_BUILDING).unwrap(), &two_floor_building());
}
