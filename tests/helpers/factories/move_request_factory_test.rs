use crate::test_helpers::factory::Factory;

#[test]
fn test_move_request_factory() {
    let req = Factory::move_request()
        .with("name", "data #2 (10-20)")
        .route("/dev/sda", 100, "/dev/sdb", 0, 25)
        .create();

    assert_eq!(req.name, "data #2 (10-20)");
    assert_eq!(req.from_set, "/dev/sda");
    assert_eq!(req.from_start, 100);
    assert_eq!(req.to_set, "/dev/sdb");
    assert_eq!(req.to_end(), 25);
    assert!(!req.moved);
}

#[test]
fn test_move_request_factory_list() {
    let reqs = Factory::move_request()
        .with("name", "lv")
        .route("/dev/a", 0, "/dev/b", 50, 5)
        .create_list(3);

    assert_eq!(reqs.len(), 3);
    assert_eq!(reqs[2].from_start, 10);
    assert_eq!(reqs[2].to_start, 60);
    assert_eq!(reqs[1].name, "lv #2");
}
