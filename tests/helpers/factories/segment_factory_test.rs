use crate::test_helpers::factory::Factory;

#[test]
fn test_segment_factory() {
    let seg = Factory::segment()
        .with("lv_name", "data")
        .with("lv_index", 2)
        .with("lv_start", 40)
        .at("/dev/sdb", 100, 20)
        .create();

    assert_eq!(seg.lv_name.as_deref(), Some("data"));
    assert_eq!(seg.pv_name, "/dev/sdb");
    assert_eq!(seg.lv_size, Some(20));
    assert_eq!(seg.label(), "data #2 (40-60)");
    assert!(!seg.moved);
}

#[test]
fn test_segment_factory_free_and_moved() {
    let free = Factory::free_segment().at("/dev/sda", 5, 7).create();
    assert!(free.is_free());
    assert_eq!(free.segtype, "free");
    assert_eq!(free.lv_index, None);

    let moved = Factory::segment().moved_to("/dev/sdc", 3).create();
    assert!(moved.moved);
    assert_eq!(moved.placed_pv_name(), "/dev/sdc");
    assert_eq!(moved.placed_pv_start(), 3);
}
