use crate::engine::extent::DevicePolicy;
use crate::test_helpers::factory::Factory;

#[test]
fn test_free_space_factory() {
    let free = Factory::free_space()
        .policy("/dev/b", DevicePolicy::conservative())
        .extent("/dev/a", 0, 10)
        .extent("/dev/b", 5, 5)
        .extent("/dev/a", 10, 5)
        .create();

    let devices: Vec<_> = free.devices().collect();
    assert_eq!(devices, vec!["/dev/b", "/dev/a"]);
    assert_eq!(free.get("/dev/a").unwrap().len(), 1);
    assert_eq!(free.total_size("/dev/a"), 15);
    assert!(!free.policy("/dev/b").local_allowed);
}
