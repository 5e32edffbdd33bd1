use super::*;

#[test]
fn allocates_the_first_port_in_range() {
    let allocator = PortAllocator::new(40000, 40010);
    let port = allocator.allocate().unwrap();
    assert!((40000..=40010).contains(&port));
    assert_eq!(allocator.allocated_count(), 1);
}

#[test]
fn freed_port_can_be_reallocated() {
    let allocator = PortAllocator::new(40020, 40025);
    let port = allocator.allocate().unwrap();
    allocator.free(port);
    assert_eq!(allocator.allocated_count(), 0);
    let again = allocator.allocate().unwrap();
    assert_eq!(port, again);
}

#[test]
fn exhausted_range_is_an_error() {
    let allocator = PortAllocator::new(40030, 40031);
    let _first = allocator.allocate().unwrap();
    let _second = allocator.allocate().unwrap();
    let err = allocator.allocate().unwrap_err();
    assert!(matches!(err, ForwarderError::PortsExhausted { .. }));
}

#[test]
fn internal_port_is_external_plus_ten_thousand() {
    assert_eq!(PortAllocator::internal_port(33890), 43890);
}
