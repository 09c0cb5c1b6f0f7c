use super::{links, rid};
use crate::error::RoutingError;
use crate::net::{Cost, LinkChange, LinkRecord, LinkUpdate, RouteEntry, Topology};

#[test]
fn initialize_creates_routers_and_symmetric_links() {
    let mut topo = Topology::new();
    topo.initialize(&links(&[(1, 2, 6), (2, 3, 1)])).unwrap();

    assert_eq!(topo.router_ids(), vec![rid(1), rid(2), rid(3)]);
    assert_eq!(topo.link_cost(rid(1), rid(2)), Some(6));
    assert_eq!(topo.link_cost(rid(2), rid(1)), Some(6));
    assert_eq!(topo.link_cost(rid(1), rid(3)), None);

    let r1 = topo.router(rid(1)).unwrap();
    assert_eq!(r1.next_hop_cost(rid(2)), RouteEntry::new(rid(2), Cost::Finite(6)));
}

#[test]
fn initialize_rejects_bad_records() {
    let mut topo = Topology::new();
    let err = topo.initialize(&links(&[(1, 2, 0)])).unwrap_err();
    assert!(matches!(err, RoutingError::InvalidLinkCost { cost: 0, .. }));

    let err = topo.initialize(&links(&[(1, 2, -999)])).unwrap_err();
    assert!(matches!(err, RoutingError::InvalidLinkCost { cost: -999, .. }));

    let err = topo.initialize(&links(&[(3, 3, 1)])).unwrap_err();
    assert!(matches!(err, RoutingError::SelfLoop { .. }));
}

#[test]
fn add_link_reports_what_changed() {
    let mut topo = Topology::new();
    let out = topo.add_link(rid(1), rid(2), 4).unwrap();
    assert_eq!(out.created, vec![rid(1), rid(2)]);
    assert_eq!(out.update, LinkUpdate::Added);
    assert!(out.adjacency_up());

    let out = topo.add_link(rid(2), rid(1), 4).unwrap();
    assert!(out.is_noop());

    let out = topo.add_link(rid(1), rid(2), 9).unwrap();
    assert_eq!(out.update, LinkUpdate::CostChanged { previous: 4 });
    assert!(out.created.is_empty());
    assert_eq!(topo.link_cost(rid(2), rid(1)), Some(9));
}

#[test]
fn remove_link_invalidates_routes_through_the_link() {
    let mut topo = Topology::new();
    topo.initialize(&links(&[(1, 2, 1), (2, 3, 1)])).unwrap();
    // 手工装一条经 2 到 3 的路由
    topo.router_mut(rid(1))
        .unwrap()
        .update_routing_table(rid(3), rid(2), Cost::Finite(2));

    let out = topo.remove_link(rid(1), rid(2));
    assert_eq!(out.update, LinkUpdate::Removed);

    let r1 = topo.router(rid(1)).unwrap();
    assert!(!r1.is_neighbor(rid(2)));
    assert_eq!(r1.next_hop_cost(rid(2)), RouteEntry::UNREACHABLE);
    assert_eq!(r1.next_hop_cost(rid(3)), RouteEntry::UNREACHABLE);
    assert_eq!(
        topo.router(rid(2)).unwrap().next_hop_cost(rid(1)),
        RouteEntry::UNREACHABLE
    );
}

#[test]
fn removing_unknown_pair_creates_both_routers() {
    let mut topo = Topology::new();
    let change = LinkRecord::new(9, 10, -999).to_change().unwrap();
    let out = topo.process_change(&change).unwrap();

    assert_eq!(out.created, vec![rid(9), rid(10)]);
    assert_eq!(out.update, LinkUpdate::NotAdjacent);
    assert!(!out.is_noop());
    assert!(topo.contains(rid(9)) && topo.contains(rid(10)));
}

#[test]
fn removing_absent_link_between_known_routers_is_noop() {
    let mut topo = Topology::new();
    topo.initialize(&links(&[(1, 2, 1), (2, 3, 1)])).unwrap();
    let out = topo.process_change(&LinkChange::remove(rid(1), rid(3))).unwrap();
    assert!(out.is_noop());
}

#[test]
fn link_change_interprets_sentinel_and_range() {
    assert_eq!(
        LinkChange::from_record(rid(1), rid(2), -999).unwrap(),
        LinkChange::remove(rid(1), rid(2))
    );
    assert_eq!(
        LinkChange::from_record(rid(1), rid(2), 5).unwrap(),
        LinkChange::set(rid(1), rid(2), 5)
    );
    assert!(LinkChange::from_record(rid(1), rid(2), -1).is_err());
    assert!(LinkChange::from_record(rid(1), rid(2), i64::from(u32::MAX)).is_err());
    assert!(LinkChange::from_record(rid(1), rid(1), 5).is_err());
}
