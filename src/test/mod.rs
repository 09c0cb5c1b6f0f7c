mod records;
mod scenario;
mod topology;

use crate::net::{Cost, LinkRecord, RouteEntry, RouterId, Topology};
use crate::proto::ShortestPathTree;

/// 每张路由表都应与真实拓扑上的最短路一致：代价相等，下一跳在某条最短路上。
pub(crate) fn assert_shortest_paths(topo: &Topology) {
    for router in topo.routers() {
        let me = router.id();
        let tree = ShortestPathTree::compute(me, |n| topo.router(n).map(|r| r.neighbors()));
        assert_eq!(router.route(me), Some(&RouteEntry::new(me, Cost::ZERO)));

        for dst in topo.router_ids() {
            let entry = router.next_hop_cost(dst);
            let Some(best) = tree.distance(dst) else {
                assert_eq!(entry, RouteEntry::UNREACHABLE, "router {me} -> {dst}");
                continue;
            };
            assert_eq!(entry.cost(), Cost::Finite(best), "router {me} -> {dst}");
            if dst == me {
                continue;
            }
            let hop = entry.next_hop().expect("reachable entry has a next hop");
            let link = u64::from(router.link_cost(hop).expect("next hop is a neighbour"));
            let rest = ShortestPathTree::compute(hop, |n| topo.router(n).map(|r| r.neighbors()))
                .distance(dst)
                .expect("next hop reaches destination");
            assert_eq!(link + rest, best, "router {me} -> {dst} via {hop}");
        }
    }
}

/// `(a, b, cost)` 三元组转为链路记录
pub(crate) fn links(raw: &[(u32, u32, i64)]) -> Vec<LinkRecord> {
    raw.iter().map(|&(a, b, c)| LinkRecord::new(a, b, c)).collect()
}

pub(crate) fn rid(x: u32) -> RouterId {
    RouterId(x)
}

/// 5 台路由器、全连通
pub(crate) const CONNECTED: &[(u32, u32, i64)] =
    &[(1, 2, 8), (2, 3, 3), (2, 5, 4), (4, 1, 1), (4, 5, 1)];

/// 3 -> 6 有两条代价 3 的路径，分别经 2 与 4
pub(crate) const TIE: &[(u32, u32, i64)] =
    &[(3, 4, 1), (4, 5, 1), (5, 6, 1), (3, 2, 1), (2, 5, 1)];

/// {1,2,3,4} 与 {5,6} 两个分区
pub(crate) const PARTITIONED: &[(u32, u32, i64)] = &[
    (1, 2, 2),
    (1, 3, 1),
    (2, 3, 1),
    (2, 4, 3),
    (3, 4, 1),
    (5, 6, 1),
];
