//! 链路状态（LS）路由
//!
//! 每台路由器把自己的邻接表封装成带序号的 LSP 洪泛到全网，
//! 各自用学到的拓扑跑 Dijkstra 计算路由表。
//!
//! 序号去重保证每台路由器对同一源的同一序号最多转发一次，洪泛因此必然终止。
//! 新邻接建立时两端交换各自的全部 LSP，合并后的分区才能学到彼此的拓扑。

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::Serialize;
use tracing::{debug, info, trace};

use super::spf::ShortestPathTree;
use super::{ProtocolKind, RoutingEngine};
use crate::error::RoutingError;
use crate::net::{ChangeOutcome, Cost, LinkChange, LinkCost, RouterId, Topology};

/// 链路状态包
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lsp {
    pub origin: RouterId,
    pub sequence: u64,
    pub neighbors: BTreeMap<RouterId, LinkCost>,
}

/// 单台路由器的链路状态数据库
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LinkStateDb {
    sequence: u64,
    learned: BTreeMap<RouterId, BTreeMap<RouterId, LinkCost>>,
    sequence_tracker: BTreeMap<RouterId, u64>,
}

impl LinkStateDb {
    /// 本路由器最近一次生成 LSP 用的序号
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// 源 -> 邻接表
    pub fn learned(&self) -> &BTreeMap<RouterId, BTreeMap<RouterId, LinkCost>> {
        &self.learned
    }

    /// 源 -> 最近接受的序号
    pub fn sequence_tracker(&self) -> &BTreeMap<RouterId, u64> {
        &self.sequence_tracker
    }

    /// 以 LSP 形式导出数据库内容（交换数据库时使用）
    pub fn lsps(&self) -> Vec<Lsp> {
        self.learned
            .iter()
            .filter_map(|(&origin, neighbors)| {
                let &sequence = self.sequence_tracker.get(&origin)?;
                Some(Lsp {
                    origin,
                    sequence,
                    neighbors: neighbors.clone(),
                })
            })
            .collect()
    }
}

/// 链路状态引擎：按路由器 id 保存各自的数据库
#[derive(Debug, Default, Clone)]
pub struct LinkState {
    dbs: BTreeMap<RouterId, LinkStateDb>,
}

impl LinkState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn database(&self, id: RouterId) -> Option<&LinkStateDb> {
        self.dbs.get(&id)
    }

    /// 序号加一，生成本路由器的 LSP 并洪泛。自身的数据库表项同步刷新。
    #[tracing::instrument(skip(self, topo))]
    pub fn generate_lsp(&mut self, topo: &Topology, id: RouterId) -> Option<Lsp> {
        let router = topo.router(id)?;
        let db = self.dbs.entry(id).or_default();
        db.sequence += 1;

        let lsp = Lsp {
            origin: id,
            sequence: db.sequence,
            neighbors: router.neighbors().clone(),
        };
        db.learned.insert(id, lsp.neighbors.clone());
        db.sequence_tracker.insert(id, lsp.sequence);

        debug!(sequence = lsp.sequence, neighbors = lsp.neighbors.len(), "📣 生成 LSP");
        let accepted = self.flood(topo, id, &lsp);
        trace!(accepted, "洪泛结束");
        Some(lsp)
    }

    /// 把 `lsp` 发给 `from` 的每个邻居；接受者继续向自己的邻居转发。
    /// 返回接受该 LSP 的路由器数。
    pub fn flood(&mut self, topo: &Topology, from: RouterId, lsp: &Lsp) -> usize {
        let mut queue: VecDeque<RouterId> = neighbor_ids(topo, from).collect();
        let mut accepted = 0usize;
        while let Some(at) = queue.pop_front() {
            if self.accept_lsp(topo, at, lsp) {
                accepted += 1;
                queue.extend(neighbor_ids(topo, at));
            }
        }
        accepted
    }

    /// 路由器 `at` 收到 `lsp`：序号更新才接受并继续洪泛，否则静默丢弃。
    pub fn receive_lsp(&mut self, topo: &Topology, at: RouterId, lsp: &Lsp) -> bool {
        if !self.accept_lsp(topo, at, lsp) {
            return false;
        }
        self.flood(topo, at, lsp);
        true
    }

    fn accept_lsp(&mut self, topo: &Topology, at: RouterId, lsp: &Lsp) -> bool {
        let Some(router) = topo.router(at) else {
            return false;
        };
        let db = self.dbs.entry(at).or_default();
        if db
            .sequence_tracker
            .get(&lsp.origin)
            .is_some_and(|&seen| seen >= lsp.sequence)
        {
            return false;
        }
        db.sequence_tracker.insert(lsp.origin, lsp.sequence);
        db.learned.insert(lsp.origin, lsp.neighbors.clone());
        db.learned.insert(at, router.neighbors().clone());
        trace!(%at, origin = %lsp.origin, sequence = lsp.sequence, "接受 LSP");
        true
    }

    /// 新邻接建立时，两端互相提供各自数据库中的全部 LSP。
    #[tracing::instrument(skip(self, topo))]
    pub fn synchronize(&mut self, topo: &Topology, a: RouterId, b: RouterId) {
        for (from, to) in [(a, b), (b, a)] {
            let offered = self.dbs.get(&from).map(LinkStateDb::lsps).unwrap_or_default();
            let mut fresh = 0usize;
            for lsp in &offered {
                if self.receive_lsp(topo, to, lsp) {
                    fresh += 1;
                }
            }
            debug!(%from, %to, offered = offered.len(), fresh, "🔄 数据库交换");
        }
    }

    /// 所有路由器（按 id 升序）各生成一次 LSP。
    pub fn distribute_all(&mut self, topo: &Topology) {
        for id in topo.router_ids() {
            self.generate_lsp(topo, id);
        }
    }

    /// 在 `id` 学到的拓扑上跑 Dijkstra，整体替换它的路由表。
    pub fn compute_routing_table(&self, topo: &mut Topology, id: RouterId) {
        let Some(router) = topo.router(id) else {
            return;
        };
        let own = router.neighbors();
        let db = self.dbs.get(&id);
        let tree = ShortestPathTree::compute(id, |node| {
            if node == id {
                Some(own)
            } else {
                db.and_then(|d| d.learned.get(&node))
            }
        });

        let mut destinations: BTreeSet<RouterId> = tree.reached().map(|(n, _)| n).collect();
        if let Some(db) = db {
            destinations.extend(db.learned.keys().copied());
        }
        let routes: Vec<(RouterId, Option<(RouterId, u64)>)> = destinations
            .into_iter()
            .filter(|&dst| dst != id)
            .map(|dst| {
                let route = tree
                    .distance(dst)
                    .and_then(|d| tree.next_hop(dst).map(|hop| (hop, d)));
                (dst, route)
            })
            .collect();

        let Some(router) = topo.router_mut(id) else {
            return;
        };
        router.reset_routing_table();
        for (dst, route) in routes {
            match route {
                Some((hop, d)) => router.update_routing_table(dst, hop, Cost::Finite(d)),
                None => router.invalidate_route(dst),
            }
        }
        trace!(router = %id, entries = router.routing_table().len(), "路由表已重算");
    }

    fn compute_all(&self, topo: &mut Topology) {
        for id in topo.router_ids() {
            self.compute_routing_table(topo, id);
        }
    }
}

fn neighbor_ids(topo: &Topology, id: RouterId) -> impl Iterator<Item = RouterId> + '_ {
    topo.router(id)
        .into_iter()
        .flat_map(|r| r.neighbors().keys().copied())
}

impl RoutingEngine for LinkState {
    fn kind(&self) -> ProtocolKind {
        ProtocolKind::LinkState
    }

    fn converge(&mut self, topo: &mut Topology) -> Result<(), RoutingError> {
        self.distribute_all(topo);
        self.compute_all(topo);
        info!(routers = topo.len(), "📡 LS 初始收敛完成");
        Ok(())
    }

    #[tracing::instrument(skip(self, topo), fields(a = %change.a, b = %change.b))]
    fn apply_change(
        &mut self,
        topo: &mut Topology,
        change: &LinkChange,
    ) -> Result<ChangeOutcome, RoutingError> {
        let outcome = topo.process_change(change)?;
        if outcome.is_noop() {
            debug!("变更没有效果，路由表保持不变");
            return Ok(outcome);
        }

        // 顶点集合变了：所有路由器重新通告，新路由器才能学到完整拓扑。
        if !outcome.created.is_empty() {
            self.distribute_all(topo);
        }
        if outcome.adjacency_up() {
            self.synchronize(topo, change.a, change.b);
        }
        self.generate_lsp(topo, change.a);
        self.generate_lsp(topo, change.b);
        self.compute_all(topo);

        info!(update = ?outcome.update, "📡 LS 重新收敛完成");
        Ok(outcome)
    }
}
