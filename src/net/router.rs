//! 路由器
//!
//! 两种协议共用的路由器记录：身份、邻居代价与路由表，以及更新路由表的基本操作。
//! 这里的操作只修改路由器自身，不会隐式传播给其他路由器。

use std::collections::BTreeMap;

use super::cost::{Cost, LinkCost};
use super::id::RouterId;
use super::route::RouteEntry;
use tracing::trace;

/// 路由器
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    id: RouterId,
    neighbors: BTreeMap<RouterId, LinkCost>,
    routing_table: BTreeMap<RouterId, RouteEntry>,
}

impl Router {
    /// 创建新路由器，路由表中只有到自身的 `(id, 0)`。
    pub fn new(id: RouterId) -> Self {
        let mut routing_table = BTreeMap::new();
        routing_table.insert(id, RouteEntry::new(id, Cost::ZERO));
        Self {
            id,
            neighbors: BTreeMap::new(),
            routing_table,
        }
    }

    pub fn id(&self) -> RouterId {
        self.id
    }

    /// 邻居 -> 链路代价（按 id 升序）
    pub fn neighbors(&self) -> &BTreeMap<RouterId, LinkCost> {
        &self.neighbors
    }

    /// 目的地 -> 路由表项（按 id 升序）
    pub fn routing_table(&self) -> &BTreeMap<RouterId, RouteEntry> {
        &self.routing_table
    }

    pub fn is_neighbor(&self, id: RouterId) -> bool {
        self.neighbors.contains_key(&id)
    }

    pub fn link_cost(&self, neighbor: RouterId) -> Option<LinkCost> {
        self.neighbors.get(&neighbor).copied()
    }

    /// 记录（或覆盖）邻居代价，并无条件地把直连路由写入路由表：
    /// 安装时直连邻接是权威的，哪怕之前经别处到达更便宜。
    pub fn add_neighbor(&mut self, neighbor: RouterId, cost: LinkCost) {
        trace!(router = %self.id, %neighbor, cost, "添加邻居");
        self.neighbors.insert(neighbor, cost);
        self.update_routing_table(neighbor, neighbor, Cost::from(cost));
    }

    /// 删除邻居代价，返回原来的代价。路由表由调用方处理。
    pub fn remove_neighbor(&mut self, neighbor: RouterId) -> Option<LinkCost> {
        self.neighbors.remove(&neighbor)
    }

    /// 写入路由表项；代价为 INFINITY 时下一跳被强制置空。
    /// 不与已有表项比较，是否应当更新由调用方决定。
    pub fn update_routing_table(&mut self, destination: RouterId, next_hop: RouterId, cost: Cost) {
        self.routing_table
            .insert(destination, RouteEntry::new(next_hop, cost));
    }

    /// 把目的地置为 `(none, INFINITY)`。
    pub fn invalidate_route(&mut self, destination: RouterId) {
        self.routing_table
            .insert(destination, RouteEntry::UNREACHABLE);
    }

    pub fn route(&self, destination: RouterId) -> Option<&RouteEntry> {
        self.routing_table.get(&destination)
    }

    /// 目的地不在表中时返回 `(none, INFINITY)`。
    pub fn next_hop_cost(&self, destination: RouterId) -> RouteEntry {
        self.routing_table
            .get(&destination)
            .copied()
            .unwrap_or(RouteEntry::UNREACHABLE)
    }

    /// 清空路由表，只保留自身表项。
    pub fn reset_routing_table(&mut self) {
        self.routing_table.clear();
        self.routing_table
            .insert(self.id, RouteEntry::new(self.id, Cost::ZERO));
    }
}
