//! 路由表项

use super::cost::Cost;
use super::id::RouterId;
use serde::Serialize;

/// 单个目的地的路由表项 `(next_hop, cost)`。
///
/// 构造函数保证 `next_hop == None` 当且仅当 `cost == INFINITY`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    next_hop: Option<RouterId>,
    cost: Cost,
}

impl RouteEntry {
    pub const UNREACHABLE: RouteEntry = RouteEntry {
        next_hop: None,
        cost: Cost::Infinite,
    };

    /// 代价为 INFINITY 时丢弃下一跳，得到不可达表项。
    pub fn new(next_hop: RouterId, cost: Cost) -> Self {
        if cost.is_finite() {
            Self {
                next_hop: Some(next_hop),
                cost,
            }
        } else {
            Self::UNREACHABLE
        }
    }

    pub fn next_hop(&self) -> Option<RouterId> {
        self.next_hop
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    pub fn is_reachable(&self) -> bool {
        self.next_hop.is_some()
    }
}
