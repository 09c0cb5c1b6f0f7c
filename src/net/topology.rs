//! 拓扑管理
//!
//! 以 `RouterId` 为键的路由器集合（arena）。负责增删链路、按需创建路由器，
//! 以及在链路断开时作废依赖它的路由。协议引擎每次调用时借用 `&mut Topology`，
//! 不长期持有。

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info, trace};

use super::change::{LinkAction, LinkChange, LinkRecord};
use super::cost::{LinkCost, MAX_LINK_COST};
use super::id::RouterId;
use super::router::Router;
use crate::error::RoutingError;

/// 一次链路变更对邻接关系造成的影响
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LinkUpdate {
    /// 原本不相邻，现在建立了邻接
    Added,
    CostChanged { previous: LinkCost },
    /// 已相邻且代价相同
    Unchanged,
    Removed,
    /// 删除一对本不相邻的路由器
    NotAdjacent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeOutcome {
    /// 本次变更按需创建的路由器
    pub created: Vec<RouterId>,
    pub update: LinkUpdate,
}

impl ChangeOutcome {
    /// 既没有创建路由器，也没有改变任何邻接：各路由表无需重算。
    pub fn is_noop(&self) -> bool {
        self.created.is_empty()
            && matches!(self.update, LinkUpdate::Unchanged | LinkUpdate::NotAdjacent)
    }

    pub fn adjacency_up(&self) -> bool {
        matches!(self.update, LinkUpdate::Added)
    }
}

/// 网络拓扑：独占所有路由器
#[derive(Debug, Default, Clone)]
pub struct Topology {
    routers: BTreeMap<RouterId, Router>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.routers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routers.is_empty()
    }

    pub fn contains(&self, id: RouterId) -> bool {
        self.routers.contains_key(&id)
    }

    pub fn router(&self, id: RouterId) -> Option<&Router> {
        self.routers.get(&id)
    }

    pub fn router_mut(&mut self, id: RouterId) -> Option<&mut Router> {
        self.routers.get_mut(&id)
    }

    /// 按 id 升序遍历所有路由器
    pub fn routers(&self) -> impl Iterator<Item = &Router> {
        self.routers.values()
    }

    pub(crate) fn routers_mut(&mut self) -> impl Iterator<Item = &mut Router> {
        self.routers.values_mut()
    }

    pub fn router_ids(&self) -> Vec<RouterId> {
        self.routers.keys().copied().collect()
    }

    pub fn link_cost(&self, a: RouterId, b: RouterId) -> Option<LinkCost> {
        self.routers.get(&a).and_then(|r| r.link_cost(b))
    }

    /// 路由器不存在时创建它；返回是否新建。
    pub fn ensure_router(&mut self, id: RouterId) -> bool {
        if self.routers.contains_key(&id) {
            return false;
        }
        debug!(router = %id, "🆕 创建路由器");
        self.routers.insert(id, Router::new(id));
        true
    }

    /// 按初始拓扑记录逐条建立链路。初始拓扑里不允许出现删除哨兵。
    #[tracing::instrument(skip(self, records), fields(records = records.len()))]
    pub fn initialize(&mut self, records: &[LinkRecord]) -> Result<(), RoutingError> {
        for record in records {
            match record.to_change()?.action {
                LinkAction::Set { cost } => {
                    self.add_link(record.a, record.b, cost)?;
                }
                LinkAction::Remove => {
                    return Err(RoutingError::InvalidLinkCost {
                        a: record.a,
                        b: record.b,
                        cost: record.cost,
                    });
                }
            }
        }
        info!(routers = self.len(), "初始拓扑已建立");
        Ok(())
    }

    /// 建立链路或修改代价；两端路由器不存在时先创建。
    /// 已相邻且代价相同则什么都不做。
    pub fn add_link(
        &mut self,
        a: RouterId,
        b: RouterId,
        cost: LinkCost,
    ) -> Result<ChangeOutcome, RoutingError> {
        if a == b {
            return Err(RoutingError::SelfLoop { router: a });
        }
        if cost == 0 || cost > MAX_LINK_COST {
            return Err(RoutingError::InvalidLinkCost {
                a,
                b,
                cost: i64::from(cost),
            });
        }

        let created = self.ensure_pair(a, b);
        let update = match self.link_cost(a, b) {
            Some(previous) if previous == cost => {
                trace!(%a, %b, cost, "链路代价未变");
                return Ok(ChangeOutcome {
                    created,
                    update: LinkUpdate::Unchanged,
                });
            }
            Some(previous) => LinkUpdate::CostChanged { previous },
            None => LinkUpdate::Added,
        };

        for (from, to) in [(a, b), (b, a)] {
            if let Some(router) = self.routers.get_mut(&from) {
                router.add_neighbor(to, cost);
            }
        }
        debug!(%a, %b, cost, ?update, "🔗 链路已更新");
        Ok(ChangeOutcome { created, update })
    }

    /// 断开链路：两端删除邻居、直连表项置为不可达，再作废以对方为下一跳的路由。
    /// 两端不相邻（或不存在）时什么都不做。
    pub fn remove_link(&mut self, a: RouterId, b: RouterId) -> ChangeOutcome {
        let adjacent = self.link_cost(a, b).is_some();
        if !adjacent {
            trace!(%a, %b, "删除不存在的链路，忽略");
            return ChangeOutcome {
                created: Vec::new(),
                update: LinkUpdate::NotAdjacent,
            };
        }

        for (from, to) in [(a, b), (b, a)] {
            if let Some(router) = self.routers.get_mut(&from) {
                router.remove_neighbor(to);
                router.invalidate_route(to);
            }
        }
        self.invalidate_routes_for_removed_link(a, b);

        debug!(%a, %b, "✂️  链路已断开");
        ChangeOutcome {
            created: Vec::new(),
            update: LinkUpdate::Removed,
        }
    }

    /// 处理一条变更：删除时先按需创建两端，保证之后的查询总有定义。
    #[tracing::instrument(skip(self), fields(a = %change.a, b = %change.b))]
    pub fn process_change(&mut self, change: &LinkChange) -> Result<ChangeOutcome, RoutingError> {
        match change.action {
            LinkAction::Set { cost } => self.add_link(change.a, change.b, cost),
            LinkAction::Remove => {
                if change.a == change.b {
                    return Err(RoutingError::SelfLoop { router: change.a });
                }
                let created = self.ensure_pair(change.a, change.b);
                let outcome = self.remove_link(change.a, change.b);
                Ok(ChangeOutcome {
                    created,
                    update: outcome.update,
                })
            }
        }
    }

    fn ensure_pair(&mut self, a: RouterId, b: RouterId) -> Vec<RouterId> {
        [a, b]
            .into_iter()
            .filter(|&id| self.ensure_router(id))
            .collect()
    }

    fn invalidate_routes_for_removed_link(&mut self, a: RouterId, b: RouterId) {
        for (owner, via) in [(a, b), (b, a)] {
            let Some(router) = self.routers.get_mut(&owner) else {
                continue;
            };
            let stale: Vec<RouterId> = router
                .routing_table()
                .iter()
                .filter(|(_, entry)| entry.next_hop() == Some(via))
                .map(|(&dst, _)| dst)
                .collect();
            for dst in stale {
                trace!(router = %owner, %dst, %via, "作废经由已断链路的路由");
                router.invalidate_route(dst);
            }
        }
    }
}
