//! 距离向量（DV）路由
//!
//! 每台路由器只知道到直连邻居的代价，通过邻居通告迭代学到全网代价：
//!
//! - 发送策略：不向目的地本身通告，也不向当前下一跳通告（水平分割）；
//! - 接受策略：首次得知、严格更优、等价时取更小 id 的通告者，以及必须接受
//!   当前下一跳发来的变差通告；
//! - 拓扑变更后先沿接受链推送变化（毒性逆转），再作废所有非直连路由，
//!   最后重新迭代到不动点。

use tracing::{debug, info, trace};

use super::{ProtocolKind, RoutingEngine};
use crate::error::RoutingError;
use crate::net::{ChangeOutcome, Cost, LinkChange, Router, RouterId, Topology};

/// DV 引擎的迭代上限
#[derive(Debug, Clone)]
pub struct DistanceVectorOpts {
    /// 收敛循环的最大轮数
    pub max_passes: usize,
    /// 一次毒性逆转推送最多检查的 (路由器, 邻居) 对数
    pub max_notify_steps: usize,
}

impl Default for DistanceVectorOpts {
    fn default() -> Self {
        Self {
            max_passes: 10_000,
            max_notify_steps: 1_000_000,
        }
    }
}

/// 距离向量引擎
#[derive(Debug, Default, Clone)]
pub struct DistanceVector {
    opts: DistanceVectorOpts,
}

/// 显式栈上的一帧：等价于递归推送时的一层调用
struct NotifyFrame {
    router: RouterId,
    neighbors: Vec<RouterId>,
    next: usize,
}

impl NotifyFrame {
    fn new(router: &Router) -> Self {
        Self {
            router: router.id(),
            neighbors: router.neighbors().keys().copied().collect(),
            next: 0,
        }
    }
}

impl DistanceVector {
    pub fn new(opts: DistanceVectorOpts) -> Self {
        Self { opts }
    }

    /// `router` 是否应该把到 `destination` 的路由通告给 `neighbor`。
    pub fn should_transmit(router: &Router, neighbor: RouterId, destination: RouterId) -> bool {
        if neighbor == destination {
            return false;
        }
        router.next_hop_cost(destination).next_hop() != Some(neighbor)
    }

    /// `receiver` 是否接受 `advertiser` 对 `destination` 的通告代价 `advertised`。
    pub fn should_accept(
        receiver: &Router,
        advertiser: RouterId,
        destination: RouterId,
        advertised: Cost,
    ) -> bool {
        let Some(link) = receiver.link_cost(advertiser) else {
            return false;
        };
        let candidate = advertised.plus(link);

        let Some(current) = receiver.route(destination) else {
            return true;
        };
        if candidate < current.cost() {
            return true;
        }
        match current.next_hop() {
            Some(hop) if candidate == current.cost() && advertiser < hop => true,
            Some(hop) if hop == advertiser && current.cost() < candidate => true,
            _ => false,
        }
    }

    /// 反复让每台路由器向每个邻居通告整张路由表，直到某一轮没有任何表项变化。
    /// 返回所用轮数。
    #[tracing::instrument(skip(self, topo), fields(routers = topo.len()))]
    pub fn converge_all(&self, topo: &mut Topology) -> Result<usize, RoutingError> {
        for pass in 1..=self.opts.max_passes {
            let mut changed = 0usize;

            for id in topo.router_ids() {
                // 本路由器在自己这一轮里只会修改邻居的表，快照与实时读取等价。
                let Some(router) = topo.router(id).cloned() else {
                    continue;
                };
                for (&neighbor, &link) in router.neighbors() {
                    let Some(receiver) = topo.router_mut(neighbor) else {
                        continue;
                    };
                    for (&destination, entry) in router.routing_table() {
                        if !Self::should_transmit(&router, neighbor, destination) {
                            continue;
                        }
                        if Self::should_accept(receiver, id, destination, entry.cost()) {
                            receiver.update_routing_table(
                                destination,
                                id,
                                entry.cost().plus(link),
                            );
                            changed += 1;
                        }
                    }
                }
            }

            trace!(pass, changed, "完成一轮通告");
            if changed == 0 {
                debug!(passes = pass, "✅ DV 已收敛");
                return Ok(pass);
            }
        }
        Err(RoutingError::NoConvergence {
            limit: self.opts.max_passes,
        })
    }

    /// 毒性逆转：从 `origin` 出发，把到 `destination` 的变化沿接受链向外推送。
    ///
    /// 深度优先，邻居顺序与递归写法一致；用显式栈避免深拓扑上的栈溢出。
    /// 返回被更新的表项数。
    #[tracing::instrument(skip(self, topo))]
    pub fn notify(
        &self,
        topo: &mut Topology,
        origin: RouterId,
        destination: RouterId,
    ) -> Result<usize, RoutingError> {
        let Some(start) = topo.router(origin) else {
            return Ok(0);
        };
        let mut stack = vec![NotifyFrame::new(start)];
        let mut steps = 0usize;
        let mut updates = 0usize;

        while let Some(frame) = stack.last_mut() {
            let sender = frame.router;
            let next = frame.neighbors.get(frame.next).copied();
            let Some(neighbor) = next else {
                stack.pop();
                continue;
            };
            frame.next += 1;

            steps += 1;
            if steps > self.opts.max_notify_steps {
                return Err(RoutingError::NoConvergence {
                    limit: self.opts.max_notify_steps,
                });
            }

            let Some(router) = topo.router(sender) else {
                continue;
            };
            if !Self::should_transmit(router, neighbor, destination) {
                continue;
            }
            let advertised = router.next_hop_cost(destination).cost();
            let Some(link) = router.link_cost(neighbor) else {
                continue;
            };

            let Some(receiver) = topo.router_mut(neighbor) else {
                continue;
            };
            if !Self::should_accept(receiver, sender, destination, advertised) {
                continue;
            }
            receiver.update_routing_table(destination, sender, advertised.plus(link));
            updates += 1;
            trace!(%sender, %neighbor, %destination, cost = %advertised.plus(link), "推送路由变化");
            stack.push(NotifyFrame::new(receiver));
        }

        debug!(updates, steps, "毒性逆转推送完成");
        Ok(updates)
    }

    /// 超时的模拟：所有路由器的非自身、非直连表项一律置为不可达，迫使重新发现路径。
    pub fn invalidate_expired_routes(topo: &mut Topology) {
        let mut invalidated = 0usize;
        for router in topo.routers_mut() {
            let expired: Vec<RouterId> = router
                .routing_table()
                .keys()
                .copied()
                .filter(|&dst| dst != router.id() && !router.is_neighbor(dst))
                .collect();
            invalidated += expired.len();
            for dst in expired {
                router.invalidate_route(dst);
            }
        }
        debug!(invalidated, "作废非直连路由");
    }
}

impl RoutingEngine for DistanceVector {
    fn kind(&self) -> ProtocolKind {
        ProtocolKind::DistanceVector
    }

    fn converge(&mut self, topo: &mut Topology) -> Result<(), RoutingError> {
        let passes = self.converge_all(topo)?;
        info!(passes, "📡 DV 初始收敛完成");
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

        self.notify(topo, change.a, change.b)?;
        self.notify(topo, change.b, change.a)?;
        Self::invalidate_expired_routes(topo);
        let passes = self.converge_all(topo)?;

        info!(passes, update = ?outcome.update, "📡 DV 重新收敛完成");
        Ok(outcome)
    }
}
