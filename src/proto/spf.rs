//! 最短路径树（Dijkstra）
//!
//! 等价路径按“目的地前一跳（倒数第二个节点）id 更小者优先”打破平局。
//! 所有边代价为正，一个节点的所有最短路前驱都在它出堆之前被处理过，
//! 因此最终前驱就是所有候选中 id 最小的那个，与松弛顺序无关。

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use crate::net::{LinkCost, RouterId};

#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    source: RouterId,
    dist: BTreeMap<RouterId, u64>,
    pred: BTreeMap<RouterId, RouterId>,
}

impl ShortestPathTree {
    /// 从 `source` 出发计算最短路径树。
    ///
    /// `adjacency(node)` 给出 `node` 的邻接表；不知道的节点返回 `None`，视为没有出边。
    pub fn compute<'a, F>(source: RouterId, adjacency: F) -> Self
    where
        F: Fn(RouterId) -> Option<&'a BTreeMap<RouterId, LinkCost>>,
    {
        let mut dist: BTreeMap<RouterId, u64> = BTreeMap::new();
        let mut pred: BTreeMap<RouterId, RouterId> = BTreeMap::new();
        let mut heap = BinaryHeap::new();

        dist.insert(source, 0);
        heap.push(Reverse((0u64, source)));

        while let Some(Reverse((d, node))) = heap.pop() {
            if dist.get(&node).is_some_and(|&best| d > best) {
                continue;
            }
            let Some(edges) = adjacency(node) else {
                continue;
            };
            for (&next, &cost) in edges {
                if next == source {
                    continue;
                }
                let candidate = d.saturating_add(u64::from(cost));
                match dist.get(&next).copied() {
                    Some(best) if candidate > best => {}
                    Some(best) if candidate == best => {
                        if pred.get(&next).is_some_and(|&p| node < p) {
                            pred.insert(next, node);
                        }
                    }
                    _ => {
                        dist.insert(next, candidate);
                        pred.insert(next, node);
                        heap.push(Reverse((candidate, next)));
                    }
                }
            }
        }

        Self { source, dist, pred }
    }

    pub fn distance(&self, node: RouterId) -> Option<u64> {
        self.dist.get(&node).copied()
    }

    /// 所有可达节点（含源点），按 id 升序
    pub fn reached(&self) -> impl Iterator<Item = (RouterId, u64)> + '_ {
        self.dist.iter().map(|(&n, &d)| (n, d))
    }

    /// 最短路径上的第一跳；源点本身返回源点。
    pub fn next_hop(&self, dest: RouterId) -> Option<RouterId> {
        let path = self.path(dest)?;
        Some(path.get(1).copied().unwrap_or(self.source))
    }

    /// 完整路径 `[source, ..., dest]`
    pub fn path(&self, dest: RouterId) -> Option<Vec<RouterId>> {
        if !self.dist.contains_key(&dest) {
            return None;
        }
        let mut path = vec![dest];
        let mut current = dest;
        while current != self.source {
            current = *self.pred.get(&current)?;
            path.push(current);
        }
        path.reverse();
        Some(path)
    }
}
