//! 每轮输出的快照
//!
//! 文本格式：每台路由器（升序）输出有限代价的表项 `<dest> <next_hop> <cost>`
//! （按目的地升序），后接空行；随后每条消息一行；最后一个空行结束本轮。

use std::fmt;

use serde::Serialize;

use super::delivery::MessageOutcome;
use crate::net::{Cost, LinkChange, Router, RouterId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub destination: RouterId,
    pub next_hop: RouterId,
    pub cost: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouterTable {
    pub router: RouterId,
    pub routes: Vec<TableRow>,
}

impl RouterTable {
    /// 只保留有限代价的表项
    pub fn from_router(router: &Router) -> Self {
        let routes = router
            .routing_table()
            .iter()
            .filter_map(|(&destination, entry)| match (entry.next_hop(), entry.cost()) {
                (Some(next_hop), Cost::Finite(cost)) => Some(TableRow {
                    destination,
                    next_hop,
                    cost,
                }),
                _ => None,
            })
            .collect();
        Self {
            router: router.id(),
            routes,
        }
    }
}

/// 一轮（初始收敛或一条变更之后）的完整输出
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundSnapshot {
    pub round: usize,
    /// 初始一轮为 `None`
    pub change: Option<LinkChange>,
    pub tables: Vec<RouterTable>,
    pub messages: Vec<MessageOutcome>,
}

impl RoundSnapshot {
    pub fn table(&self, router: RouterId) -> Option<&RouterTable> {
        self.tables.iter().find(|t| t.router == router)
    }
}

impl fmt::Display for RoundSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for table in &self.tables {
            for row in &table.routes {
                writeln!(f, "{} {} {}", row.destination, row.next_hop, row.cost)?;
            }
            writeln!(f)?;
        }
        for msg in &self.messages {
            writeln!(f, "{msg}")?;
        }
        writeln!(f)
    }
}
