//! 单播消息投递
//!
//! 在已收敛的路由表上沿下一跳链走到目的地，得到途经的路由器与总代价。

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::RoutingError;
use crate::net::{Cost, RouterId, Topology};

/// 待投递的消息记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub from: RouterId,
    pub to: RouterId,
    pub text: String,
}

impl MessageRecord {
    pub fn new(from: u32, to: u32, text: impl Into<String>) -> Self {
        Self {
            from: RouterId(from),
            to: RouterId(to),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Delivery {
    /// `hops` 含源、不含目的地
    Delivered { cost: u64, hops: Vec<RouterId> },
    Unreachable,
}

/// 一条消息的投递结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageOutcome {
    pub from: RouterId,
    pub to: RouterId,
    pub text: String,
    pub delivery: Delivery,
}

impl fmt::Display for MessageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "from {} to {} cost ", self.from, self.to)?;
        match &self.delivery {
            Delivery::Delivered { cost, hops } => {
                write!(f, "{cost} hops")?;
                for hop in hops {
                    write!(f, " {hop}")?;
                }
            }
            Delivery::Unreachable => write!(f, "{} hops unreachable", Cost::Infinite)?,
        }
        write!(f, " message {}", self.text)
    }
}

/// 解析 `from` 到 `to` 的路径。
///
/// 任一端未知、`from` 表中没有 `to`、或该表项为 INFINITY 时不可达。
/// 代价取 `from` 表项中的总代价，不沿途累加。
pub fn resolve(topo: &Topology, from: RouterId, to: RouterId) -> Result<Delivery, RoutingError> {
    let (Some(source), true) = (topo.router(from), topo.contains(to)) else {
        return Ok(Delivery::Unreachable);
    };
    let Some(entry) = source.route(to) else {
        return Ok(Delivery::Unreachable);
    };
    let (Some(first_hop), Cost::Finite(cost)) = (entry.next_hop(), entry.cost()) else {
        return Ok(Delivery::Unreachable);
    };

    let mut hops = vec![from];
    let mut next = first_hop;
    while next != to {
        if hops.len() > topo.len() || hops.contains(&next) {
            return Err(RoutingError::ForwardingLoop { from, to });
        }
        hops.push(next);
        next = topo
            .router(next)
            .and_then(|r| r.route(to))
            .and_then(|e| e.next_hop())
            .ok_or(RoutingError::ForwardingLoop { from, to })?;
    }

    trace!(%from, %to, cost, hops = hops.len(), "消息路径已解析");
    Ok(Delivery::Delivered { cost, hops })
}

/// 解析一条消息记录
pub fn deliver(topo: &Topology, msg: &MessageRecord) -> Result<MessageOutcome, RoutingError> {
    Ok(MessageOutcome {
        from: msg.from,
        to: msg.to,
        text: msg.text.clone(),
        delivery: resolve(topo, msg.from, msg.to)?,
    })
}
