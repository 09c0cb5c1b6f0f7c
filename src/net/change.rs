//! 拓扑记录与链路变更
//!
//! `LinkRecord` 是文件 / 场景里的原始一行 `<a> <b> <cost>`；
//! `LinkChange` 是校验过代价之后的变更。

use serde::{Deserialize, Serialize};

use super::cost::{LinkCost, MAX_LINK_COST, REMOVE_LINK_SENTINEL};
use super::id::RouterId;
use crate::error::RoutingError;

/// 原始链路记录，代价尚未校验。
///
/// 反序列化时既接受 `{"a": 1, "b": 2, "cost": 6}`，也接受 `[1, 2, 6]`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub a: RouterId,
    pub b: RouterId,
    pub cost: i64,
}

impl LinkRecord {
    pub fn new(a: u32, b: u32, cost: i64) -> Self {
        Self {
            a: RouterId(a),
            b: RouterId(b),
            cost,
        }
    }

    pub fn to_change(&self) -> Result<LinkChange, RoutingError> {
        LinkChange::from_record(self.a, self.b, self.cost)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LinkAction {
    /// 新建链路，或修改已有链路的代价
    Set { cost: LinkCost },
    Remove,
}

/// 校验过的链路变更
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LinkChange {
    pub a: RouterId,
    pub b: RouterId,
    pub action: LinkAction,
}

impl LinkChange {
    pub fn set(a: RouterId, b: RouterId, cost: LinkCost) -> Self {
        Self {
            a,
            b,
            action: LinkAction::Set { cost },
        }
    }

    pub fn remove(a: RouterId, b: RouterId) -> Self {
        Self {
            a,
            b,
            action: LinkAction::Remove,
        }
    }

    /// 解释记录中的代价：`-999` 表示删除，其余必须落在 `1..=MAX_LINK_COST`。
    pub fn from_record(a: RouterId, b: RouterId, cost: i64) -> Result<Self, RoutingError> {
        if a == b {
            return Err(RoutingError::SelfLoop { router: a });
        }
        if cost == REMOVE_LINK_SENTINEL {
            return Ok(Self::remove(a, b));
        }
        match LinkCost::try_from(cost) {
            Ok(c) if (1..=MAX_LINK_COST).contains(&c) => Ok(Self::set(a, b, c)),
            _ => Err(RoutingError::InvalidLinkCost { a, b, cost }),
        }
    }
}
