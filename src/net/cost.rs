//! 代价类型
//!
//! 链路代价是正整数；路径代价要么有限，要么是 INFINITY（不可达）。

use serde::{Serialize, Serializer};
use std::fmt;

/// 单条链路的代价（两个方向共用）。
pub type LinkCost = u32;

/// 合法链路代价的上界；`u32::MAX` 留作定宽表示下的 INFINITY。
pub const MAX_LINK_COST: LinkCost = u32::MAX - 1;

/// 变更记录中表示“删除链路”的代价哨兵值。
pub const REMOVE_LINK_SENTINEL: i64 = -999;

/// 路径代价。
///
/// 变体顺序决定了派生的 `Ord`：任何 `Finite` 都严格小于 `Infinite`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Cost {
    Finite(u64),
    Infinite,
}

impl Cost {
    pub const ZERO: Cost = Cost::Finite(0);
    pub const INFINITY: Cost = Cost::Infinite;

    pub fn is_finite(self) -> bool {
        matches!(self, Cost::Finite(_))
    }

    /// 有限代价的数值；INFINITY 返回 `None`。
    pub fn value(self) -> Option<u64> {
        match self {
            Cost::Finite(v) => Some(v),
            Cost::Infinite => None,
        }
    }

    /// 在路径末端追加一条链路。INFINITY 永远不会被加进有限代价里。
    pub fn plus(self, link: LinkCost) -> Cost {
        match self {
            Cost::Finite(v) => Cost::Finite(v.saturating_add(u64::from(link))),
            Cost::Infinite => Cost::Infinite,
        }
    }
}

impl From<LinkCost> for Cost {
    fn from(c: LinkCost) -> Self {
        Cost::Finite(u64::from(c))
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cost::Finite(v) => write!(f, "{v}"),
            Cost::Infinite => f.write_str("infinite"),
        }
    }
}

// JSON 里有限代价是数字，INFINITY 是 null。
impl Serialize for Cost {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cost::Finite(v) => serializer.serialize_u64(*v),
            Cost::Infinite => serializer.serialize_none(),
        }
    }
}
