//! 标识符类型
//!
//! 定义路由器的唯一标识符。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 路由器标识符：小的非负整数，同时也是全局排序与打破平局的键。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RouterId(pub u32);

impl fmt::Display for RouterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for RouterId {
    fn from(x: u32) -> Self {
        RouterId(x)
    }
}
