//! 错误类型
//!
//! “无路可达”不是错误：它以 `Cost::Infinite` / `Delivery::Unreachable`
//! 的形式作为数据返回。这里只收录调用方违反代价模型、或输入记录格式有误时的错误。

use crate::net::RouterId;

/// 路由核心的错误（均属编程错误，不做恢复）。
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    #[error("invalid link cost {cost} between {a} and {b}")]
    InvalidLinkCost { a: RouterId, b: RouterId, cost: i64 },

    #[error("router {router} cannot be linked to itself")]
    SelfLoop { router: RouterId },

    #[error("routing did not converge within {limit} iterations")]
    NoConvergence { limit: usize },

    #[error("next-hop chain from {from} to {to} does not terminate")]
    ForwardingLoop { from: RouterId, to: RouterId },
}

/// 输入记录（拓扑 / 变更 / 消息 / 场景文件）的错误。
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// 仿真驱动与命令行入口的顶层错误。
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error(transparent)]
    Routing(#[from] RoutingError),

    #[error(transparent)]
    Record(#[from] RecordError),
}
