//! 网络模型模块
//!
//! 此模块包含两种协议共用的数据模型：路由器标识、代价、路由表项、路由器与拓扑。

// 子模块声明
mod change;
mod cost;
mod id;
mod route;
mod router;
mod topology;

// 重新导出公共接口
pub use change::{LinkAction, LinkChange, LinkRecord};
pub use cost::{Cost, LinkCost, MAX_LINK_COST, REMOVE_LINK_SENTINEL};
pub use id::RouterId;
pub use route::RouteEntry;
pub use router::Router;
pub use topology::{ChangeOutcome, LinkUpdate, Topology};
