//! 路由协议引擎
//!
//! 两种协议都实现 `RoutingEngine`：拓扑由 `Topology` 独占，引擎只在一次调用期间借用它。
//! 引擎自身只保存协议私有的状态（例如链路状态数据库）。

pub mod distance_vector;
pub mod link_state;
pub mod spf;

use serde::{Deserialize, Serialize};

use crate::error::RoutingError;
use crate::net::{ChangeOutcome, LinkChange, Topology};

pub use distance_vector::{DistanceVector, DistanceVectorOpts};
pub use link_state::{LinkState, LinkStateDb, Lsp};
pub use spf::ShortestPathTree;

/// 协议引擎接口
pub trait RoutingEngine: Send {
    fn kind(&self) -> ProtocolKind;

    /// 初始拓扑建立后的首次收敛
    fn converge(&mut self, topo: &mut Topology) -> Result<(), RoutingError>;

    /// 应用一条拓扑变更，并让所有受影响的路由表重新收敛
    fn apply_change(
        &mut self,
        topo: &mut Topology,
        change: &LinkChange,
    ) -> Result<ChangeOutcome, RoutingError>;
}

/// 协议选择
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolKind {
    #[default]
    #[serde(alias = "dv")]
    #[value(alias = "dv")]
    DistanceVector,
    #[serde(alias = "ls")]
    #[value(alias = "ls")]
    LinkState,
}

impl ProtocolKind {
    pub fn engine(self, dv_opts: DistanceVectorOpts) -> Box<dyn RoutingEngine> {
        match self {
            ProtocolKind::DistanceVector => Box::new(DistanceVector::new(dv_opts)),
            ProtocolKind::LinkState => Box::new(LinkState::new()),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ProtocolKind::DistanceVector => "distance_vector",
            ProtocolKind::LinkState => "link_state",
        }
    }
}
