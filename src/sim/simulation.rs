//! 仿真驱动
//!
//! 持有拓扑与当前协议引擎：先建立初始拓扑并收敛，然后逐条应用变更；
//! 每一轮结束后输出所有路由表，并在当前路由表上投递全部待发消息。

use tracing::{debug, info};

use super::delivery::{MessageRecord, deliver};
use super::scenario::Scenario;
use super::snapshot::{RoundSnapshot, RouterTable};
use crate::error::{RoutingError, SimError};
use crate::net::{LinkChange, LinkRecord, Topology};
use crate::proto::{DistanceVectorOpts, ProtocolKind, RoutingEngine};

/// 仿真配置
#[derive(Debug, Clone, Default)]
pub struct SimOpts {
    pub distance_vector: DistanceVectorOpts,
}

pub struct Simulation {
    topology: Topology,
    engine: Box<dyn RoutingEngine>,
    messages: Vec<MessageRecord>,
    round: usize,
}

impl Simulation {
    pub fn new(kind: ProtocolKind, opts: &SimOpts) -> Self {
        Self {
            topology: Topology::new(),
            engine: kind.engine(opts.distance_vector.clone()),
            messages: Vec::new(),
            round: 0,
        }
    }

    pub fn kind(&self) -> ProtocolKind {
        self.engine.kind()
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// 每一轮都要投递的消息
    pub fn set_messages(&mut self, messages: Vec<MessageRecord>) {
        self.messages = messages;
    }

    /// 建立初始拓扑并完成首次收敛（第 0 轮）
    #[tracing::instrument(skip(self, records), fields(protocol = self.kind().name()))]
    pub fn initialize(&mut self, records: &[LinkRecord]) -> Result<RoundSnapshot, SimError> {
        self.topology.initialize(records)?;
        self.engine.converge(&mut self.topology)?;
        self.round = 0;
        Ok(self.snapshot(None)?)
    }

    /// 应用一条变更记录并重新收敛
    #[tracing::instrument(skip(self), fields(protocol = self.kind().name(), round = self.round + 1))]
    pub fn apply_change(&mut self, record: &LinkRecord) -> Result<RoundSnapshot, SimError> {
        let change = record.to_change()?;
        let outcome = self.engine.apply_change(&mut self.topology, &change)?;
        self.round += 1;
        debug!(created = outcome.created.len(), update = ?outcome.update, "变更已应用");
        Ok(self.snapshot(Some(change))?)
    }

    /// 当前所有路由表与消息投递结果
    pub fn snapshot(&self, change: Option<LinkChange>) -> Result<RoundSnapshot, RoutingError> {
        let tables = self
            .topology
            .routers()
            .map(RouterTable::from_router)
            .collect();
        let messages = self
            .messages
            .iter()
            .map(|msg| deliver(&self.topology, msg))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RoundSnapshot {
            round: self.round,
            change,
            tables,
            messages,
        })
    }

    /// 跑完整个场景，返回每一轮的快照。场景里写了协议时以场景为准。
    pub fn run(
        scenario: &Scenario,
        fallback: ProtocolKind,
        opts: &SimOpts,
    ) -> Result<Vec<RoundSnapshot>, SimError> {
        let kind = scenario.protocol.unwrap_or(fallback);
        let mut sim = Simulation::new(kind, opts);
        sim.set_messages(scenario.messages.clone());

        info!(
            protocol = kind.name(),
            links = scenario.topology.len(),
            changes = scenario.changes.len(),
            messages = scenario.messages.len(),
            "▶️  开始运行仿真"
        );

        let mut rounds = Vec::with_capacity(scenario.changes.len() + 1);
        rounds.push(sim.initialize(&scenario.topology)?);
        for record in &scenario.changes {
            rounds.push(sim.apply_change(record)?);
        }

        info!(rounds = rounds.len(), routers = sim.topology().len(), "✅ 仿真完成");
        Ok(rounds)
    }
}
