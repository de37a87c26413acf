//! 通用 Push-Relabel 最大流算法
//!
//! 初始化预流后，每一步执行一次可用的推送或重标记操作。
//! 推送优先：按节点插入顺序、出边终点标签顺序查找第一个可推送的边；
//! 没有可推送的边时，按插入顺序重标记第一个可重标记的节点。

use super::pseudocode::push_relabel_lines as lines;
use super::{AlgorithmDriver, AlgorithmKind, AlgorithmStepResult};
use crate::error::Result;
use crate::graph::{EdgeId, FlowNetwork, Node, NodeId, SharedNetwork};
use crate::mutation::{inverse_all, GraphMutation};
use crate::types::{Amount, LineNumber};
use std::sync::Arc;
use tracing::{debug, trace};

#[derive(Debug)]
enum Phase {
    /// 所有高度和盈余清零
    ResetLabels,
    /// 源点高度设为 |V|
    LiftSource,
    /// 一步内饱和全部源点出边
    Saturate,
    /// 推送 / 重标记
    Operate,
    Exhausted,
}

/// 一次可执行的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Push {
        from: NodeId,
        to: NodeId,
        edge: EdgeId,
        delta: Amount,
    },
    Relabel { node: NodeId, delta: Amount },
}

/// Push-Relabel 驱动
pub struct PushRelabel {
    network: SharedNetwork,
    phase: Phase,
    /// 上一步添加的高亮，下一步开头撤销
    previous_highlights: Vec<GraphMutation>,
    operations: usize,
}

impl PushRelabel {
    pub fn new(network: SharedNetwork) -> Self {
        Self {
            network,
            phase: Phase::ResetLabels,
            previous_highlights: Vec::new(),
            operations: 0,
        }
    }

    /// 已执行的推送 / 重标记次数
    pub fn operations(&self) -> usize {
        self.operations
    }

    /// 组装步骤：先撤销上一步的高亮，再应用本步变更和新高亮
    fn emit(
        &mut self,
        lines: &[LineNumber],
        changes: Vec<GraphMutation>,
        highlights: Vec<GraphMutation>,
    ) -> AlgorithmStepResult {
        let mut mutations = inverse_all(&self.previous_highlights);
        mutations.extend(changes);
        mutations.extend(highlights.iter().cloned());
        self.previous_highlights = highlights;
        AlgorithmStepResult::new(lines, Vec::new(), mutations)
    }

    fn step(&mut self, network: &FlowNetwork) -> Result<Option<AlgorithmStepResult>> {
        match std::mem::replace(&mut self.phase, Phase::Exhausted) {
            Phase::ResetLabels => {
                // 先确认拓扑合法
                network.source_node()?;
                network.sink_node()?;

                let changes = network
                    .nodes()
                    .map(|n| {
                        GraphMutation::combined(vec![
                            GraphMutation::height(n.id(), -n.height()),
                            GraphMutation::excess(n.id(), -n.excess()),
                        ])
                    })
                    .filter(|m| !m.is_noop())
                    .collect();
                self.phase = Phase::LiftSource;
                Ok(Some(self.emit(lines::RESET_LABELS, changes, Vec::new())))
            }

            Phase::LiftSource => {
                let source = network.source_node()?;
                let target_height = network.node_count() as Amount;
                let changes = vec![GraphMutation::height(
                    source.id(),
                    target_height - source.height(),
                )];
                let highlights = vec![GraphMutation::highlight_node(source.id())];
                self.phase = Phase::Saturate;
                Ok(Some(self.emit(lines::LIFT_SOURCE, changes, highlights)))
            }

            Phase::Saturate => {
                let source = network.source_node()?;
                let mut changes = Vec::new();
                let mut highlights = Vec::new();
                for edge in network.outgoing_edges(source.id()) {
                    let delta = edge.residual();
                    if delta <= 0 {
                        continue;
                    }
                    let reverse = network.reverse_edge(edge.id())?.id();
                    changes.push(GraphMutation::combined(vec![
                        GraphMutation::flow(edge.id(), delta),
                        GraphMutation::flow(reverse, -delta),
                        GraphMutation::excess(edge.target(), delta),
                        GraphMutation::excess(source.id(), -delta),
                    ]));
                    highlights.push(GraphMutation::highlight_edge(edge.id()));
                }
                debug!(edges = changes.len(), "预流初始化");

                // 源点保持高亮，与饱和边一起在第一次操作时撤销
                let mut mutations = changes;
                mutations.extend(highlights.iter().cloned());
                self.previous_highlights.extend(highlights);
                self.phase = Phase::Operate;
                Ok(Some(AlgorithmStepResult::new(lines::SATURATE, Vec::new(), mutations)))
            }

            Phase::Operate => match find_operation(network)? {
                Some(Operation::Push {
                    from,
                    to,
                    edge,
                    delta,
                }) => {
                    trace!(%from, %to, delta, "push");
                    self.operations += 1;
                    let reverse = network.reverse_edge(edge)?.id();
                    let changes = vec![GraphMutation::combined(vec![
                        GraphMutation::flow(edge, delta),
                        GraphMutation::flow(reverse, -delta),
                        GraphMutation::excess(from, -delta),
                        GraphMutation::excess(to, delta),
                    ])];
                    let highlights = vec![
                        GraphMutation::highlight_node(from),
                        GraphMutation::highlight_edge(edge),
                        GraphMutation::highlight_node(to),
                    ];
                    self.phase = Phase::Operate;
                    Ok(Some(self.emit(lines::PUSH, changes, highlights)))
                }
                Some(Operation::Relabel { node, delta }) => {
                    trace!(%node, delta, "relabel");
                    self.operations += 1;
                    let changes = vec![GraphMutation::height(node, delta)];
                    let highlights = vec![GraphMutation::highlight_node(node)];
                    self.phase = Phase::Operate;
                    Ok(Some(self.emit(lines::RELABEL, changes, highlights)))
                }
                None => {
                    let flow = network.sink_node()?.excess();
                    debug!(operations = self.operations, flow, "没有可执行的推送或重标记");
                    let step = self.emit(lines::RETURN, Vec::new(), Vec::new());
                    Ok(Some(step.finished(flow)))
                }
            },

            Phase::Exhausted => Ok(None),
        }
    }
}

/// 活跃节点：非源汇且盈余为正
fn is_active(node: &Node) -> bool {
    !node.node_type().is_terminal() && node.excess() > 0
}

/// 查找下一个可执行的操作，推送优先
fn find_operation(network: &FlowNetwork) -> Result<Option<Operation>> {
    for node in network.nodes().filter(|n| is_active(n)) {
        for edge in network.outgoing_edges(node.id()) {
            if !edge.has_residual() {
                continue;
            }
            let target = network.try_node(edge.target())?;
            if node.height() == target.height() + 1 {
                return Ok(Some(Operation::Push {
                    from: node.id(),
                    to: target.id(),
                    edge: edge.id(),
                    delta: node.excess().min(edge.residual()),
                }));
            }
        }
    }

    for node in network.nodes().filter(|n| is_active(n)) {
        let mut lowest: Option<Amount> = None;
        let mut applicable = true;
        for edge in network.outgoing_edges(node.id()) {
            if !edge.has_residual() {
                continue;
            }
            let height = network.try_node(edge.target())?.height();
            if node.height() > height {
                applicable = false;
                break;
            }
            lowest = Some(lowest.map_or(height, |h| h.min(height)));
        }
        // 没有剩余边的节点无法重标记
        if let (true, Some(lowest)) = (applicable, lowest) {
            return Ok(Some(Operation::Relabel {
                node: node.id(),
                delta: lowest + 1 - node.height(),
            }));
        }
    }

    Ok(None)
}

impl AlgorithmDriver for PushRelabel {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::PushRelabel
    }

    fn next_step(&mut self) -> Result<Option<AlgorithmStepResult>> {
        let network = Arc::clone(&self.network);
        let guard = network.read();
        self.step(&guard)
    }

    fn is_exhausted(&self) -> bool {
        matches!(self.phase, Phase::Exhausted)
    }
}
