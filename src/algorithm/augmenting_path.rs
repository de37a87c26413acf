//! 增广路径算法骨架
//!
//! Edmonds-Karp（队列，广度优先）和 Ford-Fulkerson（栈，深度优先）
//! 共用同一个状态机，唯一区别是前沿的弹出顺序。

use super::pseudocode::augmenting_lines as lines;
use super::{AlgorithmDriver, AlgorithmKind, AlgorithmStepResult};
use crate::error::Result;
use crate::graph::{EdgeId, FlowNetwork, NodeId, SharedNetwork};
use crate::mutation::{inverse_all, GraphMutation};
use crate::types::{Amount, LineNumber};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tracing::debug;

/// 前沿弹出顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discipline {
    /// 先进先出（队列）
    Fifo,
    /// 后进先出（栈）
    Lifo,
}

/// 搜索前沿
#[derive(Debug, Clone)]
struct Frontier {
    items: VecDeque<NodeId>,
    discipline: Discipline,
}

impl Frontier {
    fn new(discipline: Discipline) -> Self {
        Self {
            items: VecDeque::new(),
            discipline,
        }
    }

    fn reset(&mut self, seed: NodeId) {
        self.items.clear();
        self.items.push_back(seed);
    }

    fn push(&mut self, node: NodeId) {
        self.items.push_back(node);
    }

    fn pop(&mut self) -> Option<NodeId> {
        match self.discipline {
            Discipline::Fifo => self.items.pop_front(),
            Discipline::Lifo => self.items.pop_back(),
        }
    }

    fn snapshot(&self) -> Vec<NodeId> {
        self.items.iter().copied().collect()
    }
}

#[derive(Debug)]
enum Phase {
    /// 开始新一轮搜索
    BeginRound,
    /// 从前沿取出下一个节点
    Search,
    /// 逐条检查节点的出边
    Scan { edges: Vec<EdgeId>, next: usize },
    /// 找到增广路径
    PathFound,
    /// 沿路径逐条更新流量
    Augment {
        path: Vec<EdgeId>,
        delta: Amount,
        next: usize,
    },
    /// 清除路径高亮，累加总流量
    EndRound,
    /// 没有增广路径，产生终止步骤
    Finish,
    Exhausted,
}

/// 增广路径驱动
pub struct AugmentingPathDriver {
    kind: AlgorithmKind,
    network: SharedNetwork,
    phase: Phase,
    /// (源点, 汇点)，第一步时解析
    terminals: Option<(NodeId, NodeId)>,
    /// 节点 -> 首次到达它的边
    pred: HashMap<NodeId, EdgeId>,
    frontier: Frontier,
    /// 本轮搜索添加的高亮
    search_highlights: Vec<GraphMutation>,
    /// 当前增广路径的高亮
    path_highlights: Vec<GraphMutation>,
    /// 累计流量
    flow: Amount,
}

impl AugmentingPathDriver {
    pub fn new(kind: AlgorithmKind, discipline: Discipline, network: SharedNetwork) -> Self {
        Self {
            kind,
            network,
            phase: Phase::BeginRound,
            terminals: None,
            pred: HashMap::new(),
            frontier: Frontier::new(discipline),
            search_highlights: Vec::new(),
            path_highlights: Vec::new(),
            flow: 0,
        }
    }

    /// 目前为止累计的流量
    pub fn flow(&self) -> Amount {
        self.flow
    }

    fn emit(&self, lines: &[LineNumber], mutations: Vec<GraphMutation>) -> AlgorithmStepResult {
        AlgorithmStepResult::new(lines, self.frontier.snapshot(), mutations)
    }

    fn terminals(&mut self, network: &FlowNetwork) -> Result<(NodeId, NodeId)> {
        if let Some(t) = self.terminals {
            return Ok(t);
        }
        let t = (network.source_node()?.id(), network.sink_node()?.id());
        self.terminals = Some(t);
        Ok(t)
    }

    /// 从汇点沿 pred 回溯到源点，返回路径上的边（汇点一侧在前）
    fn trace_path(&self, network: &FlowNetwork, source: NodeId, sink: NodeId) -> Result<Vec<EdgeId>> {
        let mut path = Vec::new();
        let mut current = sink;
        while current != source {
            let Some(&edge_id) = self.pred.get(&current) else {
                break;
            };
            path.push(edge_id);
            current = network.try_edge(edge_id)?.source();
        }
        Ok(path)
    }

    fn step(&mut self, network: &FlowNetwork) -> Result<Option<AlgorithmStepResult>> {
        loop {
            match std::mem::replace(&mut self.phase, Phase::Exhausted) {
                Phase::BeginRound => {
                    let (source, _) = self.terminals(network)?;
                    self.pred.clear();
                    self.frontier.reset(source);
                    self.phase = Phase::Search;
                    return Ok(Some(self.emit(lines::INIT_SEARCH, Vec::new())));
                }

                Phase::Search => {
                    let (_, sink) = self.terminals(network)?;
                    if self.pred.contains_key(&sink) {
                        self.phase = Phase::PathFound;
                        continue;
                    }
                    let Some(node) = self.frontier.pop() else {
                        self.phase = Phase::Finish;
                        continue;
                    };
                    let edges = network
                        .outgoing_edges(node)
                        .iter()
                        .map(|e| e.id())
                        .collect();
                    let highlight = GraphMutation::highlight_node(node);
                    self.search_highlights.push(highlight.clone());
                    self.phase = Phase::Scan { edges, next: 0 };
                    return Ok(Some(self.emit(lines::POP, vec![highlight])));
                }

                Phase::Scan { edges, next } => {
                    let (source, sink) = self.terminals(network)?;
                    // 汇点已到达时不再检查剩余出边
                    if next >= edges.len() || self.pred.contains_key(&sink) {
                        self.phase = Phase::Search;
                        continue;
                    }

                    let edge = network.try_edge(edges[next])?;
                    let target = edge.target();
                    let accepted = !self.pred.contains_key(&target)
                        && target != source
                        && edge.has_residual();
                    if accepted {
                        self.pred.insert(target, edge.id());
                        self.frontier.push(target);
                    }

                    let highlight = GraphMutation::highlight_edge(edge.id());
                    self.search_highlights.push(highlight.clone());
                    self.phase = Phase::Scan {
                        edges,
                        next: next + 1,
                    };
                    let shown = if accepted {
                        lines::RECORD_PRED
                    } else {
                        lines::EXAMINE_EDGE
                    };
                    return Ok(Some(self.emit(shown, vec![highlight])));
                }

                Phase::PathFound => {
                    let (source, sink) = self.terminals(network)?;
                    let path = self.trace_path(network, source, sink)?;

                    let mut delta = Amount::MAX;
                    for &edge_id in &path {
                        delta = delta.min(network.try_edge(edge_id)?.residual());
                    }

                    let mut highlights = vec![GraphMutation::highlight_node(source)];
                    for &edge_id in path.iter().rev() {
                        highlights.push(GraphMutation::highlight_edge(edge_id));
                        highlights.push(GraphMutation::highlight_node(
                            network.try_edge(edge_id)?.target(),
                        ));
                    }

                    let mut mutations = inverse_all(&self.search_highlights);
                    self.search_highlights.clear();
                    mutations.extend(highlights.iter().cloned());
                    self.path_highlights = highlights;

                    debug!(algorithm = %self.kind, edges = path.len(), delta, "找到增广路径");
                    self.phase = Phase::Augment {
                        path,
                        delta,
                        next: 0,
                    };
                    return Ok(Some(self.emit(lines::PATH_FOUND, mutations)));
                }

                Phase::Augment { path, delta, next } => {
                    if next >= path.len() {
                        self.flow += delta;
                        self.phase = Phase::EndRound;
                        continue;
                    }
                    let edge_id = path[next];
                    let reverse_id = network.reverse_edge(edge_id)?.id();
                    self.phase = Phase::Augment {
                        path,
                        delta,
                        next: next + 1,
                    };
                    return Ok(Some(self.emit(
                        lines::AUGMENT_EDGE,
                        vec![
                            GraphMutation::flow(edge_id, delta),
                            GraphMutation::flow(reverse_id, -delta),
                        ],
                    )));
                }

                Phase::EndRound => {
                    let mutations = inverse_all(&self.path_highlights);
                    self.path_highlights.clear();
                    self.phase = Phase::BeginRound;
                    return Ok(Some(self.emit(lines::ADD_FLOW, mutations)));
                }

                Phase::Finish => {
                    let mutations = inverse_all(&self.search_highlights);
                    self.search_highlights.clear();
                    self.frontier.items.clear();
                    debug!(algorithm = %self.kind, flow = self.flow, "没有更多增广路径");
                    return Ok(Some(
                        self.emit(lines::RETURN, mutations).finished(self.flow),
                    ));
                }

                Phase::Exhausted => return Ok(None),
            }
        }
    }
}

impl AlgorithmDriver for AugmentingPathDriver {
    fn kind(&self) -> AlgorithmKind {
        self.kind
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
