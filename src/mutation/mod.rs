//! 图变更模块
//!
//! 每个变更都是可序列化的增量描述，只保存节点/边 ID，
//! 在应用时通过网络解析。逆变更无需外部状态即可推导：
//! 增量取负，高亮模式取反，组合变更倒序并逐个取逆。

use crate::error::Result;
use crate::graph::{EdgeId, FlowNetwork, NodeId};
use crate::types::{Amount, HighlightMode};
use serde::{Deserialize, Serialize};

/// 高亮目标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Element {
    Node(NodeId),
    Edge(EdgeId),
}

/// 图变更
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GraphMutation {
    /// 边流量增量
    FlowDelta { edge: EdgeId, delta: Amount },
    /// 节点高度增量
    HeightDelta { node: NodeId, delta: Amount },
    /// 节点盈余增量
    ExcessDelta { node: NodeId, delta: Amount },
    /// 高亮 / 取消高亮
    HighlightToggle { element: Element, mode: HighlightMode },
    /// 按顺序原子应用的一组变更
    Combined { mutations: Vec<GraphMutation> },
}

impl GraphMutation {
    pub fn flow(edge: EdgeId, delta: Amount) -> Self {
        GraphMutation::FlowDelta { edge, delta }
    }

    pub fn height(node: NodeId, delta: Amount) -> Self {
        GraphMutation::HeightDelta { node, delta }
    }

    pub fn excess(node: NodeId, delta: Amount) -> Self {
        GraphMutation::ExcessDelta { node, delta }
    }

    pub fn highlight_node(node: NodeId) -> Self {
        GraphMutation::HighlightToggle {
            element: Element::Node(node),
            mode: HighlightMode::Add,
        }
    }

    pub fn highlight_edge(edge: EdgeId) -> Self {
        GraphMutation::HighlightToggle {
            element: Element::Edge(edge),
            mode: HighlightMode::Add,
        }
    }

    pub fn combined(mutations: Vec<GraphMutation>) -> Self {
        GraphMutation::Combined { mutations }
    }

    /// 应用到网络
    ///
    /// 只有引用了不存在的节点或边时才会失败，这意味着变更构造有误。
    pub fn apply(&self, network: &mut FlowNetwork) -> Result<()> {
        match self {
            GraphMutation::FlowDelta { edge, delta } => {
                network.edge_mut(*edge)?.add_flow(*delta);
            }
            GraphMutation::HeightDelta { node, delta } => {
                network.node_mut(*node)?.add_height(*delta);
            }
            GraphMutation::ExcessDelta { node, delta } => {
                network.node_mut(*node)?.add_excess(*delta);
            }
            GraphMutation::HighlightToggle { element, mode } => match (element, mode) {
                (Element::Node(id), HighlightMode::Add) => network.node_mut(*id)?.highlight(),
                (Element::Node(id), HighlightMode::Remove) => {
                    network.node_mut(*id)?.unhighlight()
                }
                (Element::Edge(id), HighlightMode::Add) => network.edge_mut(*id)?.highlight(),
                (Element::Edge(id), HighlightMode::Remove) => {
                    network.edge_mut(*id)?.unhighlight()
                }
            },
            GraphMutation::Combined { mutations } => {
                for mutation in mutations {
                    mutation.apply(network)?;
                }
            }
        }
        Ok(())
    }

    /// 逆变更
    pub fn inverse(&self) -> GraphMutation {
        match self {
            GraphMutation::FlowDelta { edge, delta } => GraphMutation::flow(*edge, -delta),
            GraphMutation::HeightDelta { node, delta } => GraphMutation::height(*node, -delta),
            GraphMutation::ExcessDelta { node, delta } => GraphMutation::excess(*node, -delta),
            GraphMutation::HighlightToggle { element, mode } => GraphMutation::HighlightToggle {
                element: *element,
                mode: mode.flipped(),
            },
            GraphMutation::Combined { mutations } => GraphMutation::combined(
                mutations.iter().rev().map(GraphMutation::inverse).collect(),
            ),
        }
    }

    /// 是否不产生任何效果
    pub fn is_noop(&self) -> bool {
        match self {
            GraphMutation::FlowDelta { delta, .. }
            | GraphMutation::HeightDelta { delta, .. }
            | GraphMutation::ExcessDelta { delta, .. } => *delta == 0,
            GraphMutation::HighlightToggle { .. } => false,
            GraphMutation::Combined { mutations } => mutations.iter().all(GraphMutation::is_noop),
        }
    }
}

/// 按顺序应用一组变更
pub fn apply_all(mutations: &[GraphMutation], network: &mut FlowNetwork) -> Result<()> {
    for mutation in mutations {
        mutation.apply(network)?;
    }
    Ok(())
}

/// 倒序应用一组变更的逆变更
pub fn undo_all(mutations: &[GraphMutation], network: &mut FlowNetwork) -> Result<()> {
    for mutation in mutations.iter().rev() {
        mutation.inverse().apply(network)?;
    }
    Ok(())
}

/// 一组变更整体的逆（倒序且逐个取逆）
pub fn inverse_all(mutations: &[GraphMutation]) -> Vec<GraphMutation> {
    mutations.iter().rev().map(GraphMutation::inverse).collect()
}
