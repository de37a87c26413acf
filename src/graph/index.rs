//! 图索引
//!
//! 节点和边的内存索引，支持按标签、类型和端点快速查找

use crate::graph::edge::EdgeId;
use crate::graph::node::NodeId;
use crate::types::NodeType;
use indexmap::IndexSet;
use smallvec::SmallVec;
use std::collections::HashMap;

/// 点对之间的边集合（通常只有一条）
pub type ParallelEdges = SmallVec<[EdgeId; 2]>;

/// 节点索引
#[derive(Debug, Clone, Default)]
pub struct NodeIndex {
    /// 标签到节点 ID 的映射
    label_to_id: HashMap<String, NodeId>,
    /// 类型到节点 ID 集合的映射（保持插入顺序）
    type_to_ids: HashMap<NodeType, IndexSet<NodeId>>,
}

impl NodeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加节点
    pub fn add(&mut self, id: NodeId, label: &str, node_type: NodeType) {
        self.label_to_id.insert(label.to_string(), id);
        self.type_to_ids.entry(node_type).or_default().insert(id);
    }

    /// 通过标签查找节点
    pub fn get_by_label(&self, label: &str) -> Option<NodeId> {
        self.label_to_id.get(label).copied()
    }

    /// 获取某类型的所有节点
    pub fn get_by_type(&self, node_type: NodeType) -> Vec<NodeId> {
        self.type_to_ids
            .get(&node_type)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// 某类型的节点数量
    pub fn count_by_type(&self, node_type: NodeType) -> usize {
        self.type_to_ids.get(&node_type).map(|s| s.len()).unwrap_or(0)
    }

    /// 更新节点类型
    pub fn retype(&mut self, id: NodeId, old: NodeType, new: NodeType) {
        if let Some(set) = self.type_to_ids.get_mut(&old) {
            set.shift_remove(&id);
        }
        self.type_to_ids.entry(new).or_default().insert(id);
    }

    /// 更新节点标签
    pub fn relabel(&mut self, id: NodeId, old: &str, new: &str) {
        self.label_to_id.remove(old);
        self.label_to_id.insert(new.to_string(), id);
    }

    /// 移除节点
    pub fn remove(&mut self, id: NodeId, label: &str, node_type: NodeType) {
        self.label_to_id.remove(label);
        if let Some(set) = self.type_to_ids.get_mut(&node_type) {
            set.shift_remove(&id);
        }
    }
}

/// 边索引
#[derive(Debug, Clone, Default)]
pub struct EdgeIndex {
    /// 起点到出边的映射
    outgoing: HashMap<NodeId, Vec<EdgeId>>,
    /// 终点到入边的映射
    incoming: HashMap<NodeId, Vec<EdgeId>>,
    /// (起点, 终点) 到边 ID 列表的映射
    pair_to_edges: HashMap<(NodeId, NodeId), ParallelEdges>,
}

impl EdgeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加边
    pub fn add_edge(&mut self, edge_id: EdgeId, source: NodeId, target: NodeId) {
        self.outgoing.entry(source).or_default().push(edge_id);
        self.incoming.entry(target).or_default().push(edge_id);
        self.pair_to_edges
            .entry((source, target))
            .or_default()
            .push(edge_id);
    }

    /// 获取节点的出边（插入顺序）
    pub fn get_outgoing(&self, node_id: NodeId) -> &[EdgeId] {
        self.outgoing
            .get(&node_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// 获取节点的入边（插入顺序）
    pub fn get_incoming(&self, node_id: NodeId) -> &[EdgeId] {
        self.incoming
            .get(&node_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// 获取两点之间的所有边
    pub fn get_edges_between(&self, source: NodeId, target: NodeId) -> &[EdgeId] {
        self.pair_to_edges
            .get(&(source, target))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// 移除边
    pub fn remove(&mut self, edge_id: EdgeId, source: NodeId, target: NodeId) {
        if let Some(edges) = self.outgoing.get_mut(&source) {
            edges.retain(|&id| id != edge_id);
        }
        if let Some(edges) = self.incoming.get_mut(&target) {
            edges.retain(|&id| id != edge_id);
        }
        if let Some(edges) = self.pair_to_edges.get_mut(&(source, target)) {
            edges.retain(|id| *id != edge_id);
            if edges.is_empty() {
                self.pair_to_edges.remove(&(source, target));
            }
        }
    }

    pub fn out_degree(&self, node_id: NodeId) -> usize {
        self.get_outgoing(node_id).len()
    }

    pub fn in_degree(&self, node_id: NodeId) -> usize {
        self.get_incoming(node_id).len()
    }
}
