//! 流网络数据结构
//!
//! 节点和边存放在以稳定 ID 为键的有序表中，变更通过 ID 定位

use super::edge::{Edge, EdgeId};
use super::index::{EdgeIndex, NodeIndex};
use super::node::{Node, NodeId};
use crate::error::{Error, Result};
use crate::types::{Amount, NodeType};
use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 控制器与渲染方共享的网络句柄
pub type SharedNetwork = Arc<RwLock<FlowNetwork>>;

/// 节点的可观察状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeState {
    pub id: NodeId,
    pub height: Amount,
    pub excess: Amount,
    pub highlight: i32,
}

/// 边的可观察状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeState {
    pub id: EdgeId,
    pub capacity: Amount,
    pub flow: Amount,
    pub highlight: i32,
}

/// 网络的可观察状态快照（流量、高度、盈余、高亮）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservableState {
    pub nodes: Vec<NodeState>,
    pub edges: Vec<EdgeState>,
}

/// 流网络
#[derive(Debug, Clone, Default)]
pub struct FlowNetwork {
    /// 节点表（插入顺序）
    nodes: IndexMap<NodeId, Node>,
    /// 边表（插入顺序）
    edges: IndexMap<EdgeId, Edge>,
    /// 节点索引
    node_index: NodeIndex,
    /// 边索引
    edge_index: EdgeIndex,
    /// 下一个节点 ID
    next_node_id: u64,
    /// 下一个边 ID
    next_edge_id: u64,
}

impl FlowNetwork {
    /// 创建空网络
    pub fn new() -> Self {
        Self {
            next_node_id: 1,
            next_edge_id: 1,
            ..Default::default()
        }
    }

    /// 包装为共享句柄
    pub fn into_shared(self) -> SharedNetwork {
        Arc::new(RwLock::new(self))
    }

    // ==================== 节点操作 ====================

    /// 添加节点
    pub fn add_node(&mut self, label: impl Into<String>, node_type: NodeType) -> Result<NodeId> {
        let label = label.into();
        if self.node_index.get_by_label(&label).is_some() {
            return Err(Error::DuplicateLabel(label));
        }

        let id = NodeId::new(self.next_node_id);
        self.next_node_id += 1;

        self.node_index.add(id, &label, node_type);
        self.nodes.insert(id, Node::new(id, label, node_type));

        Ok(id)
    }

    /// 获取节点
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// 获取节点，不存在时返回错误
    pub fn try_node(&self, id: NodeId) -> Result<&Node> {
        self.nodes
            .get(&id)
            .ok_or_else(|| Error::NodeNotFound(id.to_string()))
    }

    /// 通过标签获取节点
    pub fn node_by_label(&self, label: &str) -> Option<&Node> {
        let id = self.node_index.get_by_label(label)?;
        self.nodes.get(&id)
    }

    /// 所有节点（插入顺序）
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// 修改节点类型
    pub fn set_node_type(&mut self, id: NodeId, node_type: NodeType) -> Result<()> {
        let node = self.node_mut(id)?;
        let old = node.node_type();
        node.set_node_type(node_type);
        self.node_index.retype(id, old, node_type);
        Ok(())
    }

    /// 重命名节点
    pub fn rename_node(&mut self, id: NodeId, label: impl Into<String>) -> Result<()> {
        let label = label.into();
        if let Some(existing) = self.node_index.get_by_label(&label) {
            if existing != id {
                return Err(Error::DuplicateLabel(label));
            }
        }
        let node = self.node_mut(id)?;
        let old = node.label().to_string();
        node.set_label(label.clone());
        self.node_index.relabel(id, &old, &label);
        Ok(())
    }

    /// 删除节点及其所有关联边
    pub fn remove_node(&mut self, id: NodeId) -> Result<()> {
        let node = self
            .nodes
            .shift_remove(&id)
            .ok_or_else(|| Error::NodeNotFound(id.to_string()))?;
        self.node_index.remove(id, node.label(), node.node_type());

        let incident: Vec<EdgeId> = self
            .edge_index
            .get_outgoing(id)
            .iter()
            .chain(self.edge_index.get_incoming(id).iter())
            .copied()
            .collect();
        for edge_id in incident {
            self.remove_single_edge(edge_id);
        }
        Ok(())
    }

    // ==================== 边操作 ====================

    /// 添加边
    ///
    /// 若 (from, to) 已存在（例如之前自动创建的反向边），只更新其容量。
    /// 若 (to, from) 不存在，自动创建容量为 0 的反向边。
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, capacity: Amount) -> Result<EdgeId> {
        if capacity < 0 {
            return Err(Error::InvalidCapacity(capacity));
        }
        self.try_node(from)?;
        self.try_node(to)?;

        if let Some(&existing) = self.edge_index.get_edges_between(from, to).first() {
            self.edge_mut(existing)?.set_capacity(capacity);
            return Ok(existing);
        }

        let id = self.insert_edge(from, to, capacity);
        if self.edge_index.get_edges_between(to, from).is_empty() {
            self.insert_edge(to, from, 0);
        }
        Ok(id)
    }

    fn insert_edge(&mut self, from: NodeId, to: NodeId, capacity: Amount) -> EdgeId {
        let id = EdgeId::new(self.next_edge_id);
        self.next_edge_id += 1;
        self.edge_index.add_edge(id, from, to);
        self.edges.insert(id, Edge::new(id, from, to, capacity));
        id
    }

    /// 获取边
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    /// 获取边，不存在时返回错误
    pub fn try_edge(&self, id: EdgeId) -> Result<&Edge> {
        self.edges
            .get(&id)
            .ok_or_else(|| Error::EdgeNotFound(id.to_string()))
    }

    /// 所有边（插入顺序）
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// 修改边容量
    pub fn set_capacity(&mut self, id: EdgeId, capacity: Amount) -> Result<()> {
        if capacity < 0 {
            return Err(Error::InvalidCapacity(capacity));
        }
        self.edge_mut(id)?.set_capacity(capacity);
        Ok(())
    }

    /// 删除边及其配对的反向边
    pub fn remove_edge(&mut self, id: EdgeId) -> Result<()> {
        let edge = self.try_edge(id)?;
        let (source, target) = (edge.source(), edge.target());
        let pair: Vec<EdgeId> = self
            .edge_index
            .get_edges_between(source, target)
            .iter()
            .chain(self.edge_index.get_edges_between(target, source).iter())
            .copied()
            .collect();
        for edge_id in pair {
            self.remove_single_edge(edge_id);
        }
        Ok(())
    }

    fn remove_single_edge(&mut self, id: EdgeId) {
        if let Some(edge) = self.edges.shift_remove(&id) {
            self.edge_index.remove(id, edge.source(), edge.target());
        }
    }

    // ==================== 算法查询 ====================

    /// 唯一的源点
    pub fn source_node(&self) -> Result<&Node> {
        self.unique_node(NodeType::Source)
    }

    /// 唯一的汇点
    pub fn sink_node(&self) -> Result<&Node> {
        self.unique_node(NodeType::Sink)
    }

    fn unique_node(&self, node_type: NodeType) -> Result<&Node> {
        let ids = self.node_index.get_by_type(node_type);
        match ids.as_slice() {
            [id] => self.try_node(*id),
            _ => Err(self.topology_error()),
        }
    }

    /// 当前的源点 / 汇点数量
    pub fn terminal_counts(&self) -> (usize, usize) {
        (
            self.node_index.count_by_type(NodeType::Source),
            self.node_index.count_by_type(NodeType::Sink),
        )
    }

    pub(crate) fn topology_error(&self) -> Error {
        let (sources, sinks) = self.terminal_counts();
        Error::InvalidTopology { sources, sinks }
    }

    /// 节点的出边，按终点标签升序排列（标签相同时按边 ID）
    pub fn outgoing_edges(&self, node_id: NodeId) -> Vec<&Edge> {
        let mut edges: Vec<&Edge> = self
            .edge_index
            .get_outgoing(node_id)
            .iter()
            .filter_map(|id| self.edges.get(id))
            .collect();
        edges.sort_by(|a, b| {
            let la = self.nodes.get(&a.target()).map(|n| n.label());
            let lb = self.nodes.get(&b.target()).map(|n| n.label());
            la.cmp(&lb).then_with(|| a.id().cmp(&b.id()))
        });
        edges
    }

    /// 查找 from -> to 的边
    pub fn link(&self, from: NodeId, to: NodeId) -> Option<&Edge> {
        self.edge_index
            .get_edges_between(from, to)
            .first()
            .and_then(|id| self.edges.get(id))
    }

    /// 查找配对的反向边
    pub fn reverse_edge(&self, id: EdgeId) -> Result<&Edge> {
        let edge = self.try_edge(id)?;
        self.link(edge.target(), edge.source())
            .ok_or_else(|| Error::MissingReverseEdge(id.to_string()))
    }

    /// 源点的净流出量
    pub fn flow_value(&self) -> Amount {
        match self.source_node() {
            Ok(source) => self
                .edge_index
                .get_outgoing(source.id())
                .iter()
                .filter_map(|id| self.edges.get(id))
                .map(|e| e.flow())
                .sum(),
            Err(_) => 0,
        }
    }

    /// 清除所有流量、高度、盈余和高亮
    pub fn clear_flow_state(&mut self) {
        for node in self.nodes.values_mut() {
            node.clear_state();
        }
        for edge in self.edges.values_mut() {
            edge.clear_state();
        }
    }

    /// 可观察状态快照
    pub fn observable_state(&self) -> ObservableState {
        ObservableState {
            nodes: self
                .nodes
                .values()
                .map(|n| NodeState {
                    id: n.id(),
                    height: n.height(),
                    excess: n.excess(),
                    highlight: n.highlight_count(),
                })
                .collect(),
            edges: self
                .edges
                .values()
                .map(|e| EdgeState {
                    id: e.id(),
                    capacity: e.capacity(),
                    flow: e.flow(),
                    highlight: e.highlight_count(),
                })
                .collect(),
        }
    }

    // ==================== 变更入口 ====================

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(&id)
            .ok_or_else(|| Error::NodeNotFound(id.to_string()))
    }

    pub(crate) fn edge_mut(&mut self, id: EdgeId) -> Result<&mut Edge> {
        self.edges
            .get_mut(&id)
            .ok_or_else(|| Error::EdgeNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> FlowNetwork {
        let mut net = FlowNetwork::new();
        let s = net.add_node("S", NodeType::Source).unwrap();
        let c = net.add_node("C", NodeType::Default).unwrap();
        let b = net.add_node("B", NodeType::Default).unwrap();
        let t = net.add_node("T", NodeType::Sink).unwrap();
        net.add_edge(s, c, 4).unwrap();
        net.add_edge(s, b, 2).unwrap();
        net.add_edge(b, t, 3).unwrap();
        net.add_edge(c, t, 5).unwrap();
        net
    }

    #[test]
    fn test_reverse_edges_created() {
        let net = diamond();

        assert_eq!(net.node_count(), 4);
        assert_eq!(net.edge_count(), 8);

        for edge in net.edges() {
            let rev = net.reverse_edge(edge.id()).unwrap();
            assert_eq!(rev.source(), edge.target());
            assert_eq!(rev.target(), edge.source());
        }
    }

    #[test]
    fn test_add_edge_updates_existing_pair() {
        let mut net = diamond();
        let s = net.node_by_label("S").unwrap().id();
        let c = net.node_by_label("C").unwrap().id();

        // C -> S 已作为反向边存在，再次添加只更新容量
        let id = net.add_edge(c, s, 7).unwrap();
        assert_eq!(net.edge_count(), 8);
        assert_eq!(net.edge(id).unwrap().capacity(), 7);
        assert_eq!(net.reverse_edge(id).unwrap().capacity(), 4);
    }

    #[test]
    fn test_outgoing_sorted_by_target_label() {
        let net = diamond();
        let s = net.node_by_label("S").unwrap().id();

        let labels: Vec<&str> = net
            .outgoing_edges(s)
            .iter()
            .map(|e| net.node(e.target()).unwrap().label())
            .collect();
        assert_eq!(labels, vec!["B", "C"]);

        // 重复调用顺序一致
        let first: Vec<EdgeId> = net.outgoing_edges(s).iter().map(|e| e.id()).collect();
        let second: Vec<EdgeId> = net.outgoing_edges(s).iter().map(|e| e.id()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_source_and_sink() {
        let mut net = diamond();
        assert_eq!(net.source_node().unwrap().label(), "S");
        assert_eq!(net.sink_node().unwrap().label(), "T");

        let b = net.node_by_label("B").unwrap().id();
        net.set_node_type(b, NodeType::Sink).unwrap();
        assert!(matches!(
            net.sink_node(),
            Err(Error::InvalidTopology { sources: 1, sinks: 2 })
        ));
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let mut net = diamond();
        assert!(matches!(
            net.add_node("S", NodeType::Default),
            Err(Error::DuplicateLabel(_))
        ));
    }

    #[test]
    fn test_remove_edge_removes_pair() {
        let mut net = diamond();
        let s = net.node_by_label("S").unwrap().id();
        let c = net.node_by_label("C").unwrap().id();
        let id = net.link(s, c).unwrap().id();

        net.remove_edge(id).unwrap();
        assert!(net.link(s, c).is_none());
        assert!(net.link(c, s).is_none());
        assert_eq!(net.edge_count(), 6);
    }

    #[test]
    fn test_remove_node_removes_incident_edges() {
        let mut net = diamond();
        let c = net.node_by_label("C").unwrap().id();

        net.remove_node(c).unwrap();
        assert_eq!(net.node_count(), 3);
        assert_eq!(net.edge_count(), 4);
        assert!(net.node_by_label("C").is_none());
    }

    #[test]
    fn test_negative_capacity_rejected() {
        let mut net = diamond();
        let s = net.node_by_label("S").unwrap().id();
        let t = net.node_by_label("T").unwrap().id();
        assert!(matches!(
            net.add_edge(s, t, -1),
            Err(Error::InvalidCapacity(-1))
        ));
    }
}
