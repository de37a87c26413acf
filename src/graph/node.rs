//! 节点定义
//!
//! 流网络中的节点：源点、普通节点、汇点

use crate::types::{Amount, NodeType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 节点 ID（在一个网络内稳定且唯一）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl NodeId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// 节点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// 节点 ID
    id: NodeId,
    /// 显示标签
    label: String,
    /// 节点类型
    node_type: NodeType,
    /// 高度（仅 Push-Relabel 使用）
    height: Amount,
    /// 盈余（仅 Push-Relabel 使用）
    excess: Amount,
    /// 高亮计数，可为负，大于 0 时视为高亮
    highlight: i32,
}

impl Node {
    /// 创建新节点
    pub fn new(id: NodeId, label: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            id,
            label: label.into(),
            node_type,
            height: 0,
            excess: 0,
            highlight: 0,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    pub fn height(&self) -> Amount {
        self.height
    }

    pub fn excess(&self) -> Amount {
        self.excess
    }

    /// 是否处于高亮状态
    pub fn is_highlighted(&self) -> bool {
        self.highlight > 0
    }

    /// 高亮嵌套计数
    pub fn highlight_count(&self) -> i32 {
        self.highlight
    }

    pub fn is_source(&self) -> bool {
        self.node_type == NodeType::Source
    }

    pub fn is_sink(&self) -> bool {
        self.node_type == NodeType::Sink
    }

    pub(crate) fn set_label(&mut self, label: String) {
        self.label = label;
    }

    pub(crate) fn set_node_type(&mut self, node_type: NodeType) {
        self.node_type = node_type;
    }

    pub(crate) fn add_height(&mut self, delta: Amount) {
        self.height += delta;
    }

    pub(crate) fn add_excess(&mut self, delta: Amount) {
        self.excess += delta;
    }

    pub(crate) fn highlight(&mut self) {
        self.highlight += 1;
    }

    pub(crate) fn unhighlight(&mut self) {
        self.highlight -= 1;
    }

    /// 清除算法状态（高度、盈余、高亮）
    pub(crate) fn clear_state(&mut self) {
        self.height = 0;
        self.excess = 0;
        self.highlight = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_defaults() {
        let n = Node::new(NodeId::new(1), "A", NodeType::Source);

        assert_eq!(n.id().as_u64(), 1);
        assert_eq!(n.label(), "A");
        assert!(n.is_source());
        assert_eq!(n.height(), 0);
        assert_eq!(n.excess(), 0);
        assert!(!n.is_highlighted());
    }

    #[test]
    fn test_node_highlight_nesting() {
        let mut n = Node::new(NodeId::new(1), "B", NodeType::Default);
        n.highlight();
        n.highlight();
        n.unhighlight();
        assert!(n.is_highlighted());
        n.unhighlight();
        assert!(!n.is_highlighted());

        // 计数可降到 0 以下，再次高亮后回到 0
        n.unhighlight();
        assert_eq!(n.highlight_count(), -1);
        assert!(!n.is_highlighted());
        n.highlight();
        assert_eq!(n.highlight_count(), 0);
    }
}
