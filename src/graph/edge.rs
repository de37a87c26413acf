//! 边定义
//!
//! 每条边 (u, v) 都有一条配对的反向边 (v, u)，容量可以为 0

use crate::graph::node::NodeId;
use crate::types::Amount;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 边 ID（在一个网络内稳定且唯一）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub u64);

impl EdgeId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for EdgeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// 边
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// 边 ID
    id: EdgeId,
    /// 起点
    source: NodeId,
    /// 终点
    target: NodeId,
    /// 容量
    capacity: Amount,
    /// 当前流量（可为负，对应反向边上的正向流量）
    flow: Amount,
    /// 高亮计数
    highlight: i32,
}

impl Edge {
    /// 创建新边
    pub fn new(id: EdgeId, source: NodeId, target: NodeId, capacity: Amount) -> Self {
        Self {
            id,
            source,
            target,
            capacity,
            flow: 0,
            highlight: 0,
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn capacity(&self) -> Amount {
        self.capacity
    }

    pub fn flow(&self) -> Amount {
        self.flow
    }

    /// 残余容量 = 容量 - 流量
    pub fn residual(&self) -> Amount {
        self.capacity - self.flow
    }

    /// 是否还能被增广路径经过
    pub fn has_residual(&self) -> bool {
        self.residual() > 0
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlight > 0
    }

    pub fn highlight_count(&self) -> i32 {
        self.highlight
    }

    pub(crate) fn set_capacity(&mut self, capacity: Amount) {
        self.capacity = capacity;
    }

    pub(crate) fn add_flow(&mut self, delta: Amount) {
        self.flow += delta;
    }

    pub(crate) fn highlight(&mut self) {
        self.highlight += 1;
    }

    pub(crate) fn unhighlight(&mut self) {
        self.highlight -= 1;
    }

    pub(crate) fn clear_state(&mut self) {
        self.flow = 0;
        self.highlight = 0;
    }
}
