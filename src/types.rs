//! 流网络通用类型定义

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 容量 / 流量 / 高度 / 盈余统一使用的数值类型
pub type Amount = i64;

/// 伪代码行号（从 1 开始）
pub type LineNumber = u32;

/// 节点类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// 源点
    Source,
    /// 普通节点
    #[default]
    Default,
    /// 汇点
    Sink,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Source => "source",
            NodeType::Default => "default",
            NodeType::Sink => "sink",
        }
    }

    /// 是否为源点或汇点
    pub fn is_terminal(&self) -> bool {
        !matches!(self, NodeType::Default)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NodeType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "source" => Ok(NodeType::Source),
            "default" | "" => Ok(NodeType::Default),
            "sink" => Ok(NodeType::Sink),
            other => Err(crate::Error::InvalidNodeType(other.to_string())),
        }
    }
}

/// 高亮操作模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightMode {
    Add,
    Remove,
}

impl HighlightMode {
    /// 取反
    pub fn flipped(self) -> Self {
        match self {
            HighlightMode::Add => HighlightMode::Remove,
            HighlightMode::Remove => HighlightMode::Add,
        }
    }
}

/// 线性数据结构类型（算法使用的前沿容器）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinearStructure {
    /// 队列（先进先出）
    Queue,
    /// 栈（后进先出）
    Stack,
    /// 不使用
    None,
}

impl fmt::Display for LinearStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LinearStructure::Queue => "queue",
            LinearStructure::Stack => "stack",
            LinearStructure::None => "none",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_type_parsing() {
        assert_eq!("source".parse::<NodeType>().unwrap(), NodeType::Source);
        assert_eq!("SINK".parse::<NodeType>().unwrap(), NodeType::Sink);
        assert_eq!("".parse::<NodeType>().unwrap(), NodeType::Default);
        assert!("pump".parse::<NodeType>().is_err());
    }

    #[test]
    fn test_highlight_flip() {
        assert_eq!(HighlightMode::Add.flipped(), HighlightMode::Remove);
        assert_eq!(HighlightMode::Add.flipped().flipped(), HighlightMode::Add);
    }
}
