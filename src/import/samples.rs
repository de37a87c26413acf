//! 内置示例网络

use super::{EdgeRecord, NetworkDocument, NodeRecord};
use crate::error::Result;
use crate::graph::FlowNetwork;
use crate::types::{Amount, NodeType};

fn document(nodes: &[(&str, NodeType)], edges: &[(&str, &str, Amount)]) -> NetworkDocument {
    NetworkDocument {
        nodes: nodes
            .iter()
            .map(|(label, node_type)| NodeRecord {
                label: label.to_string(),
                node_type: *node_type,
            })
            .collect(),
        edges: edges
            .iter()
            .map(|(source, target, capacity)| EdgeRecord {
                source: source.to_string(),
                target: target.to_string(),
                capacity: *capacity,
            })
            .collect(),
    }
}

/// 默认的 7 节点网络（A 为源点，G 为汇点，最大流 5）
pub fn default_network() -> Result<FlowNetwork> {
    document(
        &[
            ("A", NodeType::Source),
            ("B", NodeType::Default),
            ("C", NodeType::Default),
            ("D", NodeType::Default),
            ("E", NodeType::Default),
            ("F", NodeType::Default),
            ("G", NodeType::Sink),
        ],
        &[
            ("A", "B", 3),
            ("A", "D", 3),
            ("B", "C", 4),
            ("C", "A", 3),
            ("C", "D", 1),
            ("C", "E", 2),
            ("D", "E", 2),
            ("D", "F", 6),
            ("E", "B", 1),
            ("E", "G", 1),
            ("F", "G", 9),
        ],
    )
    .into_network()
}

/// 3 节点链 A -> B -> C（最大流 5）
pub fn three_node_network() -> Result<FlowNetwork> {
    document(
        &[
            ("A", NodeType::Source),
            ("B", NodeType::Default),
            ("C", NodeType::Sink),
        ],
        &[("A", "B", 10), ("B", "A", 0), ("B", "C", 5), ("C", "B", 0)],
    )
    .into_network()
}
