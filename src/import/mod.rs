//! 网络导入导出模块
//!
//! 网络文件为 JSON 文档：
//!
//! ```json
//! {
//!   "nodes": [{"label": "A", "type": "source"}, {"label": "B", "type": "sink"}],
//!   "edges": [{"source": "A", "target": "B", "capacity": 3}]
//! }
//! ```
//!
//! 反向边在加载时自动补全，不需要写入文件。

pub mod samples;

use crate::error::{Error, Result};
use crate::graph::FlowNetwork;
use crate::types::{Amount, NodeType};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// 节点记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub label: String,
    #[serde(rename = "type", default)]
    pub node_type: NodeType,
}

/// 边记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    pub capacity: Amount,
}

/// 网络文件文档
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDocument {
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

impl NetworkDocument {
    /// 从网络生成文档
    ///
    /// 只写出容量为正的边；两个方向容量都为 0 的边对保留 ID 较小的一条。
    pub fn from_network(network: &FlowNetwork) -> Self {
        let nodes = network
            .nodes()
            .map(|n| NodeRecord {
                label: n.label().to_string(),
                node_type: n.node_type(),
            })
            .collect();

        let label_of = |id| {
            network
                .node(id)
                .map(|n| n.label().to_string())
                .unwrap_or_default()
        };

        let edges = network
            .edges()
            .filter(|e| {
                if e.capacity() > 0 {
                    return true;
                }
                match network.reverse_edge(e.id()) {
                    Ok(reverse) => reverse.capacity() == 0 && e.id() < reverse.id(),
                    Err(_) => true,
                }
            })
            .map(|e| EdgeRecord {
                source: label_of(e.source()),
                target: label_of(e.target()),
                capacity: e.capacity(),
            })
            .collect();

        Self { nodes, edges }
    }

    /// 构建网络
    pub fn into_network(self) -> Result<FlowNetwork> {
        let mut network = FlowNetwork::new();
        for node in self.nodes {
            network.add_node(node.label, node.node_type)?;
        }
        for edge in self.edges {
            let from = network
                .node_by_label(&edge.source)
                .ok_or_else(|| Error::NodeNotFound(edge.source.clone()))?
                .id();
            let to = network
                .node_by_label(&edge.target)
                .ok_or_else(|| Error::NodeNotFound(edge.target.clone()))?
                .id();
            network.add_edge(from, to, edge.capacity)?;
        }
        Ok(network)
    }
}

/// 网络文件加载器
pub struct NetworkLoader;

impl NetworkLoader {
    /// 从 JSON 文件加载
    pub fn load<P: AsRef<Path>>(path: P) -> Result<FlowNetwork> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let document: NetworkDocument = serde_json::from_reader(reader)?;
        let network = document.into_network()?;
        info!(
            path = %path.display(),
            nodes = network.node_count(),
            edges = network.edge_count(),
            "已加载网络"
        );
        Ok(network)
    }

    /// 保存为 JSON 文件
    pub fn save<P: AsRef<Path>>(network: &FlowNetwork, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, &NetworkDocument::from_network(network))?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        info!(path = %path.display(), "已保存网络");
        Ok(())
    }

    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<FlowNetwork> {
        let document: NetworkDocument = serde_json::from_str(json)?;
        document.into_network()
    }

    /// 序列化为 JSON 字符串
    pub fn to_json(network: &FlowNetwork) -> Result<String> {
        Ok(serde_json::to_string_pretty(&NetworkDocument::from_network(network))?)
    }
}

/// 从 JSON 文件加载网络
pub fn load_network<P: AsRef<Path>>(path: P) -> Result<FlowNetwork> {
    NetworkLoader::load(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{
                "nodes": [
                    {{"label": "s", "type": "source"}},
                    {{"label": "m"}},
                    {{"label": "t", "type": "sink"}}
                ],
                "edges": [
                    {{"source": "s", "target": "m", "capacity": 4}},
                    {{"source": "m", "target": "t", "capacity": 2}}
                ]
            }}"#
        )
        .unwrap();

        let network = NetworkLoader::load(file.path()).unwrap();
        assert_eq!(network.node_count(), 3);
        // 每条边自动补一条反向边
        assert_eq!(network.edge_count(), 4);
        assert_eq!(network.node_by_label("m").unwrap().node_type(), NodeType::Default);
        assert_eq!(network.source_node().unwrap().label(), "s");
    }

    #[test]
    fn test_save_then_load_preserves_structure() {
        let original = samples::default_network().unwrap();
        let file = NamedTempFile::new().unwrap();

        NetworkLoader::save(&original, file.path()).unwrap();
        let restored = NetworkLoader::load(file.path()).unwrap();

        assert_eq!(
            NetworkDocument::from_network(&restored),
            NetworkDocument::from_network(&original)
        );
        assert_eq!(restored.edge_count(), original.edge_count());
    }

    #[test]
    fn test_document_skips_reverse_edges() {
        let network = samples::three_node_network().unwrap();
        let document = NetworkDocument::from_network(&network);

        assert_eq!(document.edges.len(), 2);
        assert!(document.edges.iter().all(|e| e.capacity > 0));
    }

    #[test]
    fn test_zero_capacity_pair_is_kept_once() {
        let json = r#"{"nodes":[{"label":"a","type":"source"},{"label":"b","type":"sink"}],
                       "edges":[{"source":"a","target":"b","capacity":0}]}"#;
        let network = NetworkLoader::from_json(json).unwrap();
        let document = NetworkDocument::from_network(&network);

        assert_eq!(document.edges.len(), 1);
        assert_eq!(document.edges[0].source, "a");
    }

    #[test]
    fn test_unknown_edge_endpoint() {
        let json = r#"{"nodes":[{"label":"a"}],"edges":[{"source":"a","target":"z","capacity":1}]}"#;
        let err = NetworkLoader::from_json(json).unwrap_err();
        assert!(matches!(err, Error::NodeNotFound(label) if label == "z"));
    }

    #[test]
    fn test_invalid_documents() {
        assert!(matches!(
            NetworkLoader::from_json("{not json"),
            Err(Error::SerializationError(_))
        ));

        let negative = r#"{"nodes":[{"label":"a"},{"label":"b"}],
                           "edges":[{"source":"a","target":"b","capacity":-1}]}"#;
        assert!(matches!(
            NetworkLoader::from_json(negative),
            Err(Error::InvalidCapacity(-1))
        ));

        let duplicate = r#"{"nodes":[{"label":"a"},{"label":"a"}]}"#;
        assert!(matches!(
            NetworkLoader::from_json(duplicate),
            Err(Error::DuplicateLabel(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = load_network("/nonexistent/flowstep/network.json").unwrap_err();
        assert!(matches!(err, Error::IoError(_)));
    }
}
