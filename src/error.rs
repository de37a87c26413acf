//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("节点不存在: {0}")]
    NodeNotFound(String),

    #[error("边不存在: {0}")]
    EdgeNotFound(String),

    #[error("缺少反向边: {0}")]
    MissingReverseEdge(String),

    #[error("节点标签已存在: {0}")]
    DuplicateLabel(String),

    #[error("无效的节点类型: {0}")]
    InvalidNodeType(String),

    #[error("无效的容量: {0}")]
    InvalidCapacity(i64),

    #[error("图必须恰好包含一个源点和一个汇点 (源点 {sources} 个, 汇点 {sinks} 个)")]
    InvalidTopology { sources: usize, sinks: usize },

    #[error("未知算法: {0}")]
    UnknownAlgorithm(String),

    #[error("解析错误: {0}")]
    ParseError(String),

    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl Error {
    /// 是否为拓扑校验失败（需要强制重置）
    pub fn is_invalid_topology(&self) -> bool {
        matches!(self, Error::InvalidTopology { .. })
    }
}
