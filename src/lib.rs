//! flowstep - 可逆的最大流算法单步执行引擎
//!
//! 把最大流算法拆成可单步执行的状态机，每一步产生一组可逆的图变更：
//! - Edmonds-Karp、深度优先 Ford-Fulkerson、通用 Push-Relabel
//! - 前进、后退、重置、跳到末尾和定时自动播放
//! - 伪代码行高亮与队列 / 栈视图
//! - JSON 网络文件导入导出

pub mod algorithm;
pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod import;
pub mod mutation;
pub mod stepper;
pub mod types;

// 重导出常用类型
pub use algorithm::{AlgorithmDriver, AlgorithmKind, AlgorithmStepResult};
pub use config::PlaybackConfig;
pub use error::{Error, Result};
pub use graph::{Edge, EdgeId, FlowNetwork, Node, NodeId, SharedNetwork};
pub use mutation::{Element, GraphMutation};
pub use stepper::{PlaybackState, Stepper};
pub use types::{Amount, HighlightMode, LineNumber, LinearStructure, NodeType};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
