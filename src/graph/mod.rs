//! 图核心模块
//!
//! 定义节点、边和流网络的核心数据结构

mod edge;
mod index;
mod network;
mod node;
mod validity;

pub use edge::{Edge, EdgeId};
pub use index::{EdgeIndex, NodeIndex, ParallelEdges};
pub use network::{EdgeState, FlowNetwork, NodeState, ObservableState, SharedNetwork};
pub use node::{Node, NodeId};
pub use validity::{assert_valid_network, is_valid_network};
