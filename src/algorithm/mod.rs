//! 最大流算法驱动模块
//!
//! 每个驱动都是绑定到一个网络的可恢复状态机：每次调用 `next_step`
//! 只产生一个步骤结果然后挂起，从不提前运行。

mod augmenting_path;
mod edmonds_karp;
mod ford_fulkerson;
mod pseudocode;
mod push_relabel;

pub use augmenting_path::{AugmentingPathDriver, Discipline};
pub use edmonds_karp::EdmondsKarp;
pub use ford_fulkerson::FordFulkerson;
pub use pseudocode::{augmenting_lines, push_relabel_lines, LabeledBlock};
pub use push_relabel::PushRelabel;

use crate::error::{Error, Result};
use crate::graph::{NodeId, SharedNetwork};
use crate::mutation::GraphMutation;
use crate::types::{Amount, LineNumber, LinearStructure};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// 单个算法步骤的结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmStepResult {
    /// 需要高亮的伪代码行（从 1 开始，可为空）
    pub highlighted_lines: SmallVec<[LineNumber; 6]>,
    /// 当前队列 / 栈内容
    pub linear_nodes: Vec<NodeId>,
    /// 本步骤对网络的变更（按记录顺序应用）
    pub mutations: Vec<GraphMutation>,
    /// 是否为终止步骤
    pub done: bool,
    /// 终止步骤携带的最大流值
    pub flow_value: Option<Amount>,
}

impl AlgorithmStepResult {
    /// 缓冲区开头的空初始条目
    pub fn initial() -> Self {
        Self::default()
    }

    pub fn new(lines: &[LineNumber], linear_nodes: Vec<NodeId>, mutations: Vec<GraphMutation>) -> Self {
        Self {
            highlighted_lines: SmallVec::from_slice(lines),
            linear_nodes,
            mutations,
            done: false,
            flow_value: None,
        }
    }

    /// 标记为终止步骤
    pub fn finished(mut self, flow_value: Amount) -> Self {
        self.done = true;
        self.flow_value = Some(flow_value);
        self
    }
}

/// 算法驱动
pub trait AlgorithmDriver: Send {
    /// 驱动对应的算法
    fn kind(&self) -> AlgorithmKind;

    /// 推进一步
    ///
    /// 返回 `Ok(None)` 表示驱动已在之前产生过终止步骤。
    fn next_step(&mut self) -> Result<Option<AlgorithmStepResult>>;

    /// 是否已产生终止步骤
    fn is_exhausted(&self) -> bool;
}

/// 可用的算法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlgorithmKind {
    #[default]
    EdmondsKarp,
    FordFulkerson,
    PushRelabel,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 3] = [
        AlgorithmKind::EdmondsKarp,
        AlgorithmKind::FordFulkerson,
        AlgorithmKind::PushRelabel,
    ];

    /// 稳定名称（可解析）
    pub fn name(&self) -> &'static str {
        match self {
            AlgorithmKind::EdmondsKarp => "edmonds-karp",
            AlgorithmKind::FordFulkerson => "ford-fulkerson",
            AlgorithmKind::PushRelabel => "push-relabel",
        }
    }

    /// 显示名称
    pub fn label(&self) -> &'static str {
        match self {
            AlgorithmKind::EdmondsKarp => "Edmonds-Karp",
            AlgorithmKind::FordFulkerson => "Ford-Fulkerson (depth-first)",
            AlgorithmKind::PushRelabel => "Push-Relabel (generic)",
        }
    }

    /// 算法使用的线性数据结构
    pub fn linear_structure(&self) -> LinearStructure {
        match self {
            AlgorithmKind::EdmondsKarp => LinearStructure::Queue,
            AlgorithmKind::FordFulkerson => LinearStructure::Stack,
            AlgorithmKind::PushRelabel => LinearStructure::None,
        }
    }

    /// 伪代码清单（以源点和汇点标签参数化）
    pub fn pseudocode(&self, source: &str, sink: &str) -> Vec<String> {
        match self {
            AlgorithmKind::EdmondsKarp => {
                pseudocode::augmenting_path_listing("Edmonds-Karp", false, source, sink)
            }
            AlgorithmKind::FordFulkerson => {
                pseudocode::augmenting_path_listing("Ford-Fulkerson", true, source, sink)
            }
            AlgorithmKind::PushRelabel => pseudocode::push_relabel_listing(source, sink),
        }
    }

    /// 伪代码中带标签的行区间
    pub fn labeled_blocks(&self) -> &'static [LabeledBlock] {
        match self {
            AlgorithmKind::EdmondsKarp => pseudocode::augmenting_path_blocks(false),
            AlgorithmKind::FordFulkerson => pseudocode::augmenting_path_blocks(true),
            AlgorithmKind::PushRelabel => pseudocode::push_relabel_blocks(),
        }
    }

    /// 创建绑定到网络的新驱动
    pub fn create_driver(&self, network: SharedNetwork) -> Box<dyn AlgorithmDriver> {
        match self {
            AlgorithmKind::EdmondsKarp => Box::new(EdmondsKarp::new(network)),
            AlgorithmKind::FordFulkerson => Box::new(FordFulkerson::new(network)),
            AlgorithmKind::PushRelabel => Box::new(PushRelabel::new(network)),
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for AlgorithmKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == '_' || c == ' ' || c == '–' { '-' } else { c })
            .collect();
        match normalized.as_str() {
            "edmonds-karp" | "ek" | "bfs" => Ok(AlgorithmKind::EdmondsKarp),
            "ford-fulkerson" | "ford-fulkerson-depth-first" | "ff" | "dfs" => {
                Ok(AlgorithmKind::FordFulkerson)
            }
            "push-relabel" | "pr" => Ok(AlgorithmKind::PushRelabel),
            _ => Err(Error::UnknownAlgorithm(s.to_string())),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::graph::FlowNetwork;
    use crate::import::samples;

    /// 不经过控制器直接运行驱动：每步立即应用变更
    pub fn run_to_completion(
        kind: AlgorithmKind,
        network: &SharedNetwork,
    ) -> Vec<AlgorithmStepResult> {
        let mut driver = kind.create_driver(network.clone());
        let mut steps = Vec::new();
        while let Some(step) = driver.next_step().unwrap() {
            crate::mutation::apply_all(&step.mutations, &mut network.write()).unwrap();
            let done = step.done;
            steps.push(step);
            if done {
                break;
            }
            assert!(steps.len() < 10_000, "driver did not terminate");
        }
        assert!(driver.is_exhausted());
        steps
    }

    pub fn scenario_two() -> SharedNetwork {
        samples::default_network().unwrap().into_shared()
    }

    pub fn scenario_one() -> SharedNetwork {
        samples::three_node_network().unwrap().into_shared()
    }

    pub fn edge_flow(network: &FlowNetwork, from: &str, to: &str) -> Amount {
        let from = network.node_by_label(from).unwrap().id();
        let to = network.node_by_label(to).unwrap().id();
        network.link(from, to).unwrap().flow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_kind_parsing() {
        assert_eq!(
            "Edmonds-Karp".parse::<AlgorithmKind>().unwrap(),
            AlgorithmKind::EdmondsKarp
        );
        assert_eq!(
            "Ford–Fulkerson-Depth-First".parse::<AlgorithmKind>().unwrap(),
            AlgorithmKind::FordFulkerson
        );
        assert_eq!(
            "push_relabel".parse::<AlgorithmKind>().unwrap(),
            AlgorithmKind::PushRelabel
        );
        assert!("dinic".parse::<AlgorithmKind>().is_err());

        for kind in AlgorithmKind::ALL {
            assert_eq!(kind.name().parse::<AlgorithmKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_linear_structures() {
        assert_eq!(AlgorithmKind::EdmondsKarp.linear_structure(), LinearStructure::Queue);
        assert_eq!(AlgorithmKind::FordFulkerson.linear_structure(), LinearStructure::Stack);
        assert_eq!(AlgorithmKind::PushRelabel.linear_structure(), LinearStructure::None);
    }

    #[test]
    fn test_all_algorithms_agree_on_default_network() {
        for kind in AlgorithmKind::ALL {
            let network = test_support::scenario_two();
            let steps = test_support::run_to_completion(kind, &network);
            let last = steps.last().unwrap();

            assert!(last.done);
            assert_eq!(last.flow_value, Some(5), "{} flow value", kind);
            assert_eq!(network.read().flow_value(), 5, "{} net flow", kind);
        }
    }

    #[test]
    fn test_step_result_serialization() {
        let step = AlgorithmStepResult::new(&[4, 5], vec![NodeId::new(1)], vec![]).finished(3);
        let json = serde_json::to_string(&step).unwrap();
        let restored: AlgorithmStepResult = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, step);
    }
}
