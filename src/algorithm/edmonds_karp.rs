//! Edmonds-Karp 最大流算法
//!
//! 基于 BFS 的 Ford-Fulkerson：前沿为队列，每轮找到最短增广路径

use super::augmenting_path::{AugmentingPathDriver, Discipline};
use super::{AlgorithmDriver, AlgorithmKind, AlgorithmStepResult};
use crate::error::Result;
use crate::graph::SharedNetwork;
use crate::types::Amount;

/// Edmonds-Karp 驱动
pub struct EdmondsKarp {
    inner: AugmentingPathDriver,
}

impl EdmondsKarp {
    /// 创建绑定到网络的驱动
    pub fn new(network: SharedNetwork) -> Self {
        Self {
            inner: AugmentingPathDriver::new(AlgorithmKind::EdmondsKarp, Discipline::Fifo, network),
        }
    }

    /// 目前为止累计的流量
    pub fn flow(&self) -> Amount {
        self.inner.flow()
    }
}

impl AlgorithmDriver for EdmondsKarp {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::EdmondsKarp
    }

    fn next_step(&mut self) -> Result<Option<AlgorithmStepResult>> {
        self.inner.next_step()
    }

    fn is_exhausted(&self) -> bool {
        self.inner.is_exhausted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::augmenting_lines;
    use crate::algorithm::test_support::{edge_flow, run_to_completion, scenario_one, scenario_two};
    use crate::error::Error;
    use crate::types::NodeType;

    #[test]
    fn test_three_node_network() {
        let network = scenario_one();
        let steps = run_to_completion(AlgorithmKind::EdmondsKarp, &network);

        let net = network.read();
        assert_eq!(steps.last().unwrap().flow_value, Some(5));
        assert_eq!(edge_flow(&net, "A", "B"), 5);
        assert_eq!(edge_flow(&net, "B", "C"), 5);
        assert_eq!(edge_flow(&net, "B", "A"), -5);
        assert_eq!(edge_flow(&net, "C", "B"), -5);
        assert_eq!(steps.len(), 17);
    }

    #[test]
    fn test_first_steps_trace() {
        let network = scenario_one();
        let steps = run_to_completion(AlgorithmKind::EdmondsKarp, &network);
        let net = network.read();
        let a = net.node_by_label("A").unwrap().id();
        let b = net.node_by_label("B").unwrap().id();

        // 第一步：队列中只有源点
        assert_eq!(steps[0].highlighted_lines.as_slice(), augmenting_lines::INIT_SEARCH);
        assert_eq!(steps[0].linear_nodes, vec![a]);
        assert!(steps[0].mutations.is_empty());

        // 第二步：源点出队
        assert_eq!(steps[1].highlighted_lines.as_slice(), augmenting_lines::POP);
        assert!(steps[1].linear_nodes.is_empty());

        // 第三步：A -> B 被接受，B 入队
        assert_eq!(steps[2].highlighted_lines.as_slice(), augmenting_lines::RECORD_PRED);
        assert_eq!(steps[2].linear_nodes, vec![b]);
    }

    #[test]
    fn test_default_network_flow() {
        let network = scenario_two();
        let steps = run_to_completion(AlgorithmKind::EdmondsKarp, &network);

        assert_eq!(steps.last().unwrap().flow_value, Some(5));
        assert_eq!(network.read().flow_value(), 5);
    }

    #[test]
    fn test_highlights_cleared_at_finish() {
        let network = scenario_two();
        run_to_completion(AlgorithmKind::EdmondsKarp, &network);

        let net = network.read();
        assert!(net.nodes().all(|n| !n.is_highlighted()));
        assert!(net.edges().all(|e| !e.is_highlighted()));
    }

    #[test]
    fn test_no_path_finishes_immediately_after_search() {
        let mut net = crate::graph::FlowNetwork::new();
        net.add_node("A", NodeType::Source).unwrap();
        net.add_node("B", NodeType::Sink).unwrap();
        let network = net.into_shared();

        let steps = run_to_completion(AlgorithmKind::EdmondsKarp, &network);
        // 初始化、源点出队、终止
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[2].flow_value, Some(0));
    }

    #[test]
    fn test_invalid_topology_is_error() {
        let mut net = crate::graph::FlowNetwork::new();
        net.add_node("A", NodeType::Default).unwrap();
        let mut driver = EdmondsKarp::new(net.into_shared());

        assert!(matches!(
            driver.next_step(),
            Err(Error::InvalidTopology { .. })
        ));
    }
}
