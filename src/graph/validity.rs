//! 网络合法性校验
//!
//! 每次执行算法步骤之前调用

use super::network::FlowNetwork;
use crate::error::{Error, Result};
use tracing::warn;

/// 校验网络恰好包含一个源点和一个汇点，且每条边都有配对的反向边
pub fn assert_valid_network(network: &FlowNetwork) -> Result<()> {
    let (sources, sinks) = network.terminal_counts();
    if sources != 1 || sinks != 1 {
        warn!(sources, sinks, "网络拓扑不合法");
        return Err(Error::InvalidTopology { sources, sinks });
    }

    for edge in network.edges() {
        if network.link(edge.target(), edge.source()).is_none() {
            warn!(edge = %edge.id(), "缺少反向边");
            return Err(Error::MissingReverseEdge(edge.id().to_string()));
        }
    }

    Ok(())
}

/// 网络是否合法
pub fn is_valid_network(network: &FlowNetwork) -> bool {
    assert_valid_network(network).is_ok()
}
