//! Ford-Fulkerson 最大流算法（深度优先）
//!
//! 与 Edmonds-Karp 结构相同，前沿为栈

use super::augmenting_path::{AugmentingPathDriver, Discipline};
use super::{AlgorithmDriver, AlgorithmKind, AlgorithmStepResult};
use crate::error::Result;
use crate::graph::SharedNetwork;
use crate::types::Amount;

/// Ford-Fulkerson 驱动
pub struct FordFulkerson {
    inner: AugmentingPathDriver,
}

impl FordFulkerson {
    pub fn new(network: SharedNetwork) -> Self {
        Self {
            inner: AugmentingPathDriver::new(
                AlgorithmKind::FordFulkerson,
                Discipline::Lifo,
                network,
            ),
        }
    }

    pub fn flow(&self) -> Amount {
        self.inner.flow()
    }
}

impl AlgorithmDriver for FordFulkerson {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::FordFulkerson
    }

    fn next_step(&mut self) -> Result<Option<AlgorithmStepResult>> {
        self.inner.next_step()
    }

    fn is_exhausted(&self) -> bool {
        self.inner.is_exhausted()
    }
}
