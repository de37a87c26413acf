//! 步进控制器
//!
//! 持有当前驱动和步骤缓冲区，负责前进（必要时从驱动拉取新步骤，
//! 否则重放缓冲的步骤）、后退、重置和跳到末尾。

use super::buffer::StepBuffer;
use super::PlaybackState;
use crate::algorithm::{AlgorithmDriver, AlgorithmKind, AlgorithmStepResult};
use crate::error::Result;
use crate::graph::{assert_valid_network, FlowNetwork, NodeId, SharedNetwork};
use crate::mutation::{apply_all, undo_all};
use crate::types::{Amount, LineNumber};
use tracing::{debug, info, warn};

/// 步进控制器
pub struct Stepper {
    network: SharedNetwork,
    algorithm: Option<AlgorithmKind>,
    driver: Option<Box<dyn AlgorithmDriver>>,
    buffer: StepBuffer,
    state: PlaybackState,
}

impl Stepper {
    /// 创建未绑定算法的控制器
    pub fn new(network: SharedNetwork) -> Self {
        Self {
            network,
            algorithm: None,
            driver: None,
            buffer: StepBuffer::new(),
            state: PlaybackState::Stopped,
        }
    }

    /// 创建并绑定算法
    pub fn with_algorithm(network: SharedNetwork, kind: AlgorithmKind) -> Self {
        let mut stepper = Self::new(network);
        stepper.set_algorithm(kind);
        stepper
    }

    // ==================== 访问器 ====================

    pub fn network(&self) -> &SharedNetwork {
        &self.network
    }

    pub fn algorithm(&self) -> Option<AlgorithmKind> {
        self.algorithm
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn cursor(&self) -> usize {
        self.buffer.cursor()
    }

    pub fn buffer(&self) -> &StepBuffer {
        &self.buffer
    }

    /// 游标处的步骤结果
    pub fn current_step(&self) -> &AlgorithmStepResult {
        self.buffer.current()
    }

    /// 当前高亮的伪代码行
    pub fn highlighted_lines(&self) -> &[LineNumber] {
        &self.buffer.current().highlighted_lines
    }

    /// 当前队列 / 栈内容
    pub fn linear_nodes(&self) -> &[NodeId] {
        &self.buffer.current().linear_nodes
    }

    pub fn is_finished(&self) -> bool {
        self.state == PlaybackState::Finished
    }

    /// 位于终止步骤时的最大流值
    pub fn flow_value(&self) -> Option<Amount> {
        self.buffer.current().flow_value
    }

    // ==================== 绑定 ====================

    /// 切换算法：先重置，再绑定新驱动
    pub fn set_algorithm(&mut self, kind: AlgorithmKind) {
        self.reset();
        self.algorithm = Some(kind);
        self.driver = Some(kind.create_driver(self.network.clone()));
        info!(algorithm = %kind, "已绑定算法");
    }

    /// 解除算法绑定
    pub fn clear_algorithm(&mut self) {
        self.reset();
        self.algorithm = None;
        self.driver = None;
    }

    /// 替换网络内容：先在旧网络上重置，再换入新网络
    pub fn replace_network(&mut self, network: FlowNetwork) {
        self.reset();
        *self.network.write() = network;
        if let Some(kind) = self.algorithm {
            self.driver = Some(kind.create_driver(self.network.clone()));
        }
        info!("已替换网络");
    }

    // ==================== 步进 ====================

    /// 拓扑校验，不合法时强制重置
    fn ensure_valid(&mut self) -> Result<()> {
        let checked = assert_valid_network(&self.network.read());
        if let Err(e) = checked {
            warn!(error = %e, "网络不合法，强制重置");
            self.reset();
            return Err(e);
        }
        Ok(())
    }

    /// 前进一步
    ///
    /// 返回是否前进。未绑定驱动或已到达终止步骤时不做任何事。
    pub fn step_forward(&mut self) -> Result<bool> {
        if self.driver.is_none() {
            return Ok(false);
        }
        self.ensure_valid()?;

        if !self.buffer.at_end() {
            // 重放已缓冲的步骤
            if let Some(result) = self.buffer.next() {
                apply_all(&result.mutations, &mut self.network.write())?;
            }
            self.buffer.advance();
            debug!(cursor = self.buffer.cursor(), "重放步骤");
            self.after_forward();
            return Ok(true);
        }

        if self.buffer.is_complete() {
            self.state = PlaybackState::Finished;
            return Ok(false);
        }

        let Some(driver) = self.driver.as_mut() else {
            return Ok(false);
        };
        let Some(result) = driver.next_step()? else {
            self.state = PlaybackState::Finished;
            return Ok(false);
        };

        apply_all(&result.mutations, &mut self.network.write())?;
        if let Some(flow) = result.flow_value {
            info!(algorithm = %driver.kind(), flow, "算法结束");
        }
        self.buffer.push(result);
        debug!(cursor = self.buffer.cursor(), "新步骤");
        self.after_forward();
        Ok(true)
    }

    fn after_forward(&mut self) {
        if self.buffer.current().done {
            self.state = PlaybackState::Finished;
        } else if self.state != PlaybackState::Auto {
            self.state = PlaybackState::Manual;
        }
    }

    /// 后退一步
    ///
    /// 游标为 0 时不做任何事，返回 false。
    pub fn step_backward(&mut self) -> Result<bool> {
        if self.buffer.cursor() == 0 {
            return Ok(false);
        }
        self.ensure_valid()?;

        undo_all(&self.buffer.current().mutations, &mut self.network.write())?;
        self.buffer.retreat();
        debug!(cursor = self.buffer.cursor(), "后退");
        if self.state != PlaybackState::Auto {
            self.state = PlaybackState::Manual;
        }
        Ok(true)
    }

    /// 跳到终止步骤，返回前进的步数
    pub fn jump_to_end(&mut self) -> Result<usize> {
        let mut steps = 0;
        while self.step_forward()? {
            steps += 1;
            if self.is_finished() {
                break;
            }
        }
        Ok(steps)
    }

    /// 重置
    ///
    /// 倒序撤销所有已应用的结果，清空缓冲区并创建新驱动。
    /// 撤销失败（网络结构在运行中被修改）时直接清空网络的流状态。
    pub fn reset(&mut self) {
        if self.buffer.cursor() > 0 {
            let undone = {
                let mut network = self.network.write();
                self.buffer
                    .applied()
                    .iter()
                    .rev()
                    .try_for_each(|result| undo_all(&result.mutations, &mut network))
            };
            if let Err(e) = undone {
                warn!(error = %e, "撤销失败，清空流状态");
                self.network.write().clear_flow_state();
            }
        }

        self.buffer.clear();
        self.state = PlaybackState::Stopped;
        if let Some(kind) = self.algorithm {
            self.driver = Some(kind.create_driver(self.network.clone()));
        }
        info!("已重置");
    }

    // ==================== 自动播放 ====================

    /// 进入自动播放状态，返回是否成功
    pub fn start_auto(&mut self) -> bool {
        if self.driver.is_none() || self.state == PlaybackState::Finished {
            return false;
        }
        self.state = PlaybackState::Auto;
        true
    }

    /// 暂停自动播放
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Auto {
            self.state = if self.buffer.cursor() == 0 {
                PlaybackState::Stopped
            } else {
                PlaybackState::Manual
            };
        }
    }
}
