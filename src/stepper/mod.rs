//! 步进模块
//!
//! 控制器、步骤缓冲区和自动播放

mod buffer;
mod controller;
mod playback;

pub use buffer::StepBuffer;
pub use controller::Stepper;
pub use playback::{run_auto, PlaybackOutcome};

use serde::{Deserialize, Serialize};
use std::fmt;

/// 播放状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// 初始状态（游标为 0）
    #[default]
    Stopped,
    /// 自动播放中
    Auto,
    /// 手动步进中
    Manual,
    /// 已到达终止步骤
    Finished,
}

impl PlaybackState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackState::Stopped => "stopped",
            PlaybackState::Auto => "auto",
            PlaybackState::Manual => "manual",
            PlaybackState::Finished => "finished",
        }
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
