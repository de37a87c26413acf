//! 运行配置

use crate::algorithm::AlgorithmKind;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 自动播放的最小间隔（毫秒）
pub const MIN_INTERVAL_MS: u64 = 10;

/// 播放配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// 默认算法
    pub algorithm: AlgorithmKind,
    /// 自动播放间隔（毫秒）
    pub interval_ms: u64,
    /// 启动时加载的网络文件，缺省使用内置示例网络
    pub network: Option<PathBuf>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            algorithm: AlgorithmKind::EdmondsKarp,
            interval_ms: 500,
            network: None,
        }
    }
}

impl PlaybackConfig {
    /// 从 JSON 文件加载，缺少的字段使用默认值
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: PlaybackConfig = serde_json::from_str(&content)
            .map_err(|e| Error::ConfigError(format!("{}: {}", path.as_ref().display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.interval_ms < MIN_INTERVAL_MS {
            return Err(Error::ConfigError(format!(
                "播放间隔不能小于 {}ms: {}",
                MIN_INTERVAL_MS, self.interval_ms
            )));
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}
