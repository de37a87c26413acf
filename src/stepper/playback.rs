//! 自动播放
//!
//! 按固定周期调用 `step_forward`，直到终止、收到暂停信号或出错。
//! 播放期间独占控制器，因此与其他交互天然串行。

use super::{PlaybackState, Stepper};
use crate::error::Result;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// 自动播放的结束原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// 到达终止步骤
    Finished,
    /// 收到暂停信号
    Paused,
    /// 无法开始（未绑定算法或已结束）
    Idle,
}

/// 自动播放
///
/// `pause` 通道的值变为 `true`（或发送端被丢弃）时停止。
/// 每步之后调用 `on_tick` 刷新视图。拓扑校验失败时控制器已被强制重置，
/// 错误原样返回。
pub async fn run_auto<F>(
    stepper: &mut Stepper,
    period: Duration,
    mut pause: watch::Receiver<bool>,
    mut on_tick: F,
) -> Result<PlaybackOutcome>
where
    F: FnMut(&Stepper),
{
    if !stepper.start_auto() {
        return Ok(PlaybackOutcome::Idle);
    }
    // 只响应播放开始之后的暂停请求
    pause.borrow_and_update();

    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // 第一次 tick 立即完成，跳过它，让第一步在一个周期后执行
    ticker.tick().await;
    info!(period_ms = period.as_millis() as u64, "开始自动播放");

    loop {
        tokio::select! {
            biased;

            changed = pause.changed() => {
                if changed.is_err() || *pause.borrow_and_update() {
                    stepper.pause();
                    info!(cursor = stepper.cursor(), "自动播放已暂停");
                    return Ok(PlaybackOutcome::Paused);
                }
            }

            _ = ticker.tick() => {
                match stepper.step_forward() {
                    Ok(advanced) => {
                        on_tick(stepper);
                        if !advanced || stepper.state() == PlaybackState::Finished {
                            debug!(cursor = stepper.cursor(), "自动播放结束");
                            return Ok(PlaybackOutcome::Finished);
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "自动播放中止");
                        return Err(e);
                    }
                }
            }
        }
    }
}
