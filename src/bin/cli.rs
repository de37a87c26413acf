//! flowstep CLI 工具
//!
//! 交互式单步执行最大流算法

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use flowstep::algorithm::AlgorithmKind;
use flowstep::cli::{printer, CommandCompleter, CommandResult, Session};
use flowstep::config::PlaybackConfig;
use flowstep::graph::FlowNetwork;
use flowstep::import::{samples, NetworkLoader};
use flowstep::stepper::{run_auto, PlaybackOutcome};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "flowstep-cli")]
#[command(about = "最大流算法单步执行工具", version)]
struct Args {
    /// 配置文件（JSON）
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 网络文件（JSON），缺省使用内置示例网络
    #[arg(short, long)]
    network: Option<PathBuf>,

    /// 算法: edmonds-karp, ford-fulkerson, push-relabel
    #[arg(short, long)]
    algorithm: Option<AlgorithmKind>,

    /// 自动播放间隔（毫秒）
    #[arg(short, long)]
    interval_ms: Option<u64>,

    /// 执行以分号分隔的命令后退出
    #[arg(short = 'e', long)]
    execute: Option<String>,
}

impl Args {
    /// 配置文件打底，命令行参数覆盖
    fn playback_config(&self) -> anyhow::Result<PlaybackConfig> {
        let mut config = match &self.config {
            Some(path) => PlaybackConfig::from_file(path)?,
            None => PlaybackConfig::default(),
        };
        if let Some(algorithm) = self.algorithm {
            config.algorithm = algorithm;
        }
        if let Some(interval_ms) = self.interval_ms {
            config.interval_ms = interval_ms;
        }
        if let Some(network) = &self.network {
            config.network = Some(network.clone());
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("flowstep=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_network(config: &PlaybackConfig) -> anyhow::Result<FlowNetwork> {
    match &config.network {
        Some(path) => NetworkLoader::load(path)
            .with_context(|| format!("无法加载网络文件 {}", path.display())),
        None => Ok(samples::default_network()?),
    }
}

fn history_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".flowstep_history"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing();

    let config = args.playback_config()?;
    let network = load_network(&config)?;
    let mut session = Session::new(network, config);

    // 单次执行模式
    if let Some(script) = args.execute.as_deref() {
        for line in script.split(';') {
            if !run_line(&mut session, line).await? {
                break;
            }
        }
        return Ok(());
    }

    println!("flowstep - 最大流算法单步执行");
    println!("==============================");
    println!(
        "算法: {}  节点数: {}",
        session.config().algorithm,
        session.stepper().network().read().node_count()
    );
    println!("\n输入 'help' 查看命令列表，'quit' 退出\n");

    let mut editor: Editor<CommandCompleter, DefaultHistory> = Editor::new()?;
    editor.set_helper(Some(CommandCompleter::new()));
    let history = history_path();
    if let Some(path) = &history {
        // 首次运行时历史文件不存在
        let _ = editor.load_history(path);
    }

    loop {
        match editor.readline("flowstep> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if let Err(e) = editor.add_history_entry(line) {
                    warn!(error = %e, "无法记录命令历史");
                }
                if !run_line(&mut session, line).await? {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    if let Some(path) = &history {
        if let Err(e) = editor.save_history(path) {
            warn!(error = %e, "无法保存命令历史");
        }
    }
    println!("再见！");
    Ok(())
}

/// 执行一行命令，返回是否继续
async fn run_line(session: &mut Session, line: &str) -> anyhow::Result<bool> {
    match session.execute_line(line) {
        Ok(CommandResult::Continue) => {}
        Ok(CommandResult::Exit) => return Ok(false),
        Ok(CommandResult::Message(message)) => println!("{}", message),
        Ok(CommandResult::Play(interval)) => play(session, interval).await,
        Err(e) => println!("{} {}", "错误:".red(), e),
    }
    Ok(true)
}

/// 自动播放，Ctrl-C 暂停
async fn play(session: &mut Session, interval: Duration) {
    let (pause_tx, pause_rx) = watch::channel(false);
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            // 播放已结束时接收端已丢弃，发送失败无需处理
            let _ = pause_tx.send(true);
        }
    });

    info!(interval_ms = interval.as_millis() as u64, "自动播放");
    let outcome = run_auto(session.stepper_mut(), interval, pause_rx, |stepper| {
        println!("{}", printer::format_step(stepper));
    })
    .await;
    interrupt.abort();

    match outcome {
        Ok(PlaybackOutcome::Finished) => println!("{}", "播放结束".green()),
        Ok(PlaybackOutcome::Paused) => println!("已暂停"),
        Ok(PlaybackOutcome::Idle) => println!("没有可播放的步骤"),
        Err(e) => println!("{} {}（已重置）", "错误:".red(), e),
    }
}
