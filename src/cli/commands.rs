//! 控制台命令处理
//!
//! 解析一行输入为命令，并在会话上执行。自动播放需要异步运行时，
//! 由调用方根据 [`CommandResult::Play`] 启动。

use super::printer;
use crate::algorithm::AlgorithmKind;
use crate::config::{PlaybackConfig, MIN_INTERVAL_MS};
use crate::error::{Error, Result};
use crate::graph::FlowNetwork;
use crate::import::NetworkLoader;
use crate::stepper::Stepper;
use std::path::PathBuf;
use std::time::Duration;

/// 控制台命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Back,
    End,
    Reset,
    Play(Option<u64>),
    Algo(AlgorithmKind),
    Algos,
    Load(PathBuf),
    Save(PathBuf),
    Nodes,
    Edges { all: bool },
    Code,
    Status,
    Help,
    Quit,
}

impl Command {
    /// 解析一行输入，空行返回 `Ok(None)`
    pub fn parse(input: &str) -> Result<Option<Command>> {
        let parts: Vec<&str> = input.trim().splitn(2, ' ').collect();
        let cmd = parts[0].to_lowercase();
        let args = parts.get(1).map(|s| s.trim()).unwrap_or("");

        let command = match cmd.as_str() {
            "" => return Ok(None),
            "next" | "n" => Command::Next,
            "back" | "b" => Command::Back,
            "end" => Command::End,
            "reset" => Command::Reset,
            "play" => {
                if args.is_empty() {
                    Command::Play(None)
                } else {
                    let ms = args
                        .parse::<u64>()
                        .map_err(|_| Error::ParseError(format!("无效的间隔: {}", args)))?;
                    if ms < MIN_INTERVAL_MS {
                        return Err(Error::ParseError(format!(
                            "播放间隔不能小于 {}ms",
                            MIN_INTERVAL_MS
                        )));
                    }
                    Command::Play(Some(ms))
                }
            }
            "algo" => {
                if args.is_empty() {
                    return Err(Error::ParseError("用法: algo <name>".to_string()));
                }
                Command::Algo(args.parse()?)
            }
            "algos" => Command::Algos,
            "load" | "save" => {
                if args.is_empty() {
                    return Err(Error::ParseError(format!("用法: {} <file>", cmd)));
                }
                let path = PathBuf::from(args);
                if cmd == "load" {
                    Command::Load(path)
                } else {
                    Command::Save(path)
                }
            }
            "nodes" => Command::Nodes,
            "edges" => Command::Edges { all: args == "all" },
            "code" => Command::Code,
            "status" => Command::Status,
            "help" | "h" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => {
                return Err(Error::ParseError(format!(
                    "未知命令: {}，输入 help 查看帮助",
                    other
                )))
            }
        };
        Ok(Some(command))
    }
}

/// 命令执行结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// 继续运行
    Continue,
    /// 退出程序
    Exit,
    /// 显示消息
    Message(String),
    /// 以给定间隔开始自动播放
    Play(Duration),
}

/// 控制台会话
pub struct Session {
    stepper: Stepper,
    config: PlaybackConfig,
}

impl Session {
    /// 创建会话并绑定配置中的算法
    pub fn new(network: FlowNetwork, config: PlaybackConfig) -> Self {
        let stepper = Stepper::with_algorithm(network.into_shared(), config.algorithm);
        Self { stepper, config }
    }

    pub fn stepper(&self) -> &Stepper {
        &self.stepper
    }

    pub fn stepper_mut(&mut self) -> &mut Stepper {
        &mut self.stepper
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// 解析并执行一行输入
    pub fn execute_line(&mut self, input: &str) -> Result<CommandResult> {
        match Command::parse(input)? {
            Some(command) => self.execute(command),
            None => Ok(CommandResult::Continue),
        }
    }

    /// 执行命令
    pub fn execute(&mut self, command: Command) -> Result<CommandResult> {
        let result = match command {
            Command::Next => {
                if !self.stepper.step_forward()? {
                    return Ok(CommandResult::Message(self.idle_message()));
                }
                CommandResult::Message(printer::format_step(&self.stepper))
            }
            Command::Back => {
                if !self.stepper.step_backward()? {
                    return Ok(CommandResult::Message("已在初始状态".to_string()));
                }
                CommandResult::Message(printer::format_step(&self.stepper))
            }
            Command::End => {
                let steps = self.stepper.jump_to_end()?;
                CommandResult::Message(format!(
                    "前进 {} 步\n{}",
                    steps,
                    printer::format_step(&self.stepper)
                ))
            }
            Command::Reset => {
                self.stepper.reset();
                CommandResult::Message("已重置".to_string())
            }
            Command::Play(ms) => {
                let interval = ms.map(Duration::from_millis).unwrap_or_else(|| self.config.interval());
                CommandResult::Play(interval)
            }
            Command::Algo(kind) => {
                self.stepper.set_algorithm(kind);
                self.config.algorithm = kind;
                CommandResult::Message(format!("当前算法: {}", kind))
            }
            Command::Algos => {
                CommandResult::Message(printer::format_algorithms(self.stepper.algorithm()))
            }
            Command::Load(path) => {
                let network = NetworkLoader::load(&path)?;
                let summary = format!(
                    "已加载 {}: {} 个节点, {} 条边",
                    path.display(),
                    network.node_count(),
                    network.edge_count()
                );
                self.stepper.replace_network(network);
                self.config.network = Some(path);
                CommandResult::Message(summary)
            }
            Command::Save(path) => {
                NetworkLoader::save(&self.stepper.network().read(), &path)?;
                CommandResult::Message(format!("已保存到 {}", path.display()))
            }
            Command::Nodes => {
                CommandResult::Message(printer::format_nodes(&self.stepper.network().read()))
            }
            Command::Edges { all } => {
                CommandResult::Message(printer::format_edges(&self.stepper.network().read(), all))
            }
            Command::Code => CommandResult::Message(self.code_listing()),
            Command::Status => CommandResult::Message(printer::format_status(&self.stepper)),
            Command::Help => CommandResult::Message(printer::help_text()),
            Command::Quit => CommandResult::Exit,
        };
        Ok(result)
    }

    fn idle_message(&self) -> String {
        if self.stepper.algorithm().is_none() {
            "未选择算法".to_string()
        } else {
            "算法已结束".to_string()
        }
    }

    /// 以当前源点 / 汇点标签生成的伪代码
    fn code_listing(&self) -> String {
        let Some(kind) = self.stepper.algorithm() else {
            return "未选择算法".to_string();
        };
        let network = self.stepper.network().read();
        let source = network.source_node().map(|n| n.label().to_string());
        let sink = network.sink_node().map(|n| n.label().to_string());
        let listing = kind.pseudocode(
            source.as_deref().unwrap_or("s"),
            sink.as_deref().unwrap_or("t"),
        );
        printer::format_code(&listing, self.stepper.highlighted_lines())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::samples;
    use crate::stepper::PlaybackState;
    use tempfile::tempdir;

    fn session() -> Session {
        Session::new(samples::default_network().unwrap(), PlaybackConfig::default())
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("  ").unwrap(), None);
        assert_eq!(Command::parse("n").unwrap(), Some(Command::Next));
        assert_eq!(Command::parse("PLAY 250").unwrap(), Some(Command::Play(Some(250))));
        assert_eq!(
            Command::parse("algo dfs").unwrap(),
            Some(Command::Algo(AlgorithmKind::FordFulkerson))
        );
        assert_eq!(
            Command::parse("edges all").unwrap(),
            Some(Command::Edges { all: true })
        );
        assert_eq!(
            Command::parse("load nets/a b.json").unwrap(),
            Some(Command::Load(PathBuf::from("nets/a b.json")))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Command::parse("jump"), Err(Error::ParseError(_))));
        assert!(matches!(Command::parse("play fast"), Err(Error::ParseError(_))));
        assert!(matches!(Command::parse("play 1"), Err(Error::ParseError(_))));
        assert!(matches!(Command::parse("algo"), Err(Error::ParseError(_))));
        assert!(matches!(
            Command::parse("algo dinic"),
            Err(Error::UnknownAlgorithm(_))
        ));
        assert!(matches!(Command::parse("save"), Err(Error::ParseError(_))));
    }

    #[test]
    fn test_stepping_commands() {
        let mut session = session();
        session.execute(Command::Next).unwrap();
        session.execute(Command::Next).unwrap();
        session.execute(Command::Back).unwrap();
        assert_eq!(session.stepper().cursor(), 1);

        session.execute(Command::End).unwrap();
        assert_eq!(session.stepper().state(), PlaybackState::Finished);
        assert_eq!(
            session.execute(Command::Next).unwrap(),
            CommandResult::Message("算法已结束".to_string())
        );

        session.execute(Command::Reset).unwrap();
        assert_eq!(session.stepper().cursor(), 0);
        assert_eq!(
            session.execute(Command::Back).unwrap(),
            CommandResult::Message("已在初始状态".to_string())
        );
    }

    #[test]
    fn test_algo_switch_resets() {
        let mut session = session();
        session.execute_line("end").unwrap();
        session.execute_line("algo push-relabel").unwrap();

        assert_eq!(session.stepper().cursor(), 0);
        assert_eq!(session.config().algorithm, AlgorithmKind::PushRelabel);
        assert_eq!(session.stepper().network().read().flow_value(), 0);
    }

    #[test]
    fn test_play_interval() {
        let mut session = session();
        assert_eq!(
            session.execute_line("play").unwrap(),
            CommandResult::Play(Duration::from_millis(500))
        );
        assert_eq!(
            session.execute_line("play 50").unwrap(),
            CommandResult::Play(Duration::from_millis(50))
        );
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chain.json");
        NetworkLoader::save(&samples::three_node_network().unwrap(), &path).unwrap();

        let mut session = session();
        session.execute_line("next").unwrap();
        session
            .execute(Command::Load(path.clone()))
            .unwrap();
        assert_eq!(session.stepper().cursor(), 0);
        assert_eq!(session.stepper().network().read().node_count(), 3);

        session.execute_line("end").unwrap();
        assert_eq!(session.stepper().flow_value(), Some(5));

        let saved = dir.path().join("saved.json");
        session.execute(Command::Save(saved.clone())).unwrap();
        assert_eq!(NetworkLoader::load(&saved).unwrap().node_count(), 3);
    }

    #[test]
    fn test_load_missing_file_keeps_network() {
        let mut session = session();
        let err = session
            .execute_line("load /nonexistent/flowstep.json")
            .unwrap_err();
        assert!(matches!(err, Error::IoError(_)));
        assert_eq!(session.stepper().network().read().node_count(), 7);
    }

    #[test]
    fn test_code_listing_uses_terminal_labels() {
        colored::control::set_override(false);
        let mut session = session();
        session.execute_line("next").unwrap();
        let CommandResult::Message(code) = session.execute_line("code").unwrap() else {
            panic!("expected message");
        };
        assert!(code.contains("A ∈ V"));
        assert!(code.contains("G ∈ V"));
        assert!(code.lines().nth(3).unwrap().starts_with('>'));
    }
}
