//! 交互式控制台
//!
//! 命令解析与执行、表格打印和 Tab 补全

pub mod commands;
pub mod completer;
pub mod printer;

pub use commands::{Command, CommandResult, Session};
pub use completer::CommandCompleter;
