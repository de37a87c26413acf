//! 命令补全器
//!
//! 基于 rustyline 实现 Tab 补全：第一个单词补全命令名，
//! `algo` 之后补全算法名。

use crate::algorithm::AlgorithmKind;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

/// 控制台命令列表
pub const COMMANDS: &[&str] = &[
    "next", "back", "end", "reset", "play", "algo", "algos", "load", "save", "nodes", "edges",
    "code", "status", "help", "quit",
];

/// 计算补全位置和候选词
pub fn complete_words(line: &str, pos: usize) -> (usize, Vec<String>) {
    let line_to_cursor = &line[..pos];
    let words: Vec<&str> = line_to_cursor.split_whitespace().collect();
    let at_word_end = !line_to_cursor.is_empty() && !line_to_cursor.ends_with(' ');

    // 正在输入的单词及其前面的完整单词
    let (current, previous) = if at_word_end {
        let current = words.last().copied().unwrap_or("");
        (current, &words[..words.len().saturating_sub(1)])
    } else {
        ("", &words[..])
    };
    let start = pos - current.len();
    let current = current.to_lowercase();

    let candidates: Vec<String> = match previous {
        [] => COMMANDS
            .iter()
            .filter(|cmd| cmd.starts_with(&current))
            .map(|cmd| cmd.to_string())
            .collect(),
        [cmd] if cmd.eq_ignore_ascii_case("algo") => AlgorithmKind::ALL
            .iter()
            .map(|kind| kind.name())
            .filter(|name| name.starts_with(&current))
            .map(|name| name.to_string())
            .collect(),
        _ => Vec::new(),
    };

    (start, candidates)
}

/// flowstep CLI 补全器
#[derive(Default)]
pub struct CommandCompleter;

impl CommandCompleter {
    pub fn new() -> Self {
        Self
    }
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, words) = complete_words(line, pos);
        let pairs = words
            .into_iter()
            .map(|w| Pair {
                display: w.clone(),
                replacement: w,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for CommandCompleter {
    type Hint = String;
}

impl Highlighter for CommandCompleter {}

impl Validator for CommandCompleter {}

impl Helper for CommandCompleter {}
