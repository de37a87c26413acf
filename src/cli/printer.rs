//! 结果打印器
//!
//! 以表格形式输出节点、边和播放状态，以带行号的形式输出伪代码

use crate::algorithm::AlgorithmKind;
use crate::graph::{FlowNetwork, NodeId};
use crate::stepper::Stepper;
use crate::types::{LineNumber, LinearStructure};
use colored::Colorize;
use prettytable::{format, row, Table};

fn new_table() -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table
}

fn mark(highlighted: bool) -> &'static str {
    if highlighted {
        "*"
    } else {
        ""
    }
}

fn label_of(network: &FlowNetwork, id: NodeId) -> String {
    network
        .node(id)
        .map(|n| n.label().to_string())
        .unwrap_or_else(|| id.to_string())
}

/// 节点表
pub fn format_nodes(network: &FlowNetwork) -> String {
    let mut table = new_table();
    table.set_titles(row!["Label", "Type", "Height", "Excess", "Hl"]);
    for node in network.nodes() {
        table.add_row(row![
            node.label(),
            node.node_type(),
            node.height(),
            node.excess(),
            mark(node.is_highlighted())
        ]);
    }
    table.to_string()
}

/// 边表（跳过两个方向都没有容量和流量的边）
pub fn format_edges(network: &FlowNetwork, show_reverse: bool) -> String {
    let mut table = new_table();
    table.set_titles(row!["Id", "Edge", "Flow / Cap", "Residual", "Hl"]);
    for edge in network.edges() {
        if !show_reverse && edge.capacity() == 0 && edge.flow() <= 0 {
            continue;
        }
        table.add_row(row![
            edge.id(),
            format!(
                "{} -> {}",
                label_of(network, edge.source()),
                label_of(network, edge.target())
            ),
            format!("{} / {}", edge.flow(), edge.capacity()),
            edge.residual(),
            mark(edge.is_highlighted())
        ]);
    }
    table.to_string()
}

/// 伪代码清单，高亮行以 `>` 标记
pub fn format_code(listing: &[String], highlighted: &[LineNumber]) -> String {
    let mut output = String::new();
    for (i, line) in listing.iter().enumerate() {
        let number = (i + 1) as LineNumber;
        if highlighted.contains(&number) {
            output.push_str(&format!("{} {:>2} {}\n", ">".green(), number, line.bold()));
        } else {
            output.push_str(&format!("  {:>2} {}\n", number, line));
        }
    }
    output
}

/// 队列 / 栈视图
pub fn format_linear(network: &FlowNetwork, structure: LinearStructure, nodes: &[NodeId]) -> String {
    if structure == LinearStructure::None {
        return String::new();
    }
    let labels: Vec<String> = nodes.iter().map(|id| label_of(network, *id)).collect();
    format!("{}: [{}]", structure, labels.join(", "))
}

/// 播放状态表
pub fn format_status(stepper: &Stepper) -> String {
    let mut table = new_table();
    table.set_titles(row!["Property", "Value"]);
    let algorithm = stepper
        .algorithm()
        .map(|k| k.label().to_string())
        .unwrap_or_else(|| "-".to_string());
    table.add_row(row!["Algorithm", algorithm]);
    table.add_row(row!["State", stepper.state()]);
    table.add_row(row!["Step", stepper.cursor()]);
    table.add_row(row!["Buffered", stepper.buffer().len() - 1]);
    let flow = stepper
        .flow_value()
        .map(|f| f.to_string())
        .unwrap_or_else(|| "-".to_string());
    table.add_row(row!["Max flow", flow]);
    table.to_string()
}

/// 算法列表
pub fn format_algorithms(current: Option<AlgorithmKind>) -> String {
    let mut table = new_table();
    table.set_titles(row!["Name", "Algorithm", "Structure", ""]);
    for kind in AlgorithmKind::ALL {
        table.add_row(row![
            kind.name(),
            kind.label(),
            kind.linear_structure(),
            mark(current == Some(kind))
        ]);
    }
    table.to_string()
}

/// 单步摘要：当前行号与队列 / 栈
pub fn format_step(stepper: &Stepper) -> String {
    let network = stepper.network().read();
    let lines: Vec<String> = stepper
        .highlighted_lines()
        .iter()
        .map(|l| l.to_string())
        .collect();
    let mut summary = format!(
        "step {} [{}] lines {}",
        stepper.cursor(),
        stepper.state(),
        if lines.is_empty() {
            "-".to_string()
        } else {
            lines.join(",")
        }
    );
    if let Some(kind) = stepper.algorithm() {
        let linear = format_linear(&network, kind.linear_structure(), stepper.linear_nodes());
        if !linear.is_empty() {
            summary.push_str("  ");
            summary.push_str(&linear);
        }
    }
    if let Some(flow) = stepper.flow_value() {
        summary.push_str(&format!("  {}", format!("max flow = {}", flow).green().bold()));
    }
    summary
}

/// 帮助信息
pub fn help_text() -> String {
    r#"
═══════════════════════════════════════════════════════════════
                   flowstep 命令帮助
═══════════════════════════════════════════════════════════════

步进:
  next, n              前进一步
  back, b              后退一步
  end                  跳到算法结束
  reset                撤销所有步骤，回到初始状态
  play [ms]            自动播放（Ctrl-C 暂停），可指定间隔毫秒数

算法:
  algo <name>          切换算法（会先重置）
                       名称: edmonds-karp, ford-fulkerson, push-relabel
  algos                列出所有算法
  code                 显示伪代码及当前高亮行

网络:
  load <file>          从 JSON 文件加载网络（会先重置）
  save <file>          保存网络到 JSON 文件
  nodes                显示节点表
  edges [all]          显示边表（all 包含空的反向边）

其他:
  status               显示播放状态
  help, h, ?           显示帮助
  quit, exit, q        退出程序
═══════════════════════════════════════════════════════════════
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::samples;

    #[test]
    fn test_node_and_edge_tables() {
        let network = samples::three_node_network().unwrap();
        let nodes = format_nodes(&network);
        assert!(nodes.contains("source"));
        assert!(nodes.contains("sink"));

        let edges = format_edges(&network, false);
        assert!(edges.contains("A -> B"));
        assert!(!edges.contains("B -> A"));
        assert!(format_edges(&network, true).contains("B -> A"));
    }

    #[test]
    fn test_code_marks_highlighted_lines() {
        colored::control::set_override(false);
        let listing = AlgorithmKind::EdmondsKarp.pseudocode("A", "C");
        let code = format_code(&listing, &[4, 5]);
        let lines: Vec<&str> = code.lines().collect();

        assert_eq!(lines.len(), listing.len());
        assert!(lines[3].starts_with('>'));
        assert!(lines[4].starts_with('>'));
        assert!(!lines[5].starts_with('>'));
    }

    #[test]
    fn test_linear_view() {
        let network = samples::three_node_network().unwrap();
        let a = network.node_by_label("A").unwrap().id();
        assert_eq!(format_linear(&network, LinearStructure::Queue, &[a]), "queue: [A]");
        assert_eq!(format_linear(&network, LinearStructure::None, &[a]), "");
    }

    #[test]
    fn test_status_and_step() {
        colored::control::set_override(false);
        let mut stepper = Stepper::with_algorithm(
            samples::three_node_network().unwrap().into_shared(),
            AlgorithmKind::EdmondsKarp,
        );
        stepper.step_forward().unwrap();
        assert!(format_status(&stepper).contains("Edmonds-Karp"));
        assert_eq!(format_step(&stepper), "step 1 [manual] lines 4,5  queue: [A]");

        stepper.jump_to_end().unwrap();
        assert!(format_step(&stepper).ends_with("max flow = 5"));
    }
}
