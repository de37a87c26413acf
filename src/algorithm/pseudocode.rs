//! 伪代码清单
//!
//! 行号从 1 开始，与各算法步骤结果中的高亮行号一一对应

use crate::types::LineNumber;
use serde::Serialize;

/// 伪代码中带标签的行区间
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LabeledBlock {
    /// 起止行（闭区间）
    pub lines: (LineNumber, LineNumber),
    pub label: &'static str,
}

/// 增广路径类算法的高亮行
pub mod augmenting_lines {
    use crate::types::LineNumber;

    pub const INIT_SEARCH: &[LineNumber] = &[4, 5];
    pub const POP: &[LineNumber] = &[7];
    pub const EXAMINE_EDGE: &[LineNumber] = &[9];
    pub const RECORD_PRED: &[LineNumber] = &[9, 10, 11];
    pub const PATH_FOUND: &[LineNumber] = &[15, 16, 17, 18];
    pub const AUGMENT_EDGE: &[LineNumber] = &[20, 21, 22, 23];
    pub const ADD_FLOW: &[LineNumber] = &[25];
    pub const RETURN: &[LineNumber] = &[27, 28];
}

/// Push-Relabel 的高亮行
pub mod push_relabel_lines {
    use crate::types::LineNumber;

    pub const RESET_LABELS: &[LineNumber] = &[2, 3, 4, 5];
    pub const LIFT_SOURCE: &[LineNumber] = &[6];
    pub const SATURATE: &[LineNumber] = &[7, 8, 9, 10, 11];
    pub const PUSH: &[LineNumber] = &[13, 19, 20, 21, 22, 23];
    pub const RELABEL: &[LineNumber] = &[13, 27];
    pub const RETURN: &[LineNumber] = &[15];
}

/// 增广路径类算法（Edmonds-Karp / Ford-Fulkerson）的伪代码
pub(crate) fn augmenting_path_listing(
    name: &str,
    depth_first: bool,
    source: &str,
    sink: &str,
) -> Vec<String> {
    let (container, take, put) = if depth_first {
        ("stack", "pop", "push")
    } else {
        ("queue", "dequeue", "enqueue")
    };
    let s = source;
    let t = sink;

    vec![
        format!("procedure {}(G = (V, E), {} ∈ V, {} ∈ V)", name, s, t),
        "    f = 0".to_string(),
        "    repeat".to_string(),
        "        p = []".to_string(),
        format!("        u = [{}]  (create {})", s, container),
        format!("        while u is not empty and p[{}] = ∅", t),
        format!("            c = {}(u)", take),
        "            for edge e originating from c".to_string(),
        format!(
            "                if e.target ∉ p and e.target ≠ {} and e.capacity > e.flow",
            s
        ),
        "                    p[e.target] = e".to_string(),
        format!("                    {}(u, e.target)", put),
        "                end if".to_string(),
        "            end for".to_string(),
        "        end while".to_string(),
        format!("        if p[{}] ≠ ∅", t),
        "            Δf = ∞".to_string(),
        "            for e ∈ p".to_string(),
        "                Δf = min(Δf, e.capacity − e.flow)".to_string(),
        "            end for".to_string(),
        "            for e ∈ p".to_string(),
        "                r = e.reverse".to_string(),
        "                e.flow = e.flow + Δf".to_string(),
        "                r.flow = r.flow − Δf".to_string(),
        "            end for".to_string(),
        "            f = f + Δf".to_string(),
        "        end if".to_string(),
        format!("    until p[{}] = ∅", t),
        "    return f".to_string(),
        "end procedure".to_string(),
    ]
}

pub(crate) fn augmenting_path_blocks(depth_first: bool) -> &'static [LabeledBlock] {
    const BFS: &[LabeledBlock] = &[
        LabeledBlock {
            lines: (4, 14),
            label: "Breadth-first search",
        },
        LabeledBlock {
            lines: (15, 26),
            label: "Increase flow along found path",
        },
    ];
    const DFS: &[LabeledBlock] = &[
        LabeledBlock {
            lines: (4, 14),
            label: "Depth-first search",
        },
        LabeledBlock {
            lines: (15, 26),
            label: "Increase flow along found path",
        },
    ];
    if depth_first {
        DFS
    } else {
        BFS
    }
}

/// Push-Relabel 的伪代码
pub(crate) fn push_relabel_listing(source: &str, sink: &str) -> Vec<String> {
    let s = source;
    let t = sink;

    vec![
        format!("procedure Push-Relabel(G = (V, E), {} ∈ V, {} ∈ V)", s, t),
        "    for vertex v".to_string(),
        "        v.h = 0".to_string(),
        "        v.e = 0".to_string(),
        "    end for".to_string(),
        format!("    {}.h = |V|", s),
        format!("    for vertex v adjacent to {}", s),
        format!("        ({}, v).f = ({}, v).c", s, s),
        format!("        v.e = ({}, v).c", s),
        format!("        {}.e = {}.e − ({}, v).c", s, s, s),
        "    end for".to_string(),
        "    while there exists an applicable push or relabel operation".to_string(),
        "        select an applicable push or relabel operation and perform it".to_string(),
        "    end while".to_string(),
        format!("    return {}.e", t),
        "end procedure".to_string(),
        String::new(),
        "procedure Push(u, v)".to_string(),
        "    Δf = min(u.e, (u, v).c − (u, v).f)".to_string(),
        "    (u, v).f = (u, v).f + Δf".to_string(),
        "    (v, u).f = (v, u).f − Δf".to_string(),
        "    u.e = u.e − Δf".to_string(),
        "    v.e = v.e + Δf".to_string(),
        "end procedure".to_string(),
        String::new(),
        "procedure Relabel(u)".to_string(),
        "    u.h = 1 + min{ v.h : (u, v).c > (u, v).f }".to_string(),
        "end procedure".to_string(),
    ]
}

pub(crate) fn push_relabel_blocks() -> &'static [LabeledBlock] {
    &[
        LabeledBlock {
            lines: (2, 11),
            label: "Initialize preflow",
        },
        LabeledBlock {
            lines: (18, 24),
            label: "Push",
        },
        LabeledBlock {
            lines: (26, 28),
            label: "Relabel",
        },
    ]
}
