use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use flowstep::graph::FlowNetwork;
use flowstep::import::samples;
use flowstep::{AlgorithmKind, NodeType, Stepper};

/// 分层网格网络：源点 -> width x depth 网格 -> 汇点
fn layered_network(width: usize, depth: usize) -> FlowNetwork {
    let mut net = FlowNetwork::new();
    let source = net.add_node("s", NodeType::Source).unwrap();
    let sink = net.add_node("t", NodeType::Sink).unwrap();

    let mut previous = vec![source];
    for layer in 0..depth {
        let current: Vec<_> = (0..width)
            .map(|i| net.add_node(format!("n{}_{}", layer, i), NodeType::Default).unwrap())
            .collect();
        for (i, &from) in previous.iter().enumerate() {
            for (j, &to) in current.iter().enumerate() {
                net.add_edge(from, to, ((i + j) % 7 + 1) as i64).unwrap();
            }
        }
        previous = current;
    }
    for &from in &previous {
        net.add_edge(from, sink, 5).unwrap();
    }
    net
}

fn bench_jump_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("jump_to_end");
    for kind in AlgorithmKind::ALL {
        group.bench_with_input(BenchmarkId::new(kind.name(), "default"), &kind, |b, &kind| {
            b.iter(|| {
                let network = samples::default_network().unwrap().into_shared();
                let mut stepper = Stepper::with_algorithm(network, kind);
                stepper.jump_to_end().unwrap()
            })
        });
        group.bench_with_input(BenchmarkId::new(kind.name(), "layered"), &kind, |b, &kind| {
            b.iter(|| {
                let network = layered_network(4, 4).into_shared();
                let mut stepper = Stepper::with_algorithm(network, kind);
                stepper.jump_to_end().unwrap()
            })
        });
    }
    group.finish();
}

fn bench_rewind(c: &mut Criterion) {
    let network = layered_network(4, 4).into_shared();
    let mut stepper = Stepper::with_algorithm(network, AlgorithmKind::EdmondsKarp);
    stepper.jump_to_end().unwrap();

    c.bench_function("rewind_and_replay", |b| {
        b.iter(|| {
            while stepper.step_backward().unwrap() {}
            stepper.jump_to_end().unwrap()
        })
    });
}

criterion_group!(benches, bench_jump_to_end, bench_rewind);
criterion_main!(benches);
