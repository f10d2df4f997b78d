use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use packstock_inventory::{
    CutUsageEvent, MaterialEntry, ProductionEvent, ReconciliationConfig, Reconciler,
    ShipmentEvent, Snapshot,
};

const COLORS: [&str; 4] = ["Normal", "Mavi", "Beyaz", "Yeşil"];

/// Deterministic factory history: `n` productions over a few dozen variants,
/// roughly one shipment and one cut per two runs, some of them orphaned.
fn history(n: usize) -> Snapshot {
    let variant = |i: usize| {
        let thickness = 1.0 + (i % 3) as f64;
        let width = 100.0 + 10.0 * (i % 4) as f64;
        let length = 200.0 + 50.0 * (i % 2) as f64;
        (thickness, width, length, COLORS[i % COLORS.len()])
    };

    let productions = (0..n)
        .map(|i| {
            let (t, w, l, c) = variant(i);
            ProductionEvent::new(t, w, l, 50, w * l / 10_000.0 * 50.0)
                .with_color(c)
                .with_gas_weight(2.5)
        })
        .collect();

    let shipments = (0..n / 2)
        .map(|i| {
            let (t, w, l, c) = variant(i * 7);
            // Every tenth shipment names a thickness that is never produced.
            let t = if i % 10 == 0 { t + 10.0 } else { t };
            ShipmentEvent::new(t, w, Some(l), 20, w * l / 10_000.0 * 20.0).with_color(c)
        })
        .collect();

    let cuts = (0..n / 2)
        .map(|i| {
            let (t, w, l, c) = variant(i * 3);
            CutUsageEvent::new(t, w, l, 5, w * l / 10_000.0 * 5.0).with_color(c)
        })
        .collect();

    Snapshot {
        productions,
        shipments,
        cuts,
        materials: vec![
            MaterialEntry::new("gaz", 10_000.0),
            MaterialEntry::new("granül", 50_000.0),
        ],
        gas_entries: Vec::new(),
    }
}

fn bench_finished_goods(c: &mut Criterion) {
    let reconciler = Reconciler::new(ReconciliationConfig::default()).unwrap();
    let mut group = c.benchmark_group("finished_goods_stock");

    for n in [100usize, 1_000, 10_000] {
        let snapshot = history(n);
        let events = snapshot.productions.len() + snapshot.shipments.len() + snapshot.cuts.len();
        group.throughput(Throughput::Elements(events as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &snapshot, |b, snapshot| {
            b.iter(|| black_box(reconciler.finished_goods_stock(black_box(snapshot))));
        });
    }

    group.finish();
}

fn bench_dashboard(c: &mut Criterion) {
    let reconciler = Reconciler::new(ReconciliationConfig::default()).unwrap();
    let mut group = c.benchmark_group("dashboard");

    for n in [1_000usize, 10_000] {
        let snapshot = history(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &snapshot, |b, snapshot| {
            b.iter(|| black_box(reconciler.dashboard(black_box(snapshot))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_finished_goods, bench_dashboard);
criterion_main!(benches);
