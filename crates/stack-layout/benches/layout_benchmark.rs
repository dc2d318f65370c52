//! Layout benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stack_core::{Alignment, ContentId, CrossAxisMode, Item, Size, StackOptions};
use stack_layout::{compute_layout, ContentStore, LayoutContext, StaticContent};

fn fixed_items(count: u64) -> Vec<Item> {
    (0..count)
        .map(|i| {
            Item::builder(ContentId(i))
                .fixed_size(44.0)
                .top(4.0)
                .bottom(4.0)
                .build()
                .unwrap()
        })
        .collect()
}

/// Natural-sized rows with a weighted spacer, forcing the second pass.
fn mixed_items(store: &mut ContentStore, count: u64) -> Vec<Item> {
    let mut items: Vec<Item> = (0..count)
        .map(|i| {
            let id = store.add(StaticContent::new(Size::new(120.0 + (i % 7) as f64, 20.0)));
            Item::builder(id)
                .cross_axis(CrossAxisMode::fit(Alignment::Middle))
                .build()
                .unwrap()
        })
        .collect();
    items.push(Item::builder(ContentId(u64::MAX)).weight(1.0).build().unwrap());
    items
}

fn layout_fixed(c: &mut Criterion) {
    let items = fixed_items(1_000);
    let ctx = LayoutContext::new(StackOptions::vertical(), Size::new(320.0, 640.0));
    let mut store = ContentStore::new();

    c.bench_function("layout_fixed_1000", |b| {
        b.iter(|| compute_layout(black_box(&items), &ctx, &mut store, None))
    });
}

fn layout_weighted(c: &mut Criterion) {
    let mut store = ContentStore::new();
    let items = mixed_items(&mut store, 200);
    let ctx = LayoutContext::new(StackOptions::vertical(), Size::new(320.0, 10_000.0));

    c.bench_function("layout_weighted_natural_200", |b| {
        b.iter(|| compute_layout(black_box(&items), &ctx, &mut store, None))
    });
}

criterion_group!(benches, layout_fixed, layout_weighted);
criterion_main!(benches);
