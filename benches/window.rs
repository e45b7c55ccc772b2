//! Benchmarks for window computation and render passes.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(
    clippy::expect_used,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vgrid::render::HeadlessSurface;
use vgrid::{GridConfig, GridEngine, SizeTable, WindowCalculator};

/// A table where every seventh row was resized.
fn resized_table(count: u32) -> SizeTable {
    let mut table = SizeTable::new(count, 28.0);
    for i in (0..count).step_by(7) {
        table.set(i, 28.0 + (i % 40) as f32);
    }
    table
}

/// Window lookup across table sizes
fn bench_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("window_compute");
    let calculator = WindowCalculator::new(10, 64);
    for count in [1_000u32, 100_000, 1_000_000] {
        let table = resized_table(count);
        let scroll = table.total() * 0.5;
        group.bench_with_input(BenchmarkId::from_parameter(count), &table, |b, table| {
            b.iter(|| calculator.compute(black_box(table), black_box(scroll), 600.0));
        });
    }
    group.finish();
}

/// Resizing one row then asking for an offset near the end
fn bench_resize_then_offset(c: &mut Criterion) {
    let mut table = resized_table(100_000);
    let mut i = 0u32;
    c.bench_function("size_table_set_offset", |b| {
        b.iter(|| {
            i = (i + 7919) % 100_000;
            table.set(i, 30.0 + (i % 10) as f32);
            black_box(table.offset_of(99_999))
        });
    });
}

/// Full scroll-and-render pass through the headless backend
fn bench_scroll_render(c: &mut Criterion) {
    let mut engine =
        GridEngine::new(GridConfig::default(), HeadlessSurface::new()).expect("grid builds");
    let total = engine.layout().total_height();
    let mut y = 0.0f32;
    c.bench_function("scroll_render_default_grid", |b| {
        b.iter(|| {
            y = (y + 1_733.0) % total;
            engine.set_scroll(0.0, black_box(y));
            engine.on_viewport_changed()
        });
    });
}

criterion_group!(
    benches,
    bench_compute,
    bench_resize_then_offset,
    bench_scroll_render
);
criterion_main!(benches);
