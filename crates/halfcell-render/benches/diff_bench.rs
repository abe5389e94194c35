//! Benchmarks for frame diffing and incremental rendering.
//!
//! Run with: cargo bench -p halfcell-render --bench diff_bench

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use halfcell_core::{Size, SizeProvider};
use halfcell_render::{Canvas, CanvasOptions, FrameBuffer, SlotDiff};
use std::hint::black_box;
use std::io;

// =============================================================================
// SlotDiff::compute
// =============================================================================

fn bench_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff/compute");

    for (columns, rows) in [(80u16, 24u16), (120, 40), (200, 60)] {
        let size = Size::new(rows, columns);
        group.throughput(Throughput::Elements((size.slots() * rows as usize) as u64));

        let old = FrameBuffer::with_size(size, " ", false);
        let identical = old.clone();
        group.bench_with_input(
            BenchmarkId::new("identical", format!("{columns}x{rows}")),
            &(),
            |b, _| b.iter(|| black_box(SlotDiff::compute(&old, &identical))),
        );

        let mut sparse = old.clone();
        for r in (0..rows as usize).step_by(4) {
            if let Some(slot) = sparse.get_mut(r, r % size.slots()) {
                slot.set_half(0, "x");
            }
        }
        group.bench_with_input(
            BenchmarkId::new("sparse", format!("{columns}x{rows}")),
            &(),
            |b, _| b.iter(|| black_box(SlotDiff::compute(&old, &sparse))),
        );

        let dense = FrameBuffer::with_size(size, "#", false);
        group.bench_with_input(
            BenchmarkId::new("dense", format!("{columns}x{rows}")),
            &(),
            |b, _| b.iter(|| black_box(SlotDiff::compute(&old, &dense))),
        );
    }

    group.finish();
}

// =============================================================================
// Canvas::render
// =============================================================================

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("canvas/render");

    for (columns, rows) in [(80u16, 24u16), (200, 60)] {
        let options = || {
            CanvasOptions::new(io::sink()).with_size(SizeProvider::fixed(rows, columns))
        };

        let mut full = Canvas::new(options().with_smart_render(false));
        group.bench_with_input(
            BenchmarkId::new("full", format!("{columns}x{rows}")),
            &(),
            |b, _| b.iter(|| black_box(full.render().map(|timing| timing.fps))),
        );

        let mut incremental = Canvas::new(options());
        // Burn the one-shot refresh so every iteration is incremental.
        for _ in 0..3 {
            let _ = incremental.render();
        }
        let mut tick = 0usize;
        group.bench_with_input(
            BenchmarkId::new("incremental_one_cell", format!("{columns}x{rows}")),
            &(),
            |b, _| {
                b.iter(|| {
                    tick = tick.wrapping_add(1);
                    let glyph = if tick % 2 == 0 { "a" } else { "b" };
                    incremental.draw_pixel(tick % columns as usize, 0, glyph, None);
                    black_box(incremental.render().map(|timing| timing.fps))
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_diff, bench_render);
criterion_main!(benches);
