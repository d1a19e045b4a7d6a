use arclight::render::{RenderOptions, layout_review_sheet, render_sheet_svg};
use arclight::{Grid, GridPair, Palette, ReviewTask};
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};

fn grid(rows: usize, cols: usize) -> Grid {
    let cells = (0..rows)
        .map(|i| (0..cols).map(|j| ((i + j) % 10) as u8).collect())
        .collect();
    Grid::from_rows(cells).unwrap()
}

fn review_task(train_pairs: usize, side: usize) -> ReviewTask {
    let pair = GridPair {
        input: grid(side, side),
        output: grid(side, side),
    };
    ReviewTask {
        id: "bench".to_string(),
        train: vec![pair.clone(); train_pairs],
        test_input: pair.input.clone(),
        ground_truth: pair.output.clone(),
        baseline_output: pair.output.clone(),
        candidate_output: pair.output,
    }
}

fn fixtures() -> Vec<(&'static str, ReviewTask)> {
    vec![
        ("small_3x3", review_task(2, 3)),
        ("typical_10x10", review_task(4, 10)),
        ("dense_30x30", review_task(5, 30)),
    ]
}

fn bench_layout_only(c: &mut Criterion) {
    let palette = Palette::default();
    let options = RenderOptions::default();

    let mut group = c.benchmark_group("sheet_layout");
    for (name, task) in fixtures() {
        group.bench_function(name, |b| {
            b.iter(|| layout_review_sheet(&task, &palette, &options));
        });
    }
    group.finish();
}

fn bench_render_sheet_svg(c: &mut Criterion) {
    let palette = Palette::default();
    let options = RenderOptions::default();

    let mut group = c.benchmark_group("sheet_svg");
    for (name, task) in fixtures() {
        let layout = layout_review_sheet(&task, &palette, &options);
        group.bench_function(name, |b| {
            b.iter_batched(
                || &layout,
                |sheet| render_sheet_svg(sheet, &options),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_layout_only, bench_render_sheet_svg);
criterion_main!(benches);
