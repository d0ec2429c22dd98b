use std::time::Duration;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use download_pill::{ButtonStyle, DownloadButton};
use egui::{Rect, pos2, vec2};

const FRAME: Duration = Duration::from_millis(16);

fn downloading_button() -> DownloadButton {
    let mut button = DownloadButton::new(ButtonStyle::default());
    button.set_bounds(Rect::from_min_size(pos2(0.0, 0.0), vec2(74.0, 28.0)));
    button.request_start();
    for _ in 0..25 {
        button.tick(FRAME);
    }
    button.notify_download_started();
    for _ in 0..10 {
        button.tick(FRAME);
    }
    button
}

fn bench_timeline(c: &mut Criterion) {
    c.bench_function("full_download_cycle", |b| {
        b.iter_batched(
            downloading_button,
            |mut button| {
                for step in 1..=5 {
                    button.notify_progress(step as f32 * 0.2);
                    for _ in 0..70 {
                        button.tick(FRAME);
                    }
                }
                button
            },
            BatchSize::SmallInput,
        );
    });

    c.bench_function("frame_snapshot_while_spinning", |b| {
        let mut button = DownloadButton::new(ButtonStyle::default());
        button.set_bounds(Rect::from_min_size(pos2(0.0, 0.0), vec2(74.0, 28.0)));
        button.request_start();
        for _ in 0..40 {
            button.tick(FRAME);
        }
        b.iter(|| {
            button.tick(FRAME);
            std::hint::black_box(button.frame())
        });
    });
}

criterion_group!(benches, bench_timeline);
criterion_main!(benches);
