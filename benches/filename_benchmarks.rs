use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vidpick::downloader::progress::parse_progress_line;
use vidpick::utils::sanitize_title;

fn benchmark_sanitize_title(c: &mut Criterion) {
    let mut group = c.benchmark_group("Title Sanitization");

    group.bench_function("simple", |b| {
        b.iter(|| sanitize_title(black_box("My Holiday Video")))
    });

    group.bench_function("reserved characters", |b| {
        b.iter(|| sanitize_title(black_box("What? A <Great> \"Video\" | Part 1/2 #shorts ~ live")))
    });

    let long_title = "Ünïcödé title ".repeat(40);
    group.bench_function("long", |b| {
        b.iter(|| sanitize_title(black_box(&long_title)))
    });

    group.finish();
}

fn benchmark_progress_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("Progress Line Parsing");

    let lines = [
        ("in progress", "[download]  42.3% of ~120.50MiB at  2.31MiB/s ETA 00:45"),
        ("finished", "[download] 100% of 120.50MiB in 00:01:02 at 1.93MiB/s"),
        ("unrelated", "[youtube] abc: Downloading webpage"),
    ];
    for (name, line) in lines {
        group.bench_function(name, |b| b.iter(|| parse_progress_line(black_box(line))));
    }

    group.finish();
}

criterion_group!(benches, benchmark_sanitize_title, benchmark_progress_parsing);
criterion_main!(benches);
