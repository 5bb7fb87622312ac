use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use tempfile::TempDir;

use gamelog::{
    config::LibraryConfig,
    game::GamePatch,
    library::GameLibrary,
    persist::{GameSink, csv_file::CsvGameFile},
    types::Status,
};

fn seeded_library(tmp: &TempDir, n: usize) -> GameLibrary {
    let mut library =
        GameLibrary::open(LibraryConfig::new(tmp.path().join("games.csv"))).expect("open");
    for i in 0..n {
        library
            .add(&format!("Game {i}"), "PC", None, None)
            .expect("add");
    }
    library
}

fn bench_adds(c: &mut Criterion) {
    c.bench_function("library_add_500", |b| {
        b.iter(|| {
            let tmp = TempDir::new().expect("tmp");
            let _ = seeded_library(&tmp, 500);
        });
    });
}

fn bench_update_rewrite(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_rewrite");
    for n in [10usize, 100usize, 1000usize] {
        let tmp = TempDir::new().expect("tmp");
        let mut library = seeded_library(&tmp, n);
        let mut rating = 0u32;
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                rating = (rating + 1) % 11;
                library
                    .update(
                        n as u64,
                        GamePatch {
                            status: Some(Status::Playing),
                            rating: Some(rating),
                            ..GamePatch::default()
                        },
                    )
                    .expect("update");
            });
        });
    }
    group.finish();
}

fn bench_load(c: &mut Criterion) {
    let tmp = TempDir::new().expect("tmp");
    let library = seeded_library(&tmp, 5_000);
    let file = CsvGameFile::new(library.path());
    c.bench_function("load_5k_rows", |b| {
        b.iter(|| {
            let _ = file.load().expect("load");
        });
    });
}

criterion_group!(benches, bench_adds, bench_update_rewrite, bench_load);
criterion_main!(benches);
