//! Performance benchmarks for digestcheck
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use digestcheck::config::HashAlgorithm;
use digestcheck::hash::{hash_bytes, DigestEngine, DigestRequest};
use std::fs::File;
use std::io::Write;
use tempfile::TempDir;

/// Create a test file of the specified size
fn create_test_file(dir: &std::path::Path, name: &str, size: usize) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut file = File::create(&path).unwrap();

    let chunk_size = 64 * 1024;
    let chunk: Vec<u8> = (0..chunk_size).map(|i| (i % 256) as u8).collect();
    let mut remaining = size;

    while remaining > 0 {
        let to_write = remaining.min(chunk_size);
        file.write_all(&chunk[..to_write]).unwrap();
        remaining -= to_write;
    }

    path
}

fn bench_hash_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash_algorithms");
    let size = 1024 * 1024;
    let data: Vec<u8> = (0..size).map(|i| (i % 256) as u8).collect();

    group.throughput(Throughput::Bytes(size as u64));
    for algo in HashAlgorithm::ALL {
        group.bench_with_input(BenchmarkId::new("hash", algo.name()), &data, |b, data| {
            b.iter(|| black_box(hash_bytes(data, algo)));
        });
    }

    group.finish();
}

fn bench_chunk_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("file_chunk_size");
    let dir = TempDir::new().unwrap();
    let size = 16 * 1024 * 1024;
    let path = create_test_file(dir.path(), "large.bin", size);
    let request = DigestRequest::new(&path, HashAlgorithm::Sha256);

    group.throughput(Throughput::Bytes(size as u64));
    for chunk_size in [4 * 1024, 64 * 1024, 1024 * 1024] {
        group.bench_with_input(
            BenchmarkId::new("sha256", humansize::format_size(chunk_size as u64, humansize::BINARY)),
            &chunk_size,
            |b, &chunk_size| {
                let engine = DigestEngine::new().with_chunk_size(chunk_size);
                b.iter(|| black_box(engine.compute(&request).unwrap()));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_hash_algorithms, bench_chunk_sizes);
criterion_main!(benches);
