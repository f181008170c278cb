use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use minicsv::csv::parse_str;
use minicsv::{index, read_csv, to_string, write_csv, Dialect, KeyErrors, Table};
use tempfile::NamedTempFile;

fn sample_table(size: usize) -> Table {
    let mut table = Table::new();
    table.push(["ID", "Name", "Note"]);
    for i in 0..size {
        table.push([
            i.to_string(),
            format!("Name_{}", i),
            format!("says \"hi\", {}", i * 100),
        ]);
    }
    table
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [1000, 10000, 100000].iter() {
        let text = to_string(&sample_table(*size), Dialect::default());
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| black_box(parse_str(text, Dialect::default())));
        });
    }

    group.finish();
}

fn benchmark_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for size in [1000, 10000, 100000].iter() {
        let table = sample_table(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &table, |b, table| {
            b.iter(|| black_box(to_string(table, Dialect::default())));
        });
    }

    group.finish();
}

fn benchmark_file_roundtrip(c: &mut Criterion) {
    let table = sample_table(10000);

    c.bench_function("file_roundtrip_10000_rows", |b| {
        b.iter(|| {
            let temp = NamedTempFile::new().unwrap();
            write_csv(&table, temp.path()).unwrap();
            black_box(read_csv(temp.path()).unwrap());
        });
    });
}

fn benchmark_index(c: &mut Criterion) {
    let mut table = sample_table(10000);
    table.remove_header();

    c.bench_function("group_by_int_10000_rows", |b| {
        b.iter(|| black_box(index::group_by_int(&table, 0, KeyErrors::Fail).unwrap().len()));
    });
}

criterion_group!(
    benches,
    benchmark_parse,
    benchmark_encode,
    benchmark_file_roundtrip,
    benchmark_index
);
criterion_main!(benches);
