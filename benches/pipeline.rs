use beneficiary_browser::dataset::record::{
    ALAMAT_LENGKAP, JENIS_BANTUAN, LINK_GPS, NAMA, NIK, RT, RW, WILAYAH,
};
use beneficiary_browser::dataset::{parse_csv, Record};
use beneficiary_browser::filter::{apply_filters, derive_options, Dimension, FilterSelection};
use beneficiary_browser::render::table::render;
use beneficiary_browser::search::{live_search, strict_search, MIN_SEARCH_LENGTH};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

const REGIONS: [&str; 6] = ["Utara", "Selatan", "Timur", "Barat", "Tengah", "Pesisir"];
const AID_KINDS: [&str; 4] = ["PKH", "BPNT", "BLT", "PBI"];

fn generate_records(count: usize, seed: u64) -> Vec<Record> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let nik: u64 = rng.gen_range(3_200_000_000_000_000..3_299_999_999_999_999);
            let mut record = Record::new()
                .with(NAMA, format!("Warga {i}"))
                .with(ALAMAT_LENGKAP, format!("Jl. Mawar No. {}", rng.gen_range(1..200)))
                .with(JENIS_BANTUAN, AID_KINDS[rng.gen_range(0..AID_KINDS.len())])
                .with(WILAYAH, REGIONS[rng.gen_range(0..REGIONS.len())])
                .with(RW, rng.gen_range(1..15i64))
                .with(RT, format!("{:02}", rng.gen_range(1..30)))
                .with(NIK, nik.to_string());
            if rng.gen_bool(0.8) {
                record.insert(LINK_GPS, format!("https://maps.google.com/?q={i}"));
            }
            record
        })
        .collect()
}

fn records_to_csv(records: &[Record]) -> Vec<u8> {
    let fields = [NAMA, ALAMAT_LENGKAP, JENIS_BANTUAN, WILAYAH, RW, RT, NIK, LINK_GPS];
    let mut out = fields.join(",");
    out.push('\n');
    for record in records {
        let row: Vec<String> = fields
            .iter()
            .map(|field| record.text_or_empty(field))
            .collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out.into_bytes()
}

fn bench_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("filtering");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(3));

    for size in [1_000, 10_000, 50_000] {
        let records = generate_records(size, 42);

        group.bench_with_input(BenchmarkId::new("derive_options", size), &records, |b, r| {
            b.iter(|| black_box(derive_options(r)))
        });

        let mut selection = FilterSelection::all();
        selection.set(Dimension::Region, Some("Utara".to_string()));
        selection.set(Dimension::Rw, Some("3".to_string()));
        group.bench_with_input(BenchmarkId::new("apply_filters", size), &records, |b, r| {
            b.iter(|| black_box(apply_filters(r, &selection)))
        });
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(3));

    let records = generate_records(50_000, 7);
    let prefix = records[123].text_or_empty(NIK)[..10].to_string();

    group.bench_function("live_prefix", |b| {
        b.iter(|| black_box(live_search(&records, &prefix[..4])))
    });
    group.bench_function("strict_full", |b| {
        b.iter(|| black_box(strict_search(&records, &prefix, MIN_SEARCH_LENGTH)))
    });

    group.finish();
}

fn bench_load_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("load_and_render");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(5));

    let records = generate_records(10_000, 99);
    let csv = records_to_csv(&records);
    group.bench_function("parse_csv_10k", |b| {
        b.iter(|| black_box(parse_csv(&csv).expect("valid csv")))
    });

    let refs: Vec<&Record> = records.iter().collect();
    group.bench_function("render_10k", |b| b.iter(|| black_box(render(&refs))));

    group.finish();
}

criterion_group!(benches, bench_filtering, bench_search, bench_load_and_render);
criterion_main!(benches);
