use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use initext::{ConfigSet, Dialect, IniDocument};

fn sample_document(sections: usize, keys_per_section: usize) -> String {
    let mut text = String::from("; benchmark fixture\n");
    for s in 0..sections {
        text.push_str(&format!("[section{s}]\n"));
        for k in 0..keys_per_section {
            text.push_str(&format!("key{k} = value-{s}-{k} ; comment\n"));
        }
        text.push('\n');
    }
    text
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_document");

    for sections in [10, 50, 200] {
        let text = sample_document(sections, 20);
        group.bench_with_input(
            BenchmarkId::from_parameter(sections),
            &text,
            |b, text| b.iter(|| IniDocument::from_str(black_box(text)).unwrap()),
        );
    }
    group.finish();
}

fn benchmark_serialize(c: &mut Criterion) {
    let doc = IniDocument::from_str(&sample_document(50, 20)).unwrap();

    c.bench_function("serialize_document", |b| {
        b.iter(|| black_box(&doc).to_string())
    });
}

fn benchmark_parse_dialects(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_dialects");
    let standard = sample_document(20, 20);
    let python = standard.replace(" = ", ": ").replace("; ", "# ");

    group.bench_function("standard", |b| {
        b.iter(|| IniDocument::from_str(black_box(&standard)).unwrap())
    });
    group.bench_function("python_style", |b| {
        b.iter(|| {
            IniDocument::from_str_with_dialect(black_box(&python), Dialect::python_style())
                .unwrap()
        })
    });
    group.finish();
}

fn benchmark_expand_all(c: &mut Criterion) {
    let mut text = String::from("[base]\nroot = /srv/app\n");
    for i in 0..200 {
        text.push_str(&format!("[svc{i}]\nhome = ${{base|root}}/svc{i}\n"));
    }
    let doc = IniDocument::from_str(&text).unwrap();

    c.bench_function("expand_all_200_configs", |b| {
        b.iter(|| {
            let mut set = ConfigSet::from_document(black_box(&doc));
            set.expand_all().unwrap();
            set
        })
    });
}

criterion_group!(
    benches,
    benchmark_parse,
    benchmark_serialize,
    benchmark_parse_dialects,
    benchmark_expand_all
);
criterion_main!(benches);
