use criterion::{criterion_group, criterion_main, Criterion};
use perf_fmt::parsers::{
    parse_line, parse_text, JsRuntimeBenchParser, Provenance, ResultParser, RowLayout, WptParser,
};
use perf_fmt::CommitHash;
use std::hint::black_box;

const WITH_ISOLATE: &[u8] =
    b"  | With Isolate    |              850us  |               3  |               1084  |     72kb  |";
const WITHOUT_REALLOC: &[u8] =
    b"  | Without Isolate |              328us  |               2  |     24kb  |";

fn text_report() -> Vec<u8> {
    let mut report = String::new();
    for i in 0..6 {
        report.push_str(&format!("header line {}\n", i));
    }
    report.push_str(std::str::from_utf8(WITH_ISOLATE).unwrap());
    report.push_str("\n  |---------------|\n");
    report.push_str(std::str::from_utf8(WITHOUT_REALLOC).unwrap());
    report.push_str("\n\ntrailing notes\n");
    report.into_bytes()
}

fn wpt_report(tests: usize) -> Vec<u8> {
    let entries: Vec<String> = (0..tests)
        .map(|i| {
            format!(
                r#"{{"pass": true, "crash": {}, "name": "/t/{}.html", "cases": [{{"pass": true, "name": "a"}}, {{"pass": false, "name": "b", "message": "x"}}]}}"#,
                i % 50 == 0,
                i
            )
        })
        .collect();
    format!("[{}]", entries.join(",")).into_bytes()
}

fn bench_parse_line(c: &mut Criterion) {
    c.bench_function("text_parse_line", |b| {
        b.iter(|| black_box(parse_line(6, black_box(WITH_ISOLATE)).unwrap()));
    });

    c.bench_function("text_parse_line_without_realloc", |b| {
        b.iter(|| black_box(parse_line(8, black_box(WITHOUT_REALLOC)).unwrap()));
    });
}

fn bench_parse_text(c: &mut Criterion) {
    let report = text_report();
    let layout = RowLayout::current();

    c.bench_function("text_parse_report", |b| {
        b.iter(|| {
            black_box(
                parse_text("2022-11-07_22-58_0883be2_main.txt", black_box(&report), &layout)
                    .unwrap(),
            )
        });
    });
}

fn bench_json_parsers(c: &mut Criterion) {
    let provenance = Provenance::now(CommitHash::new("0883be2").unwrap());
    let bench = br#"[
        {"name": "With Isolate", "bench": {"duration": 850000, "alloc_size": 73728, "alloc_nb": 3, "realloc_nb": 1084, "free_nb": 0}},
        {"name": "Without Isolate", "bench": {"duration": 328000, "alloc_size": 24576, "alloc_nb": 2, "realloc_nb": 977, "free_nb": 0}}
    ]"#;
    let wpt = wpt_report(5000);

    c.bench_function("bench_jsruntime_parse", |b| {
        b.iter(|| black_box(JsRuntimeBenchParser.parse(&provenance, black_box(bench)).unwrap()));
    });

    c.bench_function("wpt_parse_5000_tests", |b| {
        b.iter(|| black_box(WptParser.parse(&provenance, black_box(&wpt)).unwrap()));
    });
}

criterion_group!(benches, bench_parse_line, bench_parse_text, bench_json_parsers);
criterion_main!(benches);
