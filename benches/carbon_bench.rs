use criterion::{black_box, criterion_group, criterion_main, Criterion};
use carbon::prelude::*;

fn parse_inputs() -> Vec<&'static str> {
    vec![
        "2020-08-05 13:14:15",
        "2020-08-05T13:14:15+08:00",
        "Wed, 05 Aug 2020 13:14:15 +0000",
        "2020/08/05",
        "20200805131415",
        "1596633255",
        "13:14:15",
    ]
}

fn parse_ok(inputs: &[&str]) {
    for input in inputs {
        let c = Carbon::parse(input);
        assert!(c.is_valid());
    }
}

fn format_inputs() -> Vec<&'static str> {
    vec![
        "Y-m-d H:i:s",
        "D, d M Y H:i:s O",
        r"l jK \o\f F Y h:i:s A",
        "Y年m月d日",
    ]
}

fn translate(inputs: &[&str]) {
    for input in inputs {
        let layout = format_to_layout(input);
        assert!(!layout.is_empty());
    }
}

fn render(c: &Carbon, inputs: &[&str]) {
    for input in inputs {
        assert!(!c.format(input).is_empty());
    }
}

fn travel(c: &Carbon) {
    let moved = c
        .add_months(1)
        .add_months_no_overflow(13)
        .sub_days(40)
        .add_duration("2h45m")
        .end_of_week();
    assert!(moved.is_valid());
}

fn criterion_benchmark(c: &mut Criterion) {
    let value = Carbon::parse("2020-01-31 13:14:15");
    let other = Carbon::parse("2023-07-04 01:02:03");

    c.bench_function("parse_ok", |b| b.iter(|| parse_ok(black_box(&parse_inputs()))));
    c.bench_function("format_to_layout", |b| b.iter(|| translate(black_box(&format_inputs()))));
    c.bench_function("format", |b| b.iter(|| render(black_box(&value), black_box(&format_inputs()))));
    c.bench_function("travel", |b| b.iter(|| travel(black_box(&value))));
    c.bench_function("diff_for_humans", |b| {
        b.iter(|| black_box(&value).diff_for_humans(Some(black_box(&other))))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
