// Copyright (c) 2026 Bountyy Oy. All rights reserved.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use csrf_fetch::{ajax_headers, read_cookie, HeaderSet, StaticCookies};

fn cookie_store() -> String {
    let mut store: Vec<String> = (0..30).map(|i| format!("pref_{}=value%20{}", i, i)).collect();
    store.push("csrftoken=Kq8s2l0GZ0vW9qg3yB1nT7mHc4xRfP5e".to_string());
    store.push("sessionid=9b2f1c3e7a".to_string());
    store.join("; ")
}

fn cookie_reader_benchmark(c: &mut Criterion) {
    let store = cookie_store();

    c.bench_function("read_cookie_last", |b| {
        b.iter(|| read_cookie(black_box(Some(store.as_str())), black_box("sessionid")))
    });

    c.bench_function("read_cookie_missing", |b| {
        b.iter(|| read_cookie(black_box(Some(store.as_str())), black_box("absent")))
    });
}

fn header_builder_benchmark(c: &mut Criterion) {
    let cookies = StaticCookies::new(cookie_store());
    let overrides = HeaderSet::new()
        .with("Content-Type", "text/plain")
        .with("Accept", "application/json");

    c.bench_function("ajax_headers_merge", |b| {
        b.iter(|| ajax_headers(black_box(&cookies)).merge(black_box(&overrides)))
    });
}

criterion_group!(benches, cookie_reader_benchmark, header_builder_benchmark);
criterion_main!(benches);
