// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for localized content resolution.
//!
//! Compares a cache hit against a cold resolution of an embedded page.

use criterion::{criterion_group, criterion_main, Criterion};
use showcase::content::{resolve, CacheConfig, ContentClient, LocaleContent, MarkdownPage};
use std::hint::black_box;
use std::sync::Arc;

fn bench_resolve(c: &mut Criterion) {
    let content = MarkdownPage::Config.load().expect("embedded page");
    c.bench_function("resolve_pt_br", |b| {
        b.iter(|| resolve(black_box("pt-BR"), black_box(&content)));
    });
}

fn bench_cached_fetch(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");
    let content = Arc::new(MarkdownPage::Zod.load().expect("embedded page"));

    let client = ContentClient::new(CacheConfig::default());
    runtime.block_on(client.posts("pt-BR", Arc::clone(&content)));
    c.bench_function("content_cache_hit", |b| {
        b.iter(|| runtime.block_on(client.posts(black_box("pt-BR"), Arc::clone(&content))));
    });

    c.bench_function("content_cache_cold", |b| {
        b.iter(|| {
            let client = ContentClient::new(CacheConfig::default());
            let content = Arc::new(LocaleContent::new("A", "B"));
            runtime.block_on(client.posts(black_box("en-US"), content))
        });
    });
}

criterion_group!(benches, bench_resolve, bench_cached_fetch);
criterion_main!(benches);
