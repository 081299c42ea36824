use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use treemap_rs::api::{TooltipContext, format_tooltip};
use treemap_rs::core::{ContentItem, FallbackLabels, WordTotals, build_hierarchy};

fn labels() -> FallbackLabels {
    FallbackLabels {
        unknown_country: "Unknown".to_owned(),
        unnamed_set: "No set".to_owned(),
    }
}

fn generate_items(count: usize) -> Vec<ContentItem> {
    const COUNTRIES: [&str; 8] = ["FR", "DE", "SE", "ES", "IT", "PT", "NL", "PL"];
    (0..count)
        .map(|i| {
            let country = COUNTRIES[i % COUNTRIES.len()];
            let set = format!("set-{}", i % 40);
            let mut item = ContentItem::new(country, set, (i as u64 % 900) + 20);
            if i % 97 == 0 {
                item.country = None;
            }
            item
        })
        .collect()
}

fn bench_build_hierarchy_10k(c: &mut Criterion) {
    let items = generate_items(10_000);
    let labels = labels();

    c.bench_function("build_hierarchy_10k", |b| {
        b.iter(|| {
            let hierarchy = build_hierarchy(black_box(&items), &labels).expect("build");
            black_box(hierarchy.totals.word_count)
        })
    });
}

fn bench_tooltip_format(c: &mut Criterion) {
    let totals = WordTotals {
        word_count: 4_812_330,
        item_count: 10_000,
    };
    let context = TooltipContext::new("set-17", 51_204, 250, totals).with_ancestor("FR");

    c.bench_function("tooltip_format", |b| {
        b.iter(|| black_box(format_tooltip(black_box(&context))))
    });
}

criterion_group!(benches, bench_build_hierarchy_10k, bench_tooltip_format);
criterion_main!(benches);
