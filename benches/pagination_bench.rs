// ABOUTME: Criterion benchmarks for the cursor codec and the list query planner
// ABOUTME: Measures encode/decode throughput and page assembly over a seeded store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Kitchen

use std::collections::BTreeMap;

use chrono::{Duration, Utc};
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use tokio::runtime::Runtime;
use uuid::Uuid;

use ladle::models::{Difficulty, Language, Recipe, RecipeRecord};
use ladle::pagination::{Cursor, SortOrder};
use ladle::services::listing::{list_recipes, ListQuery};
use ladle::store::InMemoryRecipeStore;

const STORE_SIZE: usize = 1_000;

fn sample_record(idx: usize) -> RecipeRecord {
    let recipe = Recipe {
        title: format!("Benchmark Recipe {idx}"),
        summary: Some("A seeded recipe for pagination benchmarks.".to_owned()),
        description: None,
        prep_time_minutes: 10,
        cook_time_minutes: 20,
        servings: 4,
        difficulty: Difficulty::Easy,
        cuisine: Some("Benchmark".to_owned()),
        ingredients: vec!["1 unit of ingredient".to_owned()],
        instructions: vec!["Combine and cook.".to_owned()],
        tags: if idx % 2 == 0 {
            vec!["even".to_owned()]
        } else {
            vec!["odd".to_owned()]
        },
        dietary_info: BTreeMap::new(),
        nutrition: BTreeMap::new(),
    };
    RecipeRecord::new(recipe, Language::En)
        .with_created_at(Utc::now() - Duration::minutes(idx as i64))
}

fn seeded_store() -> InMemoryRecipeStore {
    InMemoryRecipeStore::with_records((0..STORE_SIZE).map(sample_record).collect())
}

fn bench_cursor_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("cursor_codec");

    let ts = Utc::now();
    let id = Uuid::new_v4();

    group.bench_function("encode", |b| {
        b.iter(|| Cursor::new(std::hint::black_box(ts), std::hint::black_box(id)));
    });

    let cursor = Cursor::new(ts, id);
    group.bench_function("decode", |b| {
        b.iter_batched(
            || cursor.clone(),
            |cursor| cursor.decode().expect("valid cursor"),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_list_pages(c: &mut Criterion) {
    let rt = Runtime::new().expect("tokio runtime");
    let store = seeded_store();

    let mut group = c.benchmark_group("list_recipes");

    group.bench_function("first_page_recent", |b| {
        b.to_async(&rt).iter(|| async {
            list_recipes(&store, ListQuery::new().with_limit(20))
                .await
                .expect("first page")
        });
    });

    // Resume from the middle of the dataset via a real cursor
    let middle = sample_record(STORE_SIZE / 2);
    let token = Cursor::new(middle.created_at, middle.id).as_str().to_owned();
    group.bench_function("middle_page_by_cursor", |b| {
        b.to_async(&rt).iter(|| async {
            list_recipes(
                &store,
                ListQuery::new().with_limit(20).with_cursor(token.clone()),
            )
            .await
            .expect("cursor page")
        });
    });

    group.bench_function("filtered_tag_page", |b| {
        b.to_async(&rt).iter(|| async {
            list_recipes(
                &store,
                ListQuery::new()
                    .with_limit(20)
                    .with_sort(SortOrder::Oldest)
                    .with_tags(vec!["even".to_owned()]),
            )
            .await
            .expect("filtered page")
        });
    });

    group.finish();
}

criterion_group!(benches, bench_cursor_codec, bench_list_pages);
criterion_main!(benches);
