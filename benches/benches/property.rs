// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for property resolution, standalone and through a `View`.

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use trellis::{ElementBuilder, View};
use trellis_property::{
    DependencyObject, DependencyObjectExt, ErasedValue, Precedence, Property,
    PropertyMetadataBuilder, PropertyRegistry, PropertyStore,
};

struct Elem {
    parent: Option<u32>,
    store: PropertyStore<u32>,
}

impl Elem {
    fn new(key: u32, parent: Option<u32>) -> Self {
        Self {
            parent,
            store: PropertyStore::new(key),
        }
    }
}

impl DependencyObject<u32> for Elem {
    fn property_store(&self) -> &PropertyStore<u32> {
        &self.store
    }

    fn property_store_mut(&mut self) -> &mut PropertyStore<u32> {
        &mut self.store
    }

    fn parent_key(&self) -> Option<u32> {
        self.parent
    }
}

fn no_parents<'a>(_: u32) -> Option<(&'a PropertyStore<u32>, Option<u32>)> {
    None
}

fn bench_store(c: &mut Criterion) {
    let mut registry = PropertyRegistry::new();
    let width: Property<f64> =
        registry.register("Width", PropertyMetadataBuilder::new(0.0_f64).build());
    let font_size: Property<f64> = registry.register(
        "FontSize",
        PropertyMetadataBuilder::new(12.0_f64).inherits(true).build(),
    );

    // 0 <- 1 <- ... <- N-1
    let chain_len: u32 = 16;
    let mut nodes: Vec<Elem> = (0..chain_len)
        .map(|i| Elem::new(i, if i == 0 { None } else { Some(i - 1) }))
        .collect();
    nodes[0].store.set_local(font_size, 16.0);
    let lookup = |key: u32| {
        nodes
            .get(key as usize)
            .map(|n| (&n.store, n.parent))
    };

    let mut group = c.benchmark_group("property/resolve");

    group.bench_function("local", |b| {
        let mut element = Elem::new(1, None);
        element.store.set_local(width, 100.0);
        b.iter(|| black_box(*element.get_value(width, &registry, &no_parents)));
    });

    group.bench_function("animated_over_local", |b| {
        let mut element = Elem::new(1, None);
        element.store.set_local(width, 100.0);
        element.store.set(width, Precedence::Animated, 200.0);
        b.iter(|| black_box(*element.get_value(width, &registry, &no_parents)));
    });

    group.bench_function("default", |b| {
        let element = Elem::new(1, None);
        b.iter(|| black_box(*element.get_value(width, &registry, &no_parents)));
    });

    group.bench_function(BenchmarkId::new("inherited", chain_len), |b| {
        let leaf = &nodes[(chain_len - 1) as usize];
        b.iter(|| black_box(*leaf.get_value(font_size, &registry, &lookup)));
    });
    group.finish();

    let mut group = c.benchmark_group("property/write");
    group.bench_function("set_notifying_changed", |b| {
        b.iter_batched(
            || Elem::new(1, None),
            |mut element| {
                black_box(element.write_erased(
                    &registry,
                    width.id(),
                    Precedence::Local,
                    Some(ErasedValue::new(10.0_f64)),
                    None,
                ))
            },
            BatchSize::SmallInput,
        );
    });
    group.bench_function("set_notifying_unchanged", |b| {
        let mut element = Elem::new(1, None);
        element.store.set_local(width, 10.0);
        b.iter(|| {
            black_box(element.write_erased(
                &registry,
                width.id(),
                Precedence::Local,
                Some(ErasedValue::new(10.0_f64)),
                None,
            ))
        });
    });
    group.finish();
}

fn bench_view(c: &mut Criterion) {
    let mut view = View::builder().build().unwrap();
    let props = *view.properties();
    let mut parent = view.root();
    view.set_value(parent, props.font_size, 18.0).unwrap();
    for _ in 0..16 {
        let child = view.create(ElementBuilder::new("Panel")).unwrap();
        view.add_child(parent, child).unwrap();
        parent = child;
    }
    let leaf = parent;

    let mut group = c.benchmark_group("view/property");
    group.bench_function("inherited_font_size_depth_16", |b| {
        b.iter(|| black_box(*view.get_value(leaf, props.font_size)));
    });
    group.bench_function("set_inherited_at_root", |b| {
        let mut size = 18.0;
        b.iter(|| {
            size += 1.0;
            view.set_value(view.root(), props.font_size, size).unwrap();
        });
    });
    group.finish();
}

criterion_group!(benches, bench_store, bench_view);
criterion_main!(benches);
