use balanced_collections::avl_tree::AvlTree;
use balanced_collections::binomial_heap::BinomialHeap;
use balanced_collections::comparator::natural_order;
use balanced_collections::rb_tree::RbTree;
use balanced_collections::util::{gen_shuffled_range, gen_uniform_vec};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn insert_benchmarks(c: &mut Criterion) {
    c.bench_function("avl_insert_10000", |b| {
        let values = gen_uniform_vec(10000);
        b.iter(|| {
            let mut tree = AvlTree::<i64>::new(natural_order);
            for value in &values {
                tree.insert(black_box(*value));
            }
        });
    });

    c.bench_function("rb_insert_10000", |b| {
        let values = gen_uniform_vec(10000);
        b.iter(|| {
            let mut tree = RbTree::<i64>::new(natural_order);
            for value in &values {
                tree.insert(black_box(*value));
            }
        });
    });

    c.bench_function("binomial_insert_10000", |b| {
        let values = gen_uniform_vec(10000);
        b.iter(|| {
            let mut heap = BinomialHeap::<i64>::min_heap(natural_order, i64::MAX);
            for value in &values {
                heap.insert(black_box(*value));
            }
        });
    });
}

fn churn_benchmarks(c: &mut Criterion) {
    c.bench_function("avl_insert_remove_1000", |b| {
        let values = gen_shuffled_range(1000);
        b.iter(|| {
            let mut tree = AvlTree::<i64>::new(natural_order);
            for value in &values {
                tree.insert(*value);
            }
            for value in &values {
                tree.remove(black_box(value));
            }
        });
    });

    c.bench_function("rb_insert_remove_1000", |b| {
        let values = gen_shuffled_range(1000);
        b.iter(|| {
            let mut tree = RbTree::<i64>::new(natural_order);
            for value in &values {
                tree.insert(*value);
            }
            for value in &values {
                tree.remove(black_box(value));
            }
        });
    });

    c.bench_function("binomial_drain_1000", |b| {
        let values = gen_shuffled_range(1000);
        b.iter(|| {
            let mut heap = BinomialHeap::<i64>::min_heap(natural_order, i64::MAX);
            for value in &values {
                heap.insert(*value);
            }
            while let Some(value) = heap.extract() {
                black_box(value);
            }
        });
    });
}

criterion_group!(benches, insert_benchmarks, churn_benchmarks);
criterion_main!(benches);
