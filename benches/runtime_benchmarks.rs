//! Performance benchmarks for the object model
//!
//! Run with: cargo bench
//!
//! These benchmarks measure:
//! - Realm creation (intrinsics and built-in installation)
//! - Own and inherited property lookup
//! - Property assignment and definition
//! - Reflection built-ins over objects of growing width

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use quicksilver_objects::runtime::builtins::object;
use quicksilver_objects::runtime::json;
use quicksilver_objects::{ObjectRef, PartialDescriptor, PropertyKey, Realm, Value};

fn wide_object(realm: &Realm, width: usize) -> ObjectRef {
    let obj = realm.new_object();
    for i in 0..width {
        obj.put(realm, &PropertyKey::String(format!("p{}", i)), Value::from(i as f64), true)
            .unwrap();
    }
    obj
}

/// Benchmark: Realm creation
fn bench_realm_creation(c: &mut Criterion) {
    c.bench_function("realm_new", |b| b.iter(|| black_box(Realm::new())));
}

/// Benchmark: Property lookup
fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    let realm = Realm::new();
    let obj = wide_object(&realm, 64);
    let key = PropertyKey::from("p32");

    group.bench_function("own", |b| {
        b.iter(|| obj.get(&realm, black_box(&key)).unwrap())
    });

    // Deep chain: the key lives on the root
    let mut leaf = obj.clone();
    for _ in 0..16 {
        leaf = realm.new_object_with_prototype(Some(leaf));
    }
    group.bench_function("inherited_depth_16", |b| {
        b.iter(|| leaf.get(&realm, black_box(&key)).unwrap())
    });

    group.bench_function("missing_depth_16", |b| {
        let missing = PropertyKey::from("absent");
        b.iter(|| leaf.get(&realm, black_box(&missing)).unwrap())
    });
    group.finish();
}

/// Benchmark: Assignment and definition
fn bench_mutation(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutation");
    let realm = Realm::new();

    group.bench_function("put_existing", |b| {
        let obj = wide_object(&realm, 16);
        let key = PropertyKey::from("p8");
        b.iter(|| obj.put(&realm, &key, black_box(Value::from(1)), true).unwrap())
    });

    group.bench_function("define_fresh_100", |b| {
        b.iter(|| {
            let obj = realm.new_object();
            for i in 0..100 {
                obj.define_own_property(
                    &PropertyKey::String(format!("k{}", i)),
                    PartialDescriptor::new().with_value(i).with_enumerable(true),
                    true,
                )
                .unwrap();
            }
            obj
        })
    });
    group.finish();
}

/// Benchmark: Reflection built-ins
fn bench_reflection(c: &mut Criterion) {
    let mut group = c.benchmark_group("reflection");
    let realm = Realm::new();

    for width in [16usize, 256, 4096].iter() {
        let target = [Value::Object(wide_object(&realm, *width))];
        group.throughput(Throughput::Elements(*width as u64));
        group.bench_with_input(BenchmarkId::new("keys", width), width, |b, _| {
            b.iter(|| object::keys(&realm, &Value::Undefined, black_box(&target)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("entries", width), width, |b, _| {
            b.iter(|| object::entries(&realm, &Value::Undefined, black_box(&target)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("freeze", width), width, |b, &width| {
            b.iter(|| {
                let fresh = [Value::Object(wide_object(&realm, width))];
                object::freeze(&realm, &Value::Undefined, &fresh).unwrap()
            })
        });
        group.bench_with_input(BenchmarkId::new("stringify", width), width, |b, _| {
            b.iter(|| json::stringify(&realm, black_box(&target[0])).unwrap())
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_realm_creation,
    bench_lookup,
    bench_mutation,
    bench_reflection,
);

criterion_main!(benches);
