use core::hash::BuildHasherDefault;
use core::hash::Hash;
use core::hint::black_box;
use std::collections::HashMap as StdHashMap;

use criterion::AxisScale;
use criterion::BatchSize;
use criterion::Criterion;
use criterion::PlotConfiguration;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use dhash_map::HashMap as DHashMap;
use dhash_map::MapConfig;
use hashbrown::HashMap as HashbrownHashMap;
use rand::Rng;
use rand::SeedableRng;
use rand::TryRngCore;
use rand::rngs::OsRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use siphasher::sip::SipHasher;

/// Every map hashes with the same function so only the table layout differs.
type Builder = BuildHasherDefault<SipHasher>;

trait BenchKey: Clone + Hash + Eq {
    fn new(key: u64) -> Self;
}

#[derive(Clone, Hash, PartialEq, Eq)]
struct StringKey(String);

impl BenchKey for StringKey {
    fn new(key: u64) -> Self {
        black_box(Self(format!("key_{:016X}", key)))
    }
}

#[derive(Clone, Hash, PartialEq, Eq)]
struct SmallKey(u64);

impl BenchKey for SmallKey {
    fn new(key: u64) -> Self {
        black_box(Self(key))
    }
}

const SIZES: &[usize] = &[
    (1 << 10),
    (1 << 11),
    (1 << 12),
    (1 << 13),
    (1 << 14),
    (1 << 15),
    (1 << 16),
];

fn new_dhash<K: BenchKey>() -> DHashMap<K, u64, Builder> {
    DHashMap::with_hasher(Builder::default())
}

fn random_keys<K: BenchKey>(count: usize) -> Vec<K> {
    let mut rng = OsRng;
    (0..count)
        .map(|_| K::new(rng.try_next_u64().unwrap()))
        .collect()
}

fn shuffled<T: Clone>(items: &[T]) -> Vec<T> {
    let mut items = items.to_vec();
    items.shuffle(&mut SmallRng::from_os_rng());
    items
}

fn bench_insert_random<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!(
        "insert_random_{}",
        core::any::type_name::<K>()
    ));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES[..=MAX_SIZE].iter().copied() {
        let keys = random_keys::<K>(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("dhash_map/{size}"), |b| {
            b.iter_batched(
                || shuffled(&keys),
                |keys| {
                    let mut map = new_dhash::<K>();
                    for (i, key) in keys.into_iter().enumerate() {
                        black_box(map.insert(key, i as u64));
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || shuffled(&keys),
                |keys| {
                    let mut map = HashbrownHashMap::with_hasher(Builder::default());
                    for (i, key) in keys.into_iter().enumerate() {
                        black_box(map.insert(key, i as u64));
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("std/{size}"), |b| {
            b.iter_batched(
                || shuffled(&keys),
                |keys| {
                    let mut map = StdHashMap::with_hasher(Builder::default());
                    for (i, key) in keys.into_iter().enumerate() {
                        black_box(map.insert(key, i as u64));
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_insert_load_factors<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!(
        "insert_load_factor_{}",
        core::any::type_name::<K>()
    ));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES[..=MAX_SIZE].iter().copied() {
        let keys = random_keys::<K>(size);
        group.throughput(Throughput::Elements(size as u64));

        for load_factor in [0.5f32, 0.75, 0.9] {
            let config = MapConfig::default()
                .with_load_factor(load_factor)
                .unwrap();
            group.bench_function(format!("dhash_map_{load_factor}/{size}"), |b| {
                b.iter_batched(
                    || shuffled(&keys),
                    |keys| {
                        let mut map: DHashMap<K, u64, Builder> =
                            DHashMap::with_config_and_hasher(config, Builder::default());
                        for (i, key) in keys.into_iter().enumerate() {
                            black_box(map.insert(key, i as u64));
                        }
                        black_box(map)
                    },
                    BatchSize::SmallInput,
                )
            });
        }
    }

    group.finish();
}

fn bench_find_hit_miss<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!(
        "find_hit_miss_{}",
        core::any::type_name::<K>()
    ));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES[..=MAX_SIZE].iter().copied() {
        let present = (0..size as u64 * 2).step_by(2).map(K::new).collect::<Vec<_>>();
        let probes = shuffled(&(0..size as u64 * 2).map(K::new).collect::<Vec<_>>());

        let mut dhash = new_dhash::<K>();
        let mut hashbrown = HashbrownHashMap::with_hasher(Builder::default());
        let mut std_map = StdHashMap::with_hasher(Builder::default());
        for (i, key) in present.iter().enumerate() {
            dhash.insert(key.clone(), i as u64);
            hashbrown.insert(key.clone(), i as u64);
            std_map.insert(key.clone(), i as u64);
        }

        group.throughput(Throughput::Elements(probes.len() as u64));
        group.bench_function(format!("dhash_map/{size}"), |b| {
            b.iter(|| {
                for key in probes.iter() {
                    black_box(dhash.get(key));
                }
            })
        });
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter(|| {
                for key in probes.iter() {
                    black_box(hashbrown.get(key));
                }
            })
        });
        group.bench_function(format!("std/{size}"), |b| {
            b.iter(|| {
                for key in probes.iter() {
                    black_box(std_map.get(key));
                }
            })
        });
    }

    group.finish();
}

fn bench_remove<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("remove_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES[..=MAX_SIZE].iter().copied() {
        let keys = random_keys::<K>(size);
        let mut dhash = new_dhash::<K>();
        let mut hashbrown = HashbrownHashMap::with_hasher(Builder::default());
        for (i, key) in keys.iter().enumerate() {
            dhash.insert(key.clone(), i as u64);
            hashbrown.insert(key.clone(), i as u64);
        }

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("dhash_map/{size}"), |b| {
            b.iter_batched(
                || (dhash.clone(), shuffled(&keys)),
                |(mut map, keys)| {
                    for key in keys.iter() {
                        black_box(map.remove(key));
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || (hashbrown.clone(), shuffled(&keys)),
                |(mut map, keys)| {
                    for key in keys.iter() {
                        black_box(map.remove(key));
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_iteration<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("iteration_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES[..=MAX_SIZE].iter().copied() {
        let keys = random_keys::<K>(size);
        let mut dhash = new_dhash::<K>();
        let mut hashbrown = HashbrownHashMap::with_hasher(Builder::default());
        for (i, key) in keys.iter().enumerate() {
            dhash.insert(key.clone(), i as u64);
            hashbrown.insert(key.clone(), i as u64);
        }

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("dhash_map/{size}"), |b| {
            b.iter(|| black_box(dhash.values().sum::<u64>()))
        });
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter(|| black_box(hashbrown.values().sum::<u64>()))
        });
    }

    group.finish();
}

/// Insert-or-remove over a shuffled stream where every key appears twice,
/// leaving plenty of tombstones behind.
fn bench_churn<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("churn_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES[..=MAX_SIZE].iter().copied() {
        let stream = (0..size as u64)
            .flat_map(|i| {
                let key = K::new(i);
                [key.clone(), key]
            })
            .collect::<Vec<_>>();

        group.throughput(Throughput::Elements(stream.len() as u64));
        group.bench_function(format!("dhash_map/{size}"), |b| {
            b.iter_batched(
                || shuffled(&stream),
                |stream| {
                    let mut map = new_dhash::<K>();
                    for key in stream {
                        match map.entry(key) {
                            dhash_map::Entry::Vacant(entry) => {
                                black_box(entry.insert(0));
                            }
                            dhash_map::Entry::Occupied(entry) => {
                                black_box(entry.remove());
                            }
                        }
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || shuffled(&stream),
                |stream| {
                    let mut map = HashbrownHashMap::with_hasher(Builder::default());
                    for key in stream {
                        match map.entry(key) {
                            hashbrown::hash_map::Entry::Vacant(entry) => {
                                black_box(entry.insert(0u64));
                            }
                            hashbrown::hash_map::Entry::Occupied(entry) => {
                                black_box(entry.remove());
                            }
                        }
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

/// Word-count style accumulation through `merge`, against the entry API of
/// the other maps.
fn bench_merge_counts<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("merge_counts_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES[..=MAX_SIZE].iter().copied() {
        let mut rng = SmallRng::from_os_rng();
        let distinct = (size / 8).max(1) as u64;
        let stream = (0..size)
            .map(|_| K::new(rng.random_range(0..distinct)))
            .collect::<Vec<_>>();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("dhash_map/{size}"), |b| {
            b.iter(|| {
                let mut map = new_dhash::<K>();
                for key in stream.iter() {
                    map.merge(key.clone(), 1, |old, new| Some(old + new));
                }
                black_box(map)
            })
        });
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter(|| {
                let mut map = HashbrownHashMap::with_hasher(Builder::default());
                for key in stream.iter() {
                    *map.entry(key.clone()).or_insert(0u64) += 1;
                }
                black_box(map)
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insert_random::<SmallKey, 6>,
    bench_insert_random::<StringKey, 6>,
    bench_insert_load_factors::<SmallKey, 4>,
    bench_find_hit_miss::<SmallKey, 6>,
    bench_find_hit_miss::<StringKey, 6>,
    bench_remove::<SmallKey, 6>,
    bench_remove::<StringKey, 6>,
    bench_iteration::<SmallKey, 6>,
    bench_churn::<SmallKey, 6>,
    bench_churn::<StringKey, 6>,
    bench_merge_counts::<SmallKey, 6>,
    bench_merge_counts::<StringKey, 6>,
);

criterion_main!(benches);
