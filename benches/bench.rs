use criterion::*;
use parking_lot::Mutex;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rwskl::{sync::SkipMap, Options};
use std::{
  collections::*,
  sync::{atomic::*, *},
  thread,
};

const PRELOAD: u64 = 100_000;

fn skiplist_round(l: &SkipMap<u64, u64>, case: &(u64, bool)) {
  if case.1 {
    if let Some(v) = l.get(&case.0) {
      assert_eq!(v, case.0);
    }
  } else {
    l.insert(case.0, case.0);
  }
}

fn map_round(m: &Mutex<BTreeMap<u64, u64>>, case: &(u64, bool)) {
  let mut m = m.lock();
  if case.1 {
    if let Some(v) = m.get(&case.0) {
      assert_eq!(*v, case.0);
    }
  } else {
    m.insert(case.0, case.0);
  }
}

fn preloaded_skiplist() -> Arc<SkipMap<u64, u64>> {
  let list = SkipMap::with_options(Options::new().with_seed(2)).unwrap();
  for i in 0..PRELOAD {
    list.insert(i * 2, i * 2);
  }
  Arc::new(list)
}

fn bench_read_write_skiplist_frac(b: &mut Bencher<'_>, frac: &usize) {
  let frac = *frac;
  let list = preloaded_skiplist();
  let l = list.clone();
  let stop = Arc::new(AtomicBool::new(false));
  let s = stop.clone();
  let j = thread::spawn(move || {
    let mut rng = StdRng::seed_from_u64(1);
    while !s.load(Ordering::SeqCst) {
      let case = (rng.random_range(0..PRELOAD * 2), frac > rng.random_range(0..11));
      skiplist_round(&l, &case);
    }
  });
  let mut rng = StdRng::seed_from_u64(0);
  b.iter_batched_ref(
    || (rng.random_range(0..PRELOAD * 2), frac > rng.random_range(0..11)),
    |case| skiplist_round(&list, case),
    BatchSize::SmallInput,
  );
  stop.store(true, Ordering::SeqCst);
  j.join().unwrap();
}

fn bench_read_write_map_frac(b: &mut Bencher<'_>, frac: &usize) {
  let frac = *frac;
  let map = Arc::new(Mutex::new(
    (0..PRELOAD)
      .map(|i| (i * 2, i * 2))
      .collect::<BTreeMap<_, _>>(),
  ));
  let m = map.clone();
  let stop = Arc::new(AtomicBool::new(false));
  let s = stop.clone();
  let h = thread::spawn(move || {
    let mut rng = StdRng::seed_from_u64(1);
    while !s.load(Ordering::SeqCst) {
      let case = (rng.random_range(0..PRELOAD * 2), frac > rng.random_range(0..11));
      map_round(&m, &case);
    }
  });
  let mut rng = StdRng::seed_from_u64(0);
  b.iter_batched_ref(
    || (rng.random_range(0..PRELOAD * 2), frac > rng.random_range(0..11)),
    |case| map_round(&map, case),
    BatchSize::SmallInput,
  );
  stop.store(true, Ordering::SeqCst);
  h.join().unwrap();
}

fn bench_read_write_skiplist(c: &mut Criterion) {
  let mut group = c.benchmark_group("skiplist_read_write");
  for i in [0, 5, 10] {
    group.bench_with_input(
      BenchmarkId::from_parameter(i),
      &i,
      bench_read_write_skiplist_frac,
    );
  }
  group.finish();
}

fn bench_read_write_map(c: &mut Criterion) {
  let mut group = c.benchmark_group("btree_map_read_write");
  for i in [0, 5, 10] {
    group.bench_with_input(
      BenchmarkId::from_parameter(i),
      &i,
      bench_read_write_map_frac,
    );
  }
  group.finish();
}

fn bench_insert_pop(c: &mut Criterion) {
  let list = preloaded_skiplist();
  let target = PRELOAD + 1;
  c.bench_function("skiplist_insert_pop", |b| {
    b.iter(|| {
      list.insert(target, target);
      black_box(list.pop(&target));
    })
  });
}

fn bench_search(c: &mut Criterion) {
  let list = preloaded_skiplist();
  let mut rng = StdRng::seed_from_u64(3);
  c.bench_function("skiplist_search", |b| {
    b.iter_batched(
      || rng.random_range(0..PRELOAD * 2),
      |k| black_box(list.search(&k).map(|v| *v)),
      BatchSize::SmallInput,
    )
  });
}

criterion_group!(
  benches,
  bench_read_write_skiplist,
  bench_read_write_map,
  bench_insert_pop,
  bench_search,
);
criterion_main!(benches);
