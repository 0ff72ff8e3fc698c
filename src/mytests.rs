use crate::action::{insert, insert_copies, insert_range};
use crate::alloc::Budget;
use crate::container::SequenceContainer;
use crate::cursor::{Counted, Forward, SliceCursor};
use crate::flat_set::FlatSet;
use crate::search::{equal_range, equal_range_n};
use crate::source::{Exact, Uncounted};
use crate::vec::Vec;
use crate::{print_memory, Error, TryReserveErrorKind};

use rand::Rng;

const REP: usize = if cfg!(miri) { 2 } else { 100 };
const N: usize = if cfg!(miri) { 100 } else { 10000 };

/// Vector that remembers every capacity it was asked to reserve.
struct Recording {
    v: Vec<i32>,
    reserved: std::vec::Vec<usize>,
}

impl Recording {
    fn new() -> Self {
        Self {
            v: Vec::new(),
            reserved: std::vec::Vec::new(),
        }
    }
}

impl SequenceContainer for Recording {
    type Value = i32;
    const RANDOM_ACCESS: bool = true;
    const RESERVABLE: bool = true;

    fn len(&self) -> usize {
        self.v.len()
    }
    fn max_size(&self) -> usize {
        self.v.max_size()
    }
    fn capacity(&self) -> usize {
        self.v.capacity()
    }
    fn reserve_total(&mut self, capacity: usize) -> Result<(), Error> {
        self.reserved.push(capacity);
        self.v.reserve_total(capacity)
    }
    fn insert_at(&mut self, index: usize, value: i32) -> Result<usize, Error> {
        self.v.insert_at(index, value)
    }
    fn insert_iter_at<I>(&mut self, index: usize, iter: I) -> Result<usize, Error>
    where
        I: Iterator<Item = i32>,
    {
        self.v.insert_iter_at(index, iter)
    }
}

#[test]
fn value_then_range_at_end() {
    let mut v = Vec::new();
    assert_eq!(insert(&mut v, 42).unwrap(), 0);
    let end = v.len();
    assert_eq!(insert_range(&mut v, end, [1, 2, 3]).unwrap(), 1);
    assert_eq!(&v[..], &[42, 1, 2, 3]);

    insert_range(&mut v, 0, 0..3).unwrap();
    assert_eq!(&v[..], &[0, 1, 2, 42, 1, 2, 3]);
    insert_range(&mut v, 3, [9, 8, 7]).unwrap();
    assert_eq!(&v[..], &[0, 1, 2, 9, 8, 7, 42, 1, 2, 3]);
    insert_range(&mut v, 1, [9, 8, 7]).unwrap();
    assert_eq!(&v[..], &[0, 9, 8, 7, 1, 2, 9, 8, 7, 42, 1, 2, 3]);
}

#[test]
fn same_results_from_every_payload_kind() {
    let src = [9, 8, 7];
    let list: std::collections::LinkedList<i32> = src.iter().copied().collect();
    let mut results = std::vec::Vec::new();
    for kind in 0..5 {
        let mut v: Vec<i32> = Vec::from(&[0, 1, 2][..]);
        match kind {
            0 => insert_range(&mut v, 1, src),
            1 => insert_range(&mut v, 1, &src[..]),
            2 => insert_range(&mut v, 1, Exact(list.iter().copied())),
            3 => insert_range(&mut v, 1, Uncounted(list.iter().copied())),
            _ => {
                let first = Forward(SliceCursor::begin(&src));
                insert_range(&mut v, 1, Counted::new(first, 3))
            }
        }
        .unwrap();
        results.push(v);
    }
    for v in &results {
        assert_eq!(&v[..], &[0, 9, 8, 7, 1, 2]);
    }
}

#[test]
fn set_insert_reports_position() {
    let mut s: FlatSet<i32> = (0..10).map(|i| i / 2 * 2).collect();
    assert_eq!(s.as_slice(), &[0, 2, 4, 6, 8]);
    assert_eq!(insert(&mut s, 10).unwrap(), (5, true));
    assert_eq!(s.as_slice(), &[0, 2, 4, 6, 8, 10]);
    assert_eq!(insert(&mut s, 12).unwrap(), (6, true));
    assert_eq!(insert(&mut s, 4).unwrap(), (2, false));
}

#[test]
fn reservation_trace() {
    let mut r = Recording::new();
    let big: std::vec::Vec<i32> = (0..1024).collect();
    let end = r.len();
    insert_range(&mut r, end, &big[..]).unwrap();
    assert_eq!(r.reserved, [1024]);

    let bigger: std::vec::Vec<i32> = (0..2048).collect();
    insert_range(&mut r, 42, &bigger[..]).unwrap();
    assert_eq!(r.reserved.len(), 2);
    assert_eq!(r.reserved[1], 3072);
    assert_eq!(r.v[42], 0);
    assert_eq!(r.v[42 + 2047], 2047);
    assert_eq!(r.v[42 + 2048], 42);

    insert_range(&mut r, 0, [-1]).unwrap();
    assert_eq!(r.reserved.len(), 3);
    assert!(r.reserved[2] > 3073);
    assert_eq!(r.len(), 3073);
}

#[test]
fn reservations_are_amortized() {
    let mut r = Recording::new();
    for i in 0..N {
        let (size, before) = (r.len(), r.reserved.len());
        insert_range(&mut r, size / 2, [i as i32]).unwrap();
        assert!(r.reserved.len() <= before + 1);
        if let Some(&capacity) = r.reserved.get(before) {
            assert!(capacity > size);
            assert!(capacity <= r.max_size());
        }
    }
    let bits = (usize::BITS - N.leading_zeros()) as usize;
    assert!(r.reserved.len() <= 2 * bits, "{} reservations", r.reserved.len());
    assert!(r.reserved.windows(2).all(|w| w[0] < w[1]));
    print_memory();
}

#[test]
fn unsized_ranges_are_not_planned() {
    let mut r = Recording::new();
    insert_range(&mut r, 0, Uncounted((0..100).filter(|x| x % 3 == 0))).unwrap();
    assert!(r.reserved.is_empty());
    assert_eq!(r.len(), 34);
    insert_copies(&mut r, 0, 10, 5).unwrap();
    assert_eq!(r.reserved.len(), 1);
}

#[test]
fn allocation_failure_is_passed_through() {
    let mut v: Vec<u32, Budget> = Vec::new_in(Budget::new(64));
    match insert_range(&mut v, 0, 0..32u32) {
        Err(Error::Reserve(e)) => {
            assert!(matches!(e.kind(), TryReserveErrorKind::AllocError { .. }));
            assert_eq!(e.to_string(), "memory allocation of 128 bytes failed");
        }
        other => panic!("unexpected {:?}", other),
    }
    assert!(v.is_empty());
    insert_range(&mut v, 0, 0..16u32).unwrap();
    assert_eq!(v.allocator().remaining(), 0);
}

#[test]
fn std_allocation_failure_is_passed_through() {
    let mut v: std::vec::Vec<u8> = std::vec::Vec::new();
    assert!(matches!(
        v.reserve_total(usize::MAX),
        Err(Error::StdReserve(_))
    ));
}

#[test]
fn capacity_exceeded_message() {
    let mut a: arrayvec::ArrayVec<u8, 4> = arrayvec::ArrayVec::new();
    insert_range(&mut a, 0, [1, 2, 3]).unwrap();
    let e = insert_copies(&mut a, 0, 2, 0).unwrap_err();
    assert_eq!(
        e.to_string(),
        "cannot insert 2 elements into a container of size 3: maximum size is 4"
    );
}

#[test]
fn equal_range_matches_scan() {
    let mut rng = rand::thread_rng();
    for _ in 0..REP {
        let n = rng.gen_range(0..200);
        let mut v: std::vec::Vec<u8> = (0..n).map(|_| rng.gen_range(0..40)).collect();
        v.sort_unstable();
        let key = rng.gen_range(0..45);
        let lo = v.iter().filter(|x| **x < key).count();
        let hi = v.iter().filter(|x| **x <= key).count();

        let r = equal_range(SliceCursor::begin(&v), SliceCursor::end(&v), &key);
        assert_eq!(r.indices(), lo..hi);

        let f = equal_range_n(Forward(SliceCursor::begin(&v)), v.len(), &key);
        let (first, last) = f.into_parts();
        assert_eq!(first.0.index()..last.0.index(), lo..hi);
    }
}

#[test]
fn insert_into_sorted_position() {
    // Sorted insertion built from the search and the dispatcher.
    let mut rng = rand::thread_rng();
    let mut v: Vec<u32> = Vec::new();
    let mut model = std::vec::Vec::new();
    for _ in 0..N / 10 {
        let x = rng.gen_range(0..100);
        let at = equal_range(SliceCursor::begin(&v), SliceCursor::end(&v), &x)
            .end()
            .index();
        insert_range(&mut v, at, [x, x]).unwrap();
        model.push(x);
        model.push(x);
    }
    model.sort_unstable();
    assert_eq!(&v[..], &model[..]);
}

#[test]
#[cfg(feature = "serde")]
fn serde_test() {
    let v: Vec<u32> = (0..N as u32).collect();
    let s: FlatSet<u32> = (0..N as u32).rev().collect();
    for _i in 0..REP / 10 {
        let ser = bincode::serialize(&v).unwrap();
        let back: Vec<u32> = bincode::deserialize(&ser).unwrap();
        assert_eq!(back, v);
        let ser = bincode::serialize(&s).unwrap();
        let back: FlatSet<u32> = bincode::deserialize(&ser).unwrap();
        assert_eq!(back, s);
    }
}
