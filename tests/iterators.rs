use chunk_deque::{Deque, Iter};

fn spread<const CHUNK: usize>(n: i32) -> Deque<i32, CHUNK> {
    let mut d = Deque::new();
    for i in 0..n {
        d.push_back(i);
        d.push_front(-i - 1);
    }
    d
}

#[test]
fn reverse_traversal_is_exact_reverse() {
    let d = spread::<3>(20);
    let forward: Vec<i32> = d.iter().copied().collect();
    let backward: Vec<i32> = d.iter().rev().copied().collect();
    assert_eq!(forward.len(), 40);
    assert!(forward.iter().eq(backward.iter().rev()));
    assert!(forward.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn arithmetic_matches_indexing_for_every_pair() {
    let d = spread::<4>(10);
    let begin = d.iter();
    for a in 0..d.len() {
        let ia = begin.clone() + a as isize;
        assert_eq!(ia.get(), Some(&d[a]));
        assert_eq!(ia.index(), a);
        for b in 0..=d.len() {
            let ib = begin.clone() + b as isize;
            assert_eq!(&ib - &ia, b as isize - a as isize);
            assert_eq!(ia < ib, a < b);
            assert_eq!(ia == ib, a == b);
            assert_eq!(ia >= ib, a >= b);
        }
    }
}

#[test]
fn compound_assignment_carries_across_chunks() {
    let d = spread::<2>(16);
    let mut it = d.iter();
    it += 31;
    assert_eq!(it.get(), Some(&15));
    it -= 31;
    assert_eq!(it.get(), Some(&-16));
    it += 16;
    assert_eq!(it.get(), Some(&0));
    let back = it.clone() + -5;
    assert_eq!(back.get(), Some(&-5));
    let fwd = it - -5;
    assert_eq!(fwd.get(), Some(&5));
}

#[test]
fn stepping_mirrors_pre_increment_and_decrement() {
    let d: Deque<u8, 3> = (0..7).collect();
    let mut it = d.iter() + 2;
    it.step_forward();
    assert_eq!(it.get(), Some(&3));
    it.step_back();
    it.step_back();
    assert_eq!(it.get(), Some(&1));
    assert_eq!(it.cursor(), d.begin() + 1);
}

#[test]
fn iterator_yields_from_both_ends() {
    let d: Deque<u8, 4> = (0..10).collect();
    let mut it = d.iter();
    assert_eq!(it.next(), Some(&0));
    assert_eq!(it.next_back(), Some(&9));
    assert_eq!(it.len(), 8);
    assert_eq!(it.nth(7), Some(&8));
    assert_eq!(it.next(), None);
    assert_eq!(it.next_back(), None);
}

#[test]
fn mutable_iterator_then_read_only_view() {
    let mut d: Deque<u32, 3> = (1..=9).collect();
    let mut it = d.iter_mut();
    for x in it.by_ref().take(4) {
        *x *= 100;
    }
    let rest: Iter<'_, u32, 3> = it.into();
    assert_eq!(rest.copied().collect::<Vec<_>>(), vec![5, 6, 7, 8, 9]);
    assert_eq!(d[3], 400);

    for x in d.iter_mut().rev().take(2) {
        *x = 0;
    }
    assert_eq!(
        d.iter().rev().take(3).copied().collect::<Vec<_>>(),
        vec![0, 0, 7]
    );
}

#[test]
fn for_loops_over_references() {
    let mut d: Deque<String, 2> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
    for s in &mut d {
        s.push('!');
    }
    let mut joined = String::new();
    for s in &d {
        joined.push_str(s);
    }
    assert_eq!(joined, "a!b!c!");
}

#[test]
fn cursor_insert_then_remove_restores() {
    let original: Vec<u16> = (0..11).collect();
    let mut d: Deque<u16, 4> = original.iter().copied().collect();
    for index in 0..=original.len() {
        let mut cursor = d.cursor_at_mut(index);
        cursor.insert(500);
        assert_eq!(cursor.get(), Some(&500));
        assert_eq!(cursor.remove(), Some(500));
        assert_eq!(cursor.index(), index);
    }
    assert!(d.iter().eq(original.iter()));
}

#[test]
fn cursor_random_access_writes() {
    let mut d: Deque<u8, 2> = (0..10).collect();
    let mut cursor = d.cursor_end_mut();
    cursor.seek(-1);
    while let Some(x) = cursor.current() {
        *x += 100;
        if cursor.index() < 2 {
            break;
        }
        cursor.seek(-2);
    }
    assert_eq!(
        d.iter().copied().collect::<Vec<_>>(),
        vec![0, 101, 2, 103, 4, 105, 6, 107, 8, 109]
    );
}

#[test]
fn into_iter_drops_unconsumed() {
    use std::rc::Rc;

    let token = Rc::new(());
    let d: Deque<Rc<()>, 3> = (0..10).map(|_| Rc::clone(&token)).collect();
    assert_eq!(Rc::strong_count(&token), 11);
    let mut it = d.into_iter();
    drop(it.next());
    drop(it.next_back());
    assert_eq!(Rc::strong_count(&token), 9);
    drop(it);
    assert_eq!(Rc::strong_count(&token), 1);
}

#[test]
fn iterators_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Iter<'static, u8, 4>>();
    assert_send_sync::<chunk_deque::IterMut<'static, u8, 4>>();
    assert_send_sync::<Deque<u8, 4>>();
}
