use linked_bst::Tree;

use std::collections::{BTreeMap, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and to a map of item counts.
/// This way we can ensure that after a random smattering of adds,
/// removes and rebalances we hold the same items as the map.
fn do_ops<T>(ops: &[Op<T>], bst: &mut Tree<T>, counts: &mut BTreeMap<T, usize>)
where
    T: Ord + Clone,
{
    for op in ops {
        match op {
            Op::Add(x) => {
                bst.add(x.clone());
                *counts.entry(x.clone()).or_default() += 1;
            }
            Op::Remove(x) => {
                if bst.remove(x).is_ok() {
                    let n = counts.get_mut(x).expect("removed an item that was never added");
                    *n -= 1;
                    if *n == 0 {
                        counts.remove(x);
                    }
                }
            }
            Op::Rebalance => {
                bst.rebalance();
            }
        }
    }
}

fn expand<T: Clone>(counts: &BTreeMap<T, usize>) -> Vec<T> {
    counts
        .iter()
        .flat_map(|(x, n)| std::iter::repeat(x.clone()).take(*n))
        .collect()
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut counts = BTreeMap::new();

    do_ops(&ops, &mut tree, &mut counts);
    counts.keys().all(|x| tree.find(x) == Some(x))
        && tree.inorder().cloned().collect::<Vec<_>>() == expand(&counts)
}

#[quickcheck]
fn size_matches_traversals(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut counts = BTreeMap::new();

    do_ops(&ops, &mut tree, &mut counts);
    let size = tree.size();
    tree.preorder().count() == size
        && tree.inorder().count() == size
        && tree.postorder().count() == size
        && tree.levelorder().count() == size
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();

    xs.iter().all(|x| tree.find(x) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| !tree.contains(x))
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().collect();
    for delete in &deletes {
        // We may have added the same value multiple times - remove each one.
        while tree.remove(delete).is_ok() {}
    }

    let mut still_present = xs;
    still_present.retain(|x| !deletes.contains(x));

    deletes.iter().all(|x| tree.find(x).is_none())
        && still_present.iter().all(|x| tree.find(x).is_some())
        && tree.size() == still_present.len()
}

#[quickcheck]
fn rebalance_is_idempotent(xs: Vec<i8>) -> bool {
    let mut tree: Tree<_> = xs.into_iter().collect();
    let once: Vec<_> = tree.rebalance().preorder().copied().collect();
    let twice: Vec<_> = tree.rebalance().preorder().copied().collect();

    once == twice
}

#[quickcheck]
fn rebalance_near_minimal_height(xs: Vec<i16>) -> bool {
    let distinct: HashSet<_> = xs.into_iter().collect();
    let mut tree: Tree<_> = distinct.into_iter().collect();
    if tree.is_empty() {
        return tree.height() == -1;
    }

    let n = tree.size();
    let minimal = ((n + 1) as f64).log2().ceil() as isize - 1;
    tree.rebalance().height() == minimal && tree.is_balanced()
}

#[quickcheck]
fn range_find_matches_filter(xs: Vec<i8>, low: i8, high: i8) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let mut found: Vec<_> = tree.range_find(&low, &high).into_iter().copied().collect();
    found.sort();

    let mut expected: Vec<_> = xs.into_iter().filter(|x| low <= *x && *x <= high).collect();
    expected.sort();

    found == expected
}
