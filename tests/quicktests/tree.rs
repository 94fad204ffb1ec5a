use bintree::{Error, Tree};

use std::collections::BTreeSet;

/// Builds a tree by inserting `xs` in order and returns it along with the distinct elements.
fn build(xs: &[i16]) -> (Tree<i16>, BTreeSet<i16>) {
    let mut tree = Tree::new();
    let mut set = BTreeSet::new();
    for x in xs {
        assert_eq!(tree.insert(*x), set.insert(*x));
    }

    (tree, set)
}

#[quickcheck]
fn contains(xs: Vec<i16>) -> bool {
    let (tree, _) = build(&xs);

    xs.iter().all(|x| tree.retrieve(x) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i16>, nots: Vec<i16>) -> bool {
    let (tree, added) = build(&xs);
    let nots: BTreeSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.retrieve(x).is_none())
}

#[quickcheck]
fn clear_empties(xs: Vec<i16>) -> bool {
    let (mut tree, _) = build(&xs);
    tree.clear();

    tree.is_empty() && tree.len() == 0
}

#[quickcheck]
fn duplicates_leave_tree_unchanged(xs: Vec<i16>) -> bool {
    let (mut tree, _) = build(&xs);
    let before = tree.clone();

    xs.iter().all(|x| !tree.insert(*x)) && tree == before
}

#[quickcheck]
fn copies_equal_original(xs: Vec<i16>) -> bool {
    let (tree, _) = build(&xs);
    let mut target: Tree<_> = [0, -1, 1].into_iter().collect();
    target.clone_from(&tree.clone());

    target == tree && tree.clone().clone() == tree
}

#[quickcheck]
fn export_is_sorted_and_destructive(xs: Vec<i16>) -> bool {
    let (mut tree, set) = build(&xs);
    let mut slots = vec![None; set.len() + 1];

    let exported = tree.drain_into(&mut slots);

    exported == Ok(set.len())
        && tree.is_empty()
        && slots.iter().flatten().eq(set.iter())
        && slots[set.len()].is_none()
}

#[quickcheck]
fn export_needs_room(xs: Vec<i16>) -> bool {
    let (mut tree, set) = build(&xs);
    if set.is_empty() {
        return true;
    }
    let mut slots = vec![None; set.len() - 1];

    tree.drain_into(&mut slots)
        == Err(Error::Capacity {
            needed: set.len(),
            available: set.len() - 1,
        })
        && tree.len() == set.len()
}

#[quickcheck]
fn round_trip_keeps_contents(xs: Vec<i16>) -> bool {
    let (mut tree, set) = build(&xs);
    let sorted = tree.into_sorted_vec();
    let rebuilt = Tree::try_from_sorted(sorted).expect("Export is sorted");

    let expected: Vec<_> = set.iter().map(ToString::to_string).collect();

    rebuilt.inorder().to_string() == expected.join(" ") && rebuilt.len() == set.len()
}

#[quickcheck]
fn sibling_is_symmetric(xs: Vec<i16>) -> bool {
    let (tree, set) = build(&xs);

    set.iter().all(|x| match tree.sibling(x) {
        Some(sibling) => tree.sibling(sibling) == Some(x) && tree.parent(sibling) == tree.parent(x),
        None => true,
    })
}

#[quickcheck]
fn every_element_but_the_root_has_a_parent(xs: Vec<i16>) -> bool {
    let (tree, set) = build(&xs);
    let orphans = set.iter().filter(|&x| tree.parent(x).is_none()).count();

    orphans == usize::from(!set.is_empty())
}

#[test]
fn midpoint_becomes_root() {
    let mut tree: Tree<_> = [10, 20, 30, 40, 50, 60, 70].into_iter().collect();
    assert_eq!(tree.height(), 7);

    let mut slots = [None; 7];
    tree.drain_into(&mut slots).unwrap();
    tree.fill_from(&mut slots);

    assert_eq!(tree.height(), 3);
    assert_eq!(tree.parent(&20), Some(&40));
    assert_eq!(tree.parent(&60), Some(&40));
    assert_eq!(tree.sibling(&20), Some(&60));
    assert_eq!(tree.to_string(), "10 20 30 40 50 60 70");
}
