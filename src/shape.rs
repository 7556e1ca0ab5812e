// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Shape of nested arrays: depth, regularity and per-level extents.
//!
//! Traversals keep their own work stack, so arbitrarily deep input costs heap
//! space rather than call stack.

use log::debug;

use crate::value::Value;

/// Maximum nesting depth. Scalars have depth 0, `[]` has depth 1.
pub fn count_dimensions(value: &Value) -> usize {
    let Some(items) = value.as_container() else {
        return 0;
    };

    let mut deepest = 1;
    let mut stack = vec![(items, 1usize)];
    while let Some((items, depth)) = stack.pop() {
        deepest = deepest.max(depth);
        for item in items {
            if let Some(children) = item.as_container() {
                stack.push((children, depth + 1));
            }
        }
    }
    deepest
}

/// Whether sibling nesting differs anywhere in the structure.
///
/// Walks the structure in document order while recording, per depth, what the
/// first value seen there looked like: an array of some length, or a scalar.
/// The walk stops at the first later value that disagrees with that record.
///
/// Scalars return `false`.
pub fn has_jagged_edges(value: &Value) -> bool {
    if !value.is_container() {
        return false;
    }

    // `None` records that a scalar was the first value seen at that depth.
    let mut expected: Vec<Option<usize>> = vec![];
    let mut stack = vec![(value, 0usize)];

    while let Some((node, depth)) = stack.pop() {
        let items = node.as_container();
        let found = items.map(<[Value]>::len);

        match expected.get(depth) {
            None => {
                // Pre-order visits reach depth d only after depth d - 1.
                debug_assert_eq!(expected.len(), depth);
                expected.push(found);
            }
            Some(want) if *want != found => {
                debug!("jagged at depth {depth}: expected {want:?}, found {found:?}");
                return true;
            }
            Some(_) => (),
        }

        if let Some(items) = items {
            // Reversed so that children pop in document order.
            stack.extend(items.iter().rev().map(|item| (item, depth + 1)));
        }
    }

    false
}

/// Largest array length found at each depth, outermost first.
///
/// Scalars yield an empty vector; `[]` yields `[0]`.
pub fn max_lengths(value: &Value) -> Vec<usize> {
    let mut lengths: Vec<usize> = vec![];
    let Some(items) = value.as_container() else {
        return lengths;
    };

    let mut stack = vec![(items, 0usize)];
    while let Some((items, depth)) = stack.pop() {
        match lengths.get_mut(depth) {
            Some(longest) => *longest = (*longest).max(items.len()),
            None => lengths.push(items.len()),
        }

        for item in items {
            if let Some(children) = item.as_container() {
                stack.push((children, depth + 1));
            }
        }
    }
    lengths
}
