// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Searching scalar leaves of nested arrays.
//!
//! Only arrays are descended into; every other value is compared as a whole.
//! See [`crate::compare`] for the equality rules, including why `NaN` can
//! never be found, counted or deduplicated.

use crate::compare::{strict_equals, Comparison};
use crate::value::Value;

// Scalar leaves in document order.
struct Leaves<'a> {
    stack: Vec<&'a Value>,
}

impl<'a> Leaves<'a> {
    fn new(root: &'a Value) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node.as_container() {
                Some(items) => self.stack.extend(items.iter().rev()),
                None => return Some(node),
            }
        }
        None
    }
}

/// Whether `needle` occurs anywhere in `haystack`, at any depth.
///
/// A scalar haystack is compared with the needle directly. Stops at the first
/// match.
pub fn contains_value(haystack: &Value, needle: &Value, mode: Comparison) -> bool {
    Leaves::new(haystack).any(|leaf| mode.matches(leaf, needle))
}

/// Number of scalar leaves in `haystack` that match `needle`.
pub fn count_value(haystack: &Value, needle: &Value, mode: Comparison) -> usize {
    Leaves::new(haystack)
        .filter(|leaf| mode.matches(leaf, needle))
        .count()
}

/// Distinct scalar leaves in first-occurrence order, deduplicated with strict
/// equality.
///
/// A scalar input is returned as a one-element vector. Every `NaN` is kept,
/// since strict equality never matches it.
pub fn unique_values(value: &Value) -> Vec<Value> {
    if !value.is_container() {
        return vec![value.clone()];
    }

    let mut unique: Vec<Value> = vec![];
    for leaf in Leaves::new(value) {
        if !unique.iter().any(|seen| strict_equals(seen, leaf)) {
            unique.push(leaf.clone());
        }
    }
    unique
}
