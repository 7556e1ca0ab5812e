// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

// Use README.md as crate documentation.
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

pub mod compare;
pub mod functions;
mod number;
mod search;
mod shape;
mod value;

#[cfg(feature = "arc")]
pub(crate) use std::sync::Arc as Rc;
#[cfg(not(feature = "arc"))]
pub(crate) use std::rc::Rc;

pub use compare::{loose_equals, strict_equals, Comparison, ParseComparisonError};
pub use functions::CallError;
pub use number::{BigInt, Number, ParseNumberError};
pub use search::{contains_value, count_value, unique_values};
pub use shape::{count_dimensions, has_jagged_edges, max_lengths};
pub use value::Value;
