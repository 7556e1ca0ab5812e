// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Name-based access to the operations.
//!
//! Every operation is registered under its camel-case name and takes its
//! arguments as a slice of [`Value`]s, returning a [`Value`]. `containsValue`
//! and `countValue` accept an optional trailing mode argument: a boolean
//! (`true` for strict, the default) or one of the strings `"strict"` and
//! `"loose"`.

use std::collections::HashMap;

use anyhow::Result;
use lazy_static::lazy_static;
use log::trace;

use crate::compare::Comparison;
use crate::search::{contains_value, count_value, unique_values};
use crate::shape::{count_dimensions, has_jagged_edges, max_lengths};
use crate::value::Value;

pub type Function = fn(&[Value]) -> Result<Value>;

#[derive(Debug, thiserror::Error)]
pub enum CallError {
    #[error("unknown function `{0}`")]
    UnknownFunction(String),
    #[error("`{name}` expects {expected} argument(s){}, got {actual}", mode_hint(.optional_mode))]
    ArgCount {
        name: &'static str,
        expected: u8,
        optional_mode: bool,
        actual: usize,
    },
    #[error("`{name}`: comparison mode must be a bool, \"strict\" or \"loose\", got {found}")]
    InvalidMode { name: &'static str, found: String },
}

fn mode_hint(optional_mode: &bool) -> &'static str {
    if *optional_mode {
        " and an optional comparison mode"
    } else {
        ""
    }
}

#[rustfmt::skip]
lazy_static! {
    /// Operations by name, with the number of required arguments.
    pub static ref FUNCTIONS: HashMap<&'static str, (Function, u8)> = {
	let mut m: HashMap<&'static str, (Function, u8)> = HashMap::new();

	m.insert("countDimensions", (dimensions, 1));
	m.insert("hasJaggedEdges", (jagged, 1));
	m.insert("getMaxLengths", (lengths, 1));
	m.insert("containsValue", (contains, 2));
	m.insert("countValue", (count, 2));
	m.insert("getUniqueValues", (unique, 1));

	m
    };
}

/// Calls the operation registered as `name`.
pub fn call(name: &str, args: &[Value]) -> Result<Value> {
    let Some((&name, &(function, n_args))) = FUNCTIONS.get_key_value(name) else {
        return Err(CallError::UnknownFunction(name.to_string()).into());
    };
    trace!("calling {name} with {} argument(s), {n_args} required", args.len());

    // Each operation checks its own arguments.
    function(args)
}

fn ensure_args_count(name: &'static str, args: &[Value], expected: u8) -> Result<()> {
    if args.len() != usize::from(expected) {
        return Err(CallError::ArgCount {
            name,
            expected,
            optional_mode: false,
            actual: args.len(),
        }
        .into());
    }
    Ok(())
}

// Haystack and needle, optionally followed by a comparison mode.
fn ensure_search_args(name: &'static str, args: &[Value]) -> Result<Comparison> {
    let invalid_mode = |found: &Value| CallError::InvalidMode {
        name,
        found: format!("{found:?}"),
    };

    match args {
        [_, _] => Ok(Comparison::default()),
        [_, _, Value::Bool(use_strict)] => Ok(Comparison::from(*use_strict)),
        [_, _, mode @ Value::String(s)] => Ok(s.parse().map_err(|_| invalid_mode(mode))?),
        [_, _, found] => Err(invalid_mode(found).into()),
        _ => Err(CallError::ArgCount {
            name,
            expected: 2,
            optional_mode: true,
            actual: args.len(),
        }
        .into()),
    }
}

fn dimensions(args: &[Value]) -> Result<Value> {
    ensure_args_count("countDimensions", args, 1)?;
    Ok(Value::from(count_dimensions(&args[0])))
}

fn jagged(args: &[Value]) -> Result<Value> {
    ensure_args_count("hasJaggedEdges", args, 1)?;
    Ok(Value::Bool(has_jagged_edges(&args[0])))
}

fn lengths(args: &[Value]) -> Result<Value> {
    ensure_args_count("getMaxLengths", args, 1)?;
    let lengths = max_lengths(&args[0]);
    Ok(Value::from(lengths.into_iter().map(Value::from).collect::<Vec<_>>()))
}

fn contains(args: &[Value]) -> Result<Value> {
    let mode = ensure_search_args("containsValue", args)?;
    Ok(Value::Bool(contains_value(&args[0], &args[1], mode)))
}

fn count(args: &[Value]) -> Result<Value> {
    let mode = ensure_search_args("countValue", args)?;
    Ok(Value::from(count_value(&args[0], &args[1], mode)))
}

fn unique(args: &[Value]) -> Result<Value> {
    ensure_args_count("getUniqueValues", args, 1)?;
    Ok(Value::from(unique_values(&args[0])))
}
