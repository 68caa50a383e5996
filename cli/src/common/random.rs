//! # sessionkit Random Subset Sampling (`common::random`)
//!
//! File: cli/src/common/random.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `randint_set` draws `n` distinct integers from the closed interval `[i, j]`,
//! every size-`n` subset being equally likely. Session tests use it to pick
//! random cells or ports without repeats.
//!
//! ## Cases
//!
//! With `span = j - i + 1`:
//! - `span == n`: the whole interval is the only answer and is returned without
//!   touching the RNG.
//! - `span < n`: there is no such set; `SessionError::InvalidArgument`.
//! - `span > n`: a random draw. When `n` is at most half the span, values are
//!   drawn uniformly and duplicates discarded until `n` remain. Denser requests
//!   use `rand::seq::index::sample`, which never rejects.
//!
//! ## Usage
//!
//! ```rust
//! use sessionkit::common::random::randint_set;
//!
//! let picks = randint_set(5, 10, 3).unwrap();
//! assert_eq!(picks.len(), 3);
//! assert!(picks.iter().all(|v| (5..=10).contains(v)));
//!
//! let all: Vec<i64> = randint_set(5, 10, 6).unwrap().into_iter().collect();
//! assert_eq!(all, vec![5, 6, 7, 8, 9, 10]);
//!
//! assert!(randint_set(5, 10, 7).is_err());
//! ```
//!
use crate::core::error::{Result, SessionError};
use rand::Rng;
use std::collections::BTreeSet;

/// `n` distinct integers from `[i, j]`, using the thread-local RNG.
pub fn randint_set(i: i64, j: i64, n: usize) -> Result<BTreeSet<i64>> {
    randint_set_with(&mut rand::thread_rng(), i, j, n)
}

/// `n` distinct integers from `[i, j]`, using `rng`.
pub fn randint_set_with<R: Rng + ?Sized>(
    rng: &mut R,
    i: i64,
    j: i64,
    n: usize,
) -> Result<BTreeSet<i64>> {
    let span = j as i128 - i as i128 + 1;
    let wanted = n as i128;

    if span == wanted {
        return Ok((i..=j).collect());
    }
    if span < wanted {
        return Err(SessionError::InvalidArgument(format!(
            "there is no such set: [{}, {}] holds {} integer(s), {} requested",
            i,
            j,
            span.max(0),
            n
        )));
    }

    // span > n >= 0, so i <= j from here on.
    if wanted * 2 > span {
        if let Ok(len) = usize::try_from(span) {
            return Ok(rand::seq::index::sample(rng, len, n)
                .into_iter()
                .map(|offset| i + offset as i64)
                .collect());
        }
    }

    let mut picked = BTreeSet::new();
    while picked.len() < n {
        picked.insert(rng.gen_range(i..=j));
    }
    Ok(picked)
}
