// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Chunk-split generators for exhaustive streaming tests.

fn compose<F>(remaining: usize, max_parts: usize, parts: &mut Vec<usize>, callback: &mut F)
where
    F: FnMut(&[usize]),
{
    if remaining == 0 {
        callback(parts);
        return;
    }

    if parts.len() == max_parts {
        return;
    }

    for first in 1..=remaining {
        parts.push(first);
        compose(remaining - first, max_parts, parts, callback);
        parts.pop();
    }
}

/// Generates every way of splitting `len` bytes into at most `max_parts`
/// non-empty consecutive chunks, as lists of chunk lengths.
///
/// `len == 0` yields a single empty split.
///
/// # Example
/// ```
/// use rampart_test_utils::chunk_lengths;
///
/// let mut splits = Vec::new();
/// chunk_lengths(3, 3, |lengths| splits.push(lengths.to_vec()));
/// assert_eq!(splits.len(), 4); // [1,1,1] [1,2] [2,1] [3]
/// ```
pub fn chunk_lengths<F>(len: usize, max_parts: usize, mut callback: F)
where
    F: FnMut(&[usize]),
{
    let mut parts = Vec::with_capacity(max_parts);
    compose(len, max_parts, &mut parts, &mut callback);
}

/// Converts arbitrary cut positions into chunk lengths covering `len`.
///
/// Cuts are clamped to `len`, sorted and deduplicated, which makes this a
/// convenient target for property-based generators.
///
/// # Example
/// ```
/// use rampart_test_utils::lengths_from_cuts;
///
/// assert_eq!(lengths_from_cuts(10, &[7, 3, 3, 42]), vec![3, 4, 3]);
/// ```
pub fn lengths_from_cuts(len: usize, cuts: &[usize]) -> Vec<usize> {
    let mut cuts: Vec<usize> = cuts.iter().map(|cut| (*cut).min(len)).collect();
    cuts.sort_unstable();
    cuts.dedup();

    let mut lengths = Vec::with_capacity(cuts.len() + 1);
    let mut start = 0;

    for cut in cuts {
        if cut > start {
            lengths.push(cut - start);
            start = cut;
        }
    }

    if len > start {
        lengths.push(len - start);
    }

    lengths
}

/// Splits `data` into consecutive chunks of the given lengths.
///
/// # Panics
///
/// Panics if the lengths add up to more than `data.len()`.
///
/// # Example
/// ```
/// use rampart_test_utils::split_by_lengths;
///
/// let chunks = split_by_lengths(b"abcdef", &[1, 2, 3]);
/// assert_eq!(chunks, [&b"a"[..], &b"bc"[..], &b"def"[..]]);
/// ```
pub fn split_by_lengths<'a>(data: &'a [u8], lengths: &[usize]) -> Vec<&'a [u8]> {
    let mut chunks = Vec::with_capacity(lengths.len());
    let mut rest = data;

    for len in lengths {
        let (head, tail) = rest.split_at(*len);
        chunks.push(head);
        rest = tail;
    }

    chunks
}
