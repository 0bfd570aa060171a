// TARB - Table Artifact Robustness Benchmark
//
// Copyright (c) 2026 the TARB contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Longest-common-subsequence sequence alignment.
//!
//! Classic line-diff opcode computation: repeatedly take the earliest
//! longest matching block between the two sequences, recurse on the
//! regions before and after it, then read off `equal`/`delete`/`insert`/
//! `replace` opcodes from the gaps between matches. Deterministic
//! tie-breaking (earliest match wins) keeps inferred transforms stable
//! across runs.

use std::collections::HashMap;
use std::hash::Hash;

/// Kind of an alignment region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpTag {
    /// `a[a_start..a_end]` equals `b[b_start..b_end]`.
    Equal,
    /// `a[a_start..a_end]` has no counterpart in `b`.
    Delete,
    /// `b[b_start..b_end]` has no counterpart in `a`.
    Insert,
    /// `a[a_start..a_end]` should become `b[b_start..b_end]`.
    Replace,
}

/// One aligned region over the two sequences.
///
/// Opcodes partition both sequences: the first opcode starts at
/// `(0, 0)` and each one begins where the previous ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    /// Region kind.
    pub tag: OpTag,
    /// Start of the region in `a` (inclusive).
    pub a_start: usize,
    /// End of the region in `a` (exclusive).
    pub a_end: usize,
    /// Start of the region in `b` (inclusive).
    pub b_start: usize,
    /// End of the region in `b` (exclusive).
    pub b_end: usize,
}

#[derive(Debug, Clone, Copy)]
struct MatchBlock {
    a: usize,
    b: usize,
    len: usize,
}

/// Compute alignment opcodes between two sequences.
pub fn opcodes<T: Eq + Hash>(a: &[T], b: &[T]) -> Vec<Opcode> {
    let blocks = matching_blocks(a, b);
    let mut ops = Vec::new();
    let (mut i, mut j) = (0usize, 0usize);
    for block in blocks {
        let tag = if i < block.a && j < block.b {
            Some(OpTag::Replace)
        } else if i < block.a {
            Some(OpTag::Delete)
        } else if j < block.b {
            Some(OpTag::Insert)
        } else {
            None
        };
        if let Some(tag) = tag {
            ops.push(Opcode {
                tag,
                a_start: i,
                a_end: block.a,
                b_start: j,
                b_end: block.b,
            });
        }
        i = block.a + block.len;
        j = block.b + block.len;
        if block.len > 0 {
            ops.push(Opcode {
                tag: OpTag::Equal,
                a_start: block.a,
                a_end: i,
                b_start: block.b,
                b_end: j,
            });
        }
    }
    ops
}

/// Maximal matching blocks in order, terminated by a zero-length sentinel
/// at `(a.len(), b.len())`.
fn matching_blocks<T: Eq + Hash>(a: &[T], b: &[T]) -> Vec<MatchBlock> {
    let mut b2j: HashMap<&T, Vec<usize>> = HashMap::new();
    for (j, item) in b.iter().enumerate() {
        b2j.entry(item).or_default().push(j);
    }

    let mut pending = vec![(0usize, a.len(), 0usize, b.len())];
    let mut blocks = Vec::new();
    while let Some((a_lo, a_hi, b_lo, b_hi)) = pending.pop() {
        let m = longest_match(a, &b2j, a_lo, a_hi, b_lo, b_hi);
        if m.len == 0 {
            continue;
        }
        if a_lo < m.a && b_lo < m.b {
            pending.push((a_lo, m.a, b_lo, m.b));
        }
        if m.a + m.len < a_hi && m.b + m.len < b_hi {
            pending.push((m.a + m.len, a_hi, m.b + m.len, b_hi));
        }
        blocks.push(m);
    }
    blocks.sort_unstable_by_key(|m| (m.a, m.b));

    // Adjacent blocks coalesce so opcode consumers see maximal runs.
    let mut merged: Vec<MatchBlock> = Vec::with_capacity(blocks.len() + 1);
    for m in blocks {
        if let Some(last) = merged.last_mut() {
            if last.a + last.len == m.a && last.b + last.len == m.b {
                last.len += m.len;
                continue;
            }
        }
        merged.push(m);
    }
    merged.push(MatchBlock {
        a: a.len(),
        b: b.len(),
        len: 0,
    });
    merged
}

/// Longest block with `a[i..i+len] == b[j..j+len]`, `a_lo <= i < i+len <=
/// a_hi` and `b_lo <= j < j+len <= b_hi`. Of equally long blocks, the one
/// starting earliest in `a` (then earliest in `b`) wins.
fn longest_match<T: Eq + Hash>(
    a: &[T],
    b2j: &HashMap<&T, Vec<usize>>,
    a_lo: usize,
    a_hi: usize,
    b_lo: usize,
    b_hi: usize,
) -> MatchBlock {
    let (mut best_a, mut best_b, mut best_len) = (a_lo, b_lo, 0usize);
    // j2len[j] = length of the longest match ending at a[i], b[j].
    let mut j2len: HashMap<usize, usize> = HashMap::new();
    for (i, item) in a.iter().enumerate().take(a_hi).skip(a_lo) {
        let mut next_j2len: HashMap<usize, usize> = HashMap::new();
        if let Some(positions) = b2j.get(item) {
            for &j in positions {
                if j < b_lo {
                    continue;
                }
                if j >= b_hi {
                    break;
                }
                let len = if j == 0 {
                    1
                } else {
                    j2len.get(&(j - 1)).copied().unwrap_or(0) + 1
                };
                next_j2len.insert(j, len);
                if len > best_len {
                    best_a = i + 1 - len;
                    best_b = j + 1 - len;
                    best_len = len;
                }
            }
        }
        j2len = next_j2len;
    }
    MatchBlock {
        a: best_a,
        b: best_b,
        len: best_len,
    }
}
