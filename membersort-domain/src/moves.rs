//! Minimal move set for a permutation.
//!
//! Members whose source positions already increase along the target order can stay where they
//! are; a longest such run is kept and everything else is reported as a move.

/// Source indices that keep their place when reordering by `permutation`
/// (`permutation[target] = source`). Returned in ascending order.
pub fn stable_members(permutation: &[usize]) -> Vec<usize> {
    // Patience sorting over the source indices, remembering predecessors so one longest
    // increasing subsequence can be rebuilt.
    let mut tails: Vec<usize> = Vec::new(); // positions in `permutation`
    let mut prev: Vec<Option<usize>> = vec![None; permutation.len()];

    for (pos, &value) in permutation.iter().enumerate() {
        let slot = tails.partition_point(|&t| permutation[t] < value);
        if slot > 0 {
            prev[pos] = Some(tails[slot - 1]);
        }
        if slot == tails.len() {
            tails.push(pos);
        } else {
            tails[slot] = pos;
        }
    }

    let mut out = Vec::with_capacity(tails.len());
    let mut cursor = tails.last().copied();
    while let Some(pos) = cursor {
        out.push(permutation[pos]);
        cursor = prev[pos];
    }
    out.reverse();
    out
}
