//! Similarity ratio and closest-match lookup.
//!
//! The ratio is `2 * M / (len(a) + len(b))`, where `M` is the total size of
//! the matching blocks found by repeatedly taking the longest common block
//! and recursing on both sides of it. Sequences are compared as Unicode
//! scalar values.

use std::collections::HashMap;

/// Sequences at least this long have their popular elements ignored when
/// seeding matches.
const AUTOJUNK_MIN_LEN: usize = 200;

/// Longest-matching-block matcher over two character sequences.
struct BlockMatcher {
    a: Vec<char>,
    b: Vec<char>,
    b2j: HashMap<char, Vec<usize>>,
}

impl BlockMatcher {
    fn new(a: &str, b: &str) -> Self {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();

        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, ch) in b.iter().enumerate() {
            b2j.entry(*ch).or_default().push(j);
        }

        if b.len() >= AUTOJUNK_MIN_LEN {
            let threshold = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= threshold);
        }

        Self { a, b, b2j }
    }

    /// Longest block `(i, j, size)` with `a[i..i+size] == b[j..j+size]`
    /// inside the given windows; earliest in `a`, then in `b`, on ties.
    fn find_longest_match(
        &self,
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> (usize, usize, usize) {
        let (mut besti, mut bestj, mut bestsize) = (alo, blo, 0_usize);
        let mut j2len: HashMap<usize, usize> = HashMap::new();

        for i in alo..ahi {
            let mut next_j2len: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next_j2len.insert(j, k);
                    if k > bestsize {
                        besti = i + 1 - k;
                        bestj = j + 1 - k;
                        bestsize = k;
                    }
                }
            }
            j2len = next_j2len;
        }

        // Popular elements never seed a match but may still extend one.
        while besti > alo && bestj > blo && self.a[besti - 1] == self.b[bestj - 1] {
            besti -= 1;
            bestj -= 1;
            bestsize += 1;
        }
        while besti + bestsize < ahi
            && bestj + bestsize < bhi
            && self.a[besti + bestsize] == self.b[bestj + bestsize]
        {
            bestsize += 1;
        }

        (besti, bestj, bestsize)
    }

    /// Total number of matched elements across all matching blocks.
    fn matched_len(&self) -> usize {
        let mut total = 0_usize;
        let mut queue = vec![(0, self.a.len(), 0, self.b.len())];

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let (i, j, k) = self.find_longest_match(alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }
            total += k;
            if alo < i && blo < j {
                queue.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                queue.push((i + k, ahi, j + k, bhi));
            }
        }

        total
    }
}

/// Similarity ratio in `[0.0, 1.0]`; two empty strings are identical.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let matcher = BlockMatcher::new(a, b);
    let length = matcher.a.len() + matcher.b.len();
    if length == 0 {
        return 1.0;
    }
    2.0 * matcher.matched_len() as f64 / length as f64
}

/// Best candidate whose ratio against `query` reaches `cutoff`.
///
/// Ties on score resolve to the lexicographically greatest candidate.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn closest_match<'a, I>(query: &str, candidates: I, cutoff: f64) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut best: Option<(f64, &'a str)> = None;

    for candidate in candidates {
        let score = similarity_ratio(candidate, query);
        if score < cutoff {
            continue;
        }
        let better = match best {
            None => true,
            Some((best_score, best_candidate)) => {
                score > best_score || (score == best_score && candidate.as_str() > best_candidate)
            }
        };
        if better {
            best = Some((score, candidate.as_str()));
        }
    }

    best.map(|(_, candidate)| candidate)
}
