//! Even spacing of changes around a round.

/// Integer division rounding to nearest, ties up.
///
/// ```
/// use stitch_distribute::div_round_half_up;
///
/// assert_eq!(div_round_half_up(37, 6), 6); // 6.17
/// assert_eq!(div_round_half_up(111, 6), 19); // 18.5
/// assert_eq!(div_round_half_up(7, 0), 0);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn div_round_half_up(numerator: u64, denominator: u64) -> u64 {
    if denominator == 0 {
        return 0;
    }
    let (n, d) = (numerator as u128, denominator as u128);
    ((2 * n + d) / (2 * d)) as u64
}

/// 1-indexed positions for `changes` evenly spaced changes in a round of `total` stitches.
///
/// Positions are computed as `offset + round(i * total / changes)` for
/// `i = 1..=changes` in exact integer arithmetic, wrapped into `[1, total]`
/// and sorted. The offset is reduced modulo `total` first, so positions are
/// always distinct and consecutive gaps (including the wrap) differ by at most
/// one.
///
/// - `changes == 0` returns no positions
/// - `changes >= total` returns every position
///
/// # Example
///
/// ```
/// use stitch_distribute::even_distribution;
///
/// assert_eq!(even_distribution(36, 6, 0), vec![6, 12, 18, 24, 30, 36]);
/// assert_eq!(even_distribution(36, 6, 3), vec![3, 9, 15, 21, 27, 33]);
/// assert_eq!(even_distribution(37, 6, 0), vec![6, 12, 19, 25, 31, 37]);
/// assert_eq!(even_distribution(5, 5, 0), vec![1, 2, 3, 4, 5]);
/// assert!(even_distribution(20, 0, 0).is_empty());
/// ```
#[must_use]
pub fn even_distribution(total: u32, changes: u32, offset: u32) -> Vec<u32> {
    if changes == 0 || total == 0 {
        return Vec::new();
    }
    if changes >= total {
        return (1..=total).collect();
    }

    let n = u64::from(total);
    let k = u64::from(changes);
    let offset = u64::from(offset % total);

    let mut positions: Vec<u32> = (1..=k)
        .map(|i| {
            let mut position = offset + div_round_half_up(i * n, k);
            if position > n {
                position -= n;
            }
            // position <= n after the wrap, so it fits
            u32::try_from(position.max(1)).unwrap_or(total)
        })
        .collect();
    positions.sort_unstable();
    positions
}

/// Distances between consecutive positions, including the wrap from the last back to the first.
///
/// `positions` must be sorted and within `[1, total]`.
///
/// ```
/// use stitch_distribute::{cyclic_gaps, even_distribution};
///
/// let gaps = cyclic_gaps(&even_distribution(37, 6, 0), 37);
/// assert_eq!(gaps.iter().sum::<u32>(), 37);
/// assert!(gaps.iter().all(|g| *g == 6 || *g == 7));
/// ```
#[must_use]
pub fn cyclic_gaps(positions: &[u32], total: u32) -> Vec<u32> {
    let (Some(&first), Some(&last)) = (positions.first(), positions.last()) else {
        return Vec::new();
    };
    let mut gaps: Vec<u32> = positions.windows(2).map(|w| w[1] - w[0]).collect();
    gaps.push(first + total - last);
    gaps
}

/// Split `total` stitches into `sections` runs whose lengths differ by at most one.
///
/// Longer runs come first.
///
/// ```
/// use stitch_distribute::split_evenly;
///
/// assert_eq!(split_evenly(20, 6), vec![4, 4, 3, 3, 3, 3]);
/// assert!(split_evenly(20, 0).is_empty());
/// ```
#[must_use]
pub fn split_evenly(total: u32, sections: u32) -> Vec<u32> {
    if sections == 0 {
        return Vec::new();
    }
    let base = total / sections;
    let remainder = total % sections;
    (0..sections).map(|i| if i < remainder { base + 1 } else { base }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_division() {
        assert_eq!(even_distribution(36, 6, 0), vec![6, 12, 18, 24, 30, 36]);
        assert_eq!(cyclic_gaps(&even_distribution(36, 6, 0), 36), vec![6; 6]);
    }

    #[test]
    fn test_offset_wraps() {
        assert_eq!(even_distribution(42, 7, 3), vec![3, 9, 15, 21, 27, 33, 39]);
    }

    #[test]
    fn test_large_offset_reduced() {
        assert_eq!(even_distribution(10, 2, 23), even_distribution(10, 2, 3));
        let positions = even_distribution(10, 2, 23);
        assert!(positions.iter().all(|p| (1..=10).contains(p)));
    }

    #[test]
    fn test_degenerate() {
        assert!(even_distribution(20, 0, 5).is_empty());
        assert!(even_distribution(0, 3, 0).is_empty());
        assert_eq!(even_distribution(4, 9, 2), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_uniform_gaps_37_6() {
        let positions = even_distribution(37, 6, 0);
        assert_eq!(positions.len(), 6);
        let gaps = cyclic_gaps(&positions, 37);
        let min = gaps.iter().min().copied().unwrap_or(0);
        let max = gaps.iter().max().copied().unwrap_or(0);
        assert_eq!((min, max), (6, 7));
    }

    #[test]
    fn test_single_change() {
        assert_eq!(even_distribution(12, 1, 0), vec![12]);
        assert_eq!(even_distribution(12, 1, 3), vec![3]);
        assert_eq!(cyclic_gaps(&[3], 12), vec![12]);
    }

    #[test]
    fn test_rounding_half_up() {
        assert_eq!(div_round_half_up(5, 2), 3);
        assert_eq!(div_round_half_up(7, 2), 4);
        assert_eq!(div_round_half_up(4, 3), 1);
        assert_eq!(div_round_half_up(5, 3), 2);
        assert_eq!(div_round_half_up(u64::MAX, 1), u64::MAX);
    }

    #[test]
    fn test_split_evenly() {
        assert_eq!(split_evenly(12, 4), vec![3, 3, 3, 3]);
        assert_eq!(split_evenly(3, 5), vec![1, 1, 1, 0, 0]);
    }
}
