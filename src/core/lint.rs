/// Outcome block coverage — which die faces an author's ranges leave open.
///
/// Gaps are legal (they resolve to the fallback line) but are usually an
/// oversight, so tools surface them before a continuation is posted.

use crate::schema::outcome::OutcomeRange;

/// Coverage of a set of ranges over the faces `1..=sides`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CoverageReport {
    pub sides: u32,
    /// Maximal runs of faces no range matches, as inclusive `(low, high)`.
    pub gaps: Vec<(u32, u32)>,
    /// Indices of ranges that can never win: every face they cover on this
    /// die is already taken by an earlier range.
    pub shadowed: Vec<usize>,
    /// Indices of ranges with no face on this die at all.
    pub out_of_range: Vec<usize>,
}

impl CoverageReport {
    pub fn is_complete(&self) -> bool {
        self.gaps.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        self.gaps.is_empty() && self.shadowed.is_empty() && self.out_of_range.is_empty()
    }

    /// Number of faces that fall through to the fallback line.
    pub fn uncovered_faces(&self) -> u32 {
        self.gaps.iter().map(|(low, high)| high - low + 1).sum()
    }
}

/// Analyse how `outcomes` cover a die with `sides` faces.
///
/// Works on intervals rather than individual faces, so the cost depends on
/// the number of ranges, not the size of the die.
pub fn coverage(outcomes: &[OutcomeRange], sides: u32) -> CoverageReport {
    let sides = sides.max(1);
    // Disjoint, sorted, non-adjacent spans claimed by earlier ranges.
    let mut claimed: Vec<(u32, u32)> = Vec::new();
    let mut report = CoverageReport {
        sides,
        ..CoverageReport::default()
    };

    for (i, range) in outcomes.iter().enumerate() {
        if range.low > sides || range.high < 1 {
            report.out_of_range.push(i);
            continue;
        }
        let low = range.low.max(1);
        let high = range.high.min(sides);
        if claimed.iter().any(|&(a, b)| a <= low && high <= b) {
            report.shadowed.push(i);
            continue;
        }
        claim(&mut claimed, low, high);
    }

    let mut next = 1u64;
    for &(a, b) in &claimed {
        if u64::from(a) > next {
            report.gaps.push((next as u32, a - 1));
        }
        next = u64::from(b) + 1;
    }
    if next <= u64::from(sides) {
        report.gaps.push((next as u32, sides));
    }

    report
}

/// Add `[low, high]` to `spans`, merging overlapping and touching spans.
fn claim(spans: &mut Vec<(u32, u32)>, low: u32, high: u32) {
    spans.push((low, high));
    spans.sort_unstable();
    let mut merged: Vec<(u32, u32)> = Vec::with_capacity(spans.len());
    for &(a, b) in spans.iter() {
        match merged.last_mut() {
            Some(last) if u64::from(a) <= u64::from(last.1) + 1 => last.1 = last.1.max(b),
            _ => merged.push((a, b)),
        }
    }
    *spans = merged;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(low: u32, high: u32) -> OutcomeRange {
        OutcomeRange::new(low, high, "x")
    }

    #[test]
    fn full_coverage() {
        let report = coverage(&[r(1, 9), r(10, 20)], 20);
        assert!(report.is_complete());
        assert!(report.is_clean());
        assert_eq!(report.uncovered_faces(), 0);
    }

    #[test]
    fn gaps_are_merged_runs() {
        let report = coverage(&[r(3, 5), r(9, 9)], 12);
        assert_eq!(report.gaps, vec![(1, 2), (6, 8), (10, 12)]);
        assert_eq!(report.uncovered_faces(), 8);
    }

    #[test]
    fn empty_outcomes_leave_whole_die_open() {
        let report = coverage(&[], 6);
        assert_eq!(report.gaps, vec![(1, 6)]);
    }

    #[test]
    fn shadowed_range_detected() {
        let report = coverage(&[r(1, 20), r(5, 10)], 20);
        assert!(report.is_complete());
        assert_eq!(report.shadowed, vec![1]);
        assert!(!report.is_clean());
    }

    #[test]
    fn partial_overlap_is_not_shadowed() {
        let report = coverage(&[r(1, 10), r(5, 15)], 20);
        assert!(report.shadowed.is_empty());
        assert_eq!(report.gaps, vec![(16, 20)]);
    }

    #[test]
    fn out_of_range_detected() {
        let report = coverage(&[r(1, 20), r(21, 30), r(0, 0)], 20);
        assert_eq!(report.out_of_range, vec![1, 2]);
        assert!(report.shadowed.is_empty());
    }

    #[test]
    fn shadowed_by_union_of_earlier_ranges() {
        let report = coverage(&[r(1, 5), r(6, 10), r(3, 8)], 10);
        assert_eq!(report.shadowed, vec![2]);
        assert!(report.is_complete());
    }

    #[test]
    fn huge_die_does_not_allocate_per_face() {
        let report = coverage(&[r(1, 20)], u32::MAX);
        assert_eq!(report.gaps, vec![(21, u32::MAX)]);
        assert_eq!(report.uncovered_faces(), u32::MAX - 20);

        let full = coverage(&[r(1, u32::MAX)], u32::MAX);
        assert!(full.is_clean());

        let empty = coverage(&[], u32::MAX);
        assert_eq!(empty.gaps, vec![(1, u32::MAX)]);
        assert_eq!(empty.uncovered_faces(), u32::MAX);
    }

    #[test]
    fn range_past_die_is_clipped() {
        let report = coverage(&[r(1, 3), r(4, 100)], 6);
        assert!(report.is_clean());
    }
}
