/// Range of time, from a start to an end, generally in seconds.
#[derive(Clone, Debug, PartialEq)]
struct TimeRange {
    start: f64,
    end: f64,
}

/// Abstracts non-contiguous chronological ranges of time, generally expressed in seconds.
///
/// This is the Rust-side mirror of an HTMLMediaElement's `buffered` attribute.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimeRanges {
    ranges: Vec<TimeRange>,
}

impl TimeRanges {
    /// Create a new empty `TimeRanges` object
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a `TimeRanges` object from a flat list of `[start0, end0, start1, end1, ...]`
    /// values, as sent by the JavaScript-side.
    ///
    /// A trailing odd value is ignored, as are ranges whose end is before their start.
    pub fn from_flat(flat: &[f64]) -> Self {
        let mut ranges = TimeRanges::new();
        flat.chunks_exact(2).for_each(|c| ranges.add(c[0], c[1]));
        ranges
    }

    /// Add a range of time to that `TimeRanges` object, merging it with the ranges that are
    /// already there.
    pub fn add(&mut self, start: f64, end: f64) {
        if !(end >= start) {
            return;
        }
        let insert_at = self
            .ranges
            .iter()
            .position(|r| r.start > start)
            .unwrap_or(self.ranges.len());
        self.ranges.insert(insert_at, TimeRange { start, end });

        let mut merged: Vec<TimeRange> = Vec::with_capacity(self.ranges.len());
        for range in self.ranges.drain(..) {
            match merged.last_mut() {
                Some(prev) if range.start <= prev.end => {
                    if range.end > prev.end {
                        prev.end = range.end;
                    }
                }
                _ => merged.push(range),
            }
        }
        self.ranges = merged;
    }

    /// Returns the end of the last (chronologically) buffered range.
    pub fn last_end(&self) -> Option<f64> {
        self.ranges.last().map(|r| r.end)
    }

    /// Proportion of a content of the given `duration` which is buffered, computed as the end
    /// of the last range divided by that duration, clamped to `[0, 1]`.
    ///
    /// Returns `0.` when the duration is not known yet (not strictly positive) or when nothing
    /// is buffered.
    pub fn buffered_fraction(&self, duration: f64) -> f64 {
        if !(duration > 0.) {
            return 0.;
        }
        match self.last_end() {
            Some(end) => (end / duration).clamp(0., 1.),
            None => 0.,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(ranges: &TimeRanges) -> Vec<(f64, f64)> {
        ranges.ranges.iter().map(|r| (r.start, r.end)).collect()
    }

    #[test]
    fn test_from_flat() {
        let ranges = TimeRanges::from_flat(&[0., 10., 20., 30.]);
        assert_eq!(bounds(&ranges), vec![(0., 10.), (20., 30.)]);
        assert_eq!(ranges.last_end(), Some(30.));

        let odd = TimeRanges::from_flat(&[0., 10., 20.]);
        assert_eq!(bounds(&odd), vec![(0., 10.)]);
        assert_eq!(TimeRanges::from_flat(&[]).last_end(), None);
    }

    #[test]
    fn test_add_merges_overlapping_ranges() {
        let mut ranges = TimeRanges::new();
        ranges.add(20., 30.);
        ranges.add(0., 5.);
        ranges.add(4., 21.);
        assert_eq!(bounds(&ranges), vec![(0., 30.)]);

        ranges.add(40., 50.);
        ranges.add(35., 36.);
        assert_eq!(bounds(&ranges), vec![(0., 30.), (35., 36.), (40., 50.)]);

        ranges.add(60., 50.);
        assert_eq!(ranges.last_end(), Some(50.));
    }

    #[test]
    fn test_buffered_fraction() {
        assert_eq!(TimeRanges::from_flat(&[0., 30.]).buffered_fraction(60.), 0.5);
        assert_eq!(
            TimeRanges::from_flat(&[0., 10., 40., 45.]).buffered_fraction(60.),
            0.75
        );
        assert_eq!(TimeRanges::from_flat(&[0., 30.]).buffered_fraction(0.), 0.);
        assert_eq!(TimeRanges::from_flat(&[0., 30.]).buffered_fraction(f64::NAN), 0.);
        assert_eq!(TimeRanges::new().buffered_fraction(60.), 0.);
        assert_eq!(TimeRanges::from_flat(&[0., 61.]).buffered_fraction(60.), 1.);
    }
}
