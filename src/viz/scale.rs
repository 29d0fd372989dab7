//! Band scale for years and linear scale for counts.

/// Categorical scale: one uniform slot per distinct year, with padding between slots.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Vec<i32>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
}

impl BandScale {
    /// Band scale over `domain` (duplicates collapse to their first occurrence) mapped onto
    /// `[0, width]`, with equal inner and outer padding.
    pub fn new(domain: &[i32], width: f64, padding: f64) -> Self {
        let mut uniq: Vec<i32> = Vec::with_capacity(domain.len());
        for y in domain {
            if !uniq.contains(y) {
                uniq.push(*y);
            }
        }
        let padding = padding.clamp(0.0, 1.0);
        Self {
            domain: uniq,
            range: (0.0, width),
            padding_inner: padding,
            padding_outer: padding,
        }
    }

    pub fn domain(&self) -> &[i32] {
        &self.domain
    }

    fn step(&self) -> f64 {
        let n = self.domain.len() as f64;
        let span = self.range.1 - self.range.0;
        span / (n - self.padding_inner + 2.0 * self.padding_outer).max(1.0)
    }

    /// Width of each band.
    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }

    /// Left edge of the band for `year`, or `None` when the year is not in the domain.
    pub fn x(&self, year: i32) -> Option<f64> {
        let idx = self.domain.iter().position(|y| *y == year)?;
        let n = self.domain.len() as f64;
        let step = self.step();
        let span = self.range.1 - self.range.0;
        // Centre the bands; leftover space is split evenly on both sides.
        let start = self.range.0 + (span - step * (n - self.padding_inner)) * 0.5;
        Some(start + step * idx as f64)
    }
}

/// Linear scale from a count domain onto an inverted pixel range (0 at the bottom).
///
/// Not clamped: values past the domain map outside the range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    /// `[0, max]` onto `[height, 0]`.
    pub fn vertical(max: f64, height: f64) -> Self {
        Self {
            domain: (0.0, max),
            range: (height, 0.0),
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn map(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return r0;
        }
        r0 + (v - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Round tick values spaced by 1, 2 or 5 times a power of ten, about `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (d0, d1) = self.domain;
        let (lo, hi) = if d0 <= d1 { (d0, d1) } else { (d1, d0) };
        if count == 0 || hi <= lo {
            return vec![lo];
        }
        let step = tick_step(lo, hi, count);
        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    }
}

/// Pick a 1/2/5×10^k step giving roughly `count` intervals over `[lo, hi]`.
fn tick_step(lo: f64, hi: f64, count: usize) -> f64 {
    let raw = (hi - lo) / count as f64;
    let power = 10f64.powf(raw.log10().floor());
    let error = raw / power;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * power
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_layout_matches_padding_rules() {
        // 3 bands, padding 0.1: step = 300 / (3 - 0.1 + 0.2) = 96.774…
        let s = BandScale::new(&[1990, 1991, 1992], 300.0, 0.1);
        let step = 300.0 / 3.1;
        assert!((s.bandwidth() - step * 0.9).abs() < 1e-9);
        assert!((s.x(1990).unwrap() - step * 0.1).abs() < 1e-9);
        assert!((s.x(1991).unwrap() - s.x(1990).unwrap() - step).abs() < 1e-9);
        let right = s.x(1992).unwrap() + s.bandwidth();
        assert!((300.0 - right - step * 0.1).abs() < 1e-9);
        assert_eq!(s.x(2000), None);
    }

    #[test]
    fn band_domain_collapses_duplicates() {
        let s = BandScale::new(&[2001, 2000, 2001], 100.0, 0.1);
        assert_eq!(s.domain(), &[2001, 2000]);
    }

    #[test]
    fn empty_band_scale_is_harmless() {
        let s = BandScale::new(&[], 100.0, 0.1);
        assert_eq!(s.x(1990), None);
        assert!(s.bandwidth() >= 0.0);
    }

    #[test]
    fn vertical_scale_is_inverted_and_unclamped() {
        let y = LinearScale::vertical(28.0, 410.0);
        assert_eq!(y.map(0.0), 410.0);
        assert_eq!(y.map(28.0), 0.0);
        assert!(y.map(56.0) < 0.0);
    }

    #[test]
    fn ticks_for_fixed_domain() {
        let y = LinearScale::vertical(28.0, 410.0);
        let t = y.ticks(10);
        assert_eq!(t.first(), Some(&0.0));
        assert_eq!(t.last(), Some(&28.0));
        assert_eq!(t.len(), 15);
    }
}
