//! Timing functions: map elapsed milliseconds to a progress position.
//!
//! Every function here is pure. The same elapsed time always yields the same
//! position, so the animator can call them as often as it likes. Positions are
//! `f32` and clamped with `min`/`max`, which makes the boundaries exact: a
//! linear function reports exactly `1.0` at its length.

use std::collections::BTreeMap;

/// Maps elapsed time to a normalized position.
pub trait TimingFunction {
    /// Position at `elapsed_ms` after the animation started.
    fn position(&self, elapsed_ms: u32) -> f32;

    /// Whether the animation is over at `elapsed_ms`.
    fn is_done(&self, elapsed_ms: u32) -> bool {
        elapsed_ms >= self.length()
    }

    /// Duration in milliseconds. Endless functions report `u32::MAX`.
    fn length(&self) -> u32;
}

impl<T: TimingFunction + ?Sized> TimingFunction for Box<T> {
    fn position(&self, elapsed_ms: u32) -> f32 {
        (**self).position(elapsed_ms)
    }

    fn is_done(&self, elapsed_ms: u32) -> bool {
        (**self).is_done(elapsed_ms)
    }

    fn length(&self) -> u32 {
        (**self).length()
    }
}

fn clamp_unit(pos: f32) -> f32 {
    pos.max(0.0).min(1.0)
}

/// Linear progress `elapsed / length`. A zero length is done immediately.
fn progress(elapsed_ms: u32, length: u32) -> f32 {
    if length == 0 {
        return 1.0;
    }
    clamp_unit(elapsed_ms as f32 / length as f32)
}

// ---------------------------------------------------------------------------
// Linear / Power
// ---------------------------------------------------------------------------

/// Constant speed from 0 to 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Linear {
    pub length: u32,
}

impl Linear {
    pub fn new(length: u32) -> Self {
        Self { length }
    }
}

impl TimingFunction for Linear {
    fn position(&self, elapsed_ms: u32) -> f32 {
        progress(elapsed_ms, self.length)
    }

    fn length(&self) -> u32 {
        self.length
    }
}

/// `(elapsed / length) ^ factor`. A factor of 2 eases in quadratically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Power {
    pub length: u32,
    pub factor: f32,
}

impl Power {
    pub fn new(length: u32, factor: f32) -> Self {
        Self { length, factor }
    }
}

impl TimingFunction for Power {
    fn position(&self, elapsed_ms: u32) -> f32 {
        clamp_unit(progress(elapsed_ms, self.length).powf(self.factor))
    }

    fn length(&self) -> u32 {
        self.length
    }
}

// ---------------------------------------------------------------------------
// Interpolation
// ---------------------------------------------------------------------------

/// Keyframes interpolated linearly.
///
/// Keys are stored at `length * time` milliseconds. The start and end
/// positions are keys at 0 and `length`; after the last key its position holds.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpolation {
    length: u32,
    points: BTreeMap<u32, f32>,
}

impl Interpolation {
    /// Keyframes from `start` at time 0 to `end` at `length`.
    pub fn new(length: u32, start: f32, end: f32) -> Self {
        let mut f = Self { length, points: BTreeMap::new() };
        f.add_point(0.0, start);
        f.add_point(1.0, end);
        f
    }

    /// Add a keyframe at normalized `time`. An existing key at the same
    /// millisecond is replaced. Both `time` and `pos` are clamped to 0..=1.
    pub fn add_point(&mut self, time: f32, pos: f32) -> &mut Self {
        let key = (self.length as f32 * clamp_unit(time)) as u32;
        self.points.insert(key, clamp_unit(pos));
        self
    }

    /// Add a keyframe (builder).
    pub fn with_point(mut self, time: f32, pos: f32) -> Self {
        self.add_point(time, pos);
        self
    }

    /// Keyframes as `(milliseconds, position)`.
    pub fn points(&self) -> impl Iterator<Item = (u32, f32)> + '_ {
        self.points.iter().map(|(&t, &p)| (t, p))
    }
}

impl TimingFunction for Interpolation {
    fn position(&self, elapsed_ms: u32) -> f32 {
        let before = self.points.range(..=elapsed_ms).next_back();
        let after = self.points.range(elapsed_ms.saturating_add(1)..).next();
        match (before, after) {
            (Some((&t0, &p0)), Some((&t1, &p1))) => {
                let t = f64::from(elapsed_ms - t0) / f64::from(t1 - t0);
                (f64::from(p0) + (f64::from(p1) - f64::from(p0)) * t) as f32
            }
            (Some((_, &p)), None) | (None, Some((_, &p))) => p,
            (None, None) => 1.0,
        }
    }

    fn length(&self) -> u32 {
        self.length
    }
}

// ---------------------------------------------------------------------------
// CubicBezier
// ---------------------------------------------------------------------------

/// Cubic Bézier easing through `(0,0)`, `p1`, `p2`, `(1,1)`.
///
/// The curve parameter advances linearly with time and the curve's `y` is the
/// position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub length: u32,
    pub p1: (f32, f32),
    pub p2: (f32, f32),
}

impl CubicBezier {
    pub fn new(length: u32, p1: (f32, f32), p2: (f32, f32)) -> Self {
        Self { length, p1, p2 }
    }

    pub fn ease(length: u32) -> Self {
        Self::new(length, (0.25, 0.1), (0.25, 1.0))
    }

    pub fn ease_in(length: u32) -> Self {
        Self::new(length, (0.42, 0.0), (1.0, 1.0))
    }

    pub fn ease_out(length: u32) -> Self {
        Self::new(length, (0.0, 0.0), (0.58, 1.0))
    }

    pub fn ease_in_out(length: u32) -> Self {
        Self::new(length, (0.42, 0.0), (0.58, 1.0))
    }
}

fn lerp(a: (f32, f32), b: (f32, f32), t: f32) -> (f32, f32) {
    (a.0 * (1.0 - t) + b.0 * t, a.1 * (1.0 - t) + b.1 * t)
}

impl TimingFunction for CubicBezier {
    fn position(&self, elapsed_ms: u32) -> f32 {
        let t = progress(elapsed_ms, self.length);
        let a = lerp((0.0, 0.0), self.p1, t);
        let b = lerp(self.p1, self.p2, t);
        let c = lerp(self.p2, (1.0, 1.0), t);
        let d = lerp(a, b, t);
        let e = lerp(b, c, t);
        lerp(d, e, t).1
    }

    fn length(&self) -> u32 {
        self.length
    }
}

// ---------------------------------------------------------------------------
// Repeat
// ---------------------------------------------------------------------------

/// Replays a base function several times, optionally ping-ponging.
///
/// With `auto_reverse`, odd laps (the second, fourth, ...) report
/// `1 - position`. After the last lap the end of that lap holds.
#[derive(Debug, Clone, PartialEq)]
pub struct Repeat<F> {
    base: F,
    /// `None` repeats forever.
    count: Option<u32>,
    auto_reverse: bool,
}

impl<F: TimingFunction> Repeat<F> {
    pub fn new(base: F, count: u32, auto_reverse: bool) -> Self {
        Self { base, count: Some(count.max(1)), auto_reverse }
    }

    /// Repeat without end.
    pub fn forever(base: F, auto_reverse: bool) -> Self {
        Self { base, count: None, auto_reverse }
    }

    pub fn count(&self) -> Option<u32> {
        self.count
    }

    pub fn base(&self) -> &F {
        &self.base
    }

    /// Which lap `elapsed_ms` falls in, and the time inside that lap.
    fn lap(&self, elapsed_ms: u32) -> (u32, u32) {
        let len = self.base.length();
        if len == 0 {
            return (self.count.map_or(0, |c| c - 1), 0);
        }
        let lap = elapsed_ms / len;
        match self.count {
            Some(count) if lap >= count => (count - 1, len),
            _ => (lap, elapsed_ms - lap * len),
        }
    }
}

impl<F: TimingFunction> TimingFunction for Repeat<F> {
    fn position(&self, elapsed_ms: u32) -> f32 {
        let (lap, local) = self.lap(elapsed_ms);
        let pos = self.base.position(local);
        if self.auto_reverse && lap % 2 == 1 {
            1.0 - pos
        } else {
            pos
        }
    }

    fn is_done(&self, elapsed_ms: u32) -> bool {
        match self.count {
            Some(count) => u64::from(elapsed_ms) >= u64::from(self.base.length()) * u64::from(count),
            None => false,
        }
    }

    fn length(&self) -> u32 {
        match self.count {
            Some(count) => self.base.length().saturating_mul(count),
            None => u32::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Linear / Power ───────────────────────────────────────────────

    #[test]
    fn linear_positions() {
        let f = Linear::new(100);
        assert_eq!(f.position(0), 0.0);
        assert_eq!(f.position(50), 0.5);
        assert_eq!(f.position(100), 1.0);
        assert_eq!(f.position(150), 1.0);
        assert!(!f.is_done(99));
        assert!(f.is_done(100));
    }

    #[test]
    fn zero_length_is_immediately_done() {
        let f = Linear::new(0);
        assert_eq!(f.position(0), 1.0);
        assert!(f.is_done(0));
    }

    #[test]
    fn power_positions() {
        let f = Power::new(100, 2.0);
        assert_eq!(f.position(50), 0.25);
        assert!((f.position(86) - 0.7396).abs() < 1e-5);
        assert_eq!(f.position(100), 1.0);
        assert_eq!(f.position(400), 1.0);
    }

    // ── Interpolation ────────────────────────────────────────────────

    #[test]
    fn interpolation_default_endpoints() {
        let f = Interpolation::new(100, 0.0, 1.0);
        assert_eq!(f.position(0), 0.0);
        assert_eq!(f.position(25), 0.25);
        assert_eq!(f.position(100), 1.0);
        assert_eq!(f.position(1000), 1.0);
    }

    #[test]
    fn interpolation_between_keyframes() {
        let f = Interpolation::new(200, 0.0, 1.0).with_point(0.5, 0.8);
        let keys: Vec<_> = f.points().collect();
        assert_eq!(keys, vec![(0, 0.0), (100, 0.8), (200, 1.0)]);
        assert_eq!(f.position(100), 0.8);
        assert!((f.position(50) - 0.4).abs() < 1e-6);
        assert!((f.position(150) - 0.9).abs() < 1e-6);
    }

    #[test]
    fn interpolation_custom_end_holds() {
        let f = Interpolation::new(100, 1.0, 0.0);
        assert_eq!(f.position(50), 0.5);
        assert_eq!(f.position(500), 0.0);
    }

    #[test]
    fn interpolation_keyframes_stay_in_unit_range() {
        let f = Interpolation::new(100, -0.5, 1.0).with_point(0.5, 1.5).with_point(2.0, 3.0);
        let keys: Vec<_> = f.points().collect();
        assert_eq!(keys, vec![(0, 0.0), (50, 1.0), (100, 1.0)]);
        assert_eq!(f.position(75), 1.0);
    }

    // ── CubicBezier ──────────────────────────────────────────────────

    #[test]
    fn bezier_endpoints_are_exact() {
        for f in [
            CubicBezier::ease(100),
            CubicBezier::ease_in(100),
            CubicBezier::ease_out(100),
            CubicBezier::ease_in_out(100),
        ] {
            assert_eq!(f.position(0), 0.0);
            assert_eq!(f.position(100), 1.0);
            assert_eq!(f.position(300), 1.0);
            assert!(f.is_done(100));
        }
    }

    #[test]
    fn bezier_ease_in_starts_slow() {
        let f = CubicBezier::ease_in(100);
        assert!(f.position(25) < 0.25);
        assert!(f.position(25) < f.position(50));
        let g = CubicBezier::ease_in_out(100);
        assert!((g.position(50) - 0.5).abs() < 1e-6);
    }

    // ── Repeat ───────────────────────────────────────────────────────

    #[test]
    fn repeat_wraps() {
        let f = Repeat::new(Linear::new(100), 2, false);
        assert!((f.position(110) - 0.1).abs() < 1e-6);
        assert!(!f.is_done(100));
        assert!(!f.is_done(199));
        assert!(f.is_done(200));
        assert_eq!(f.position(200), 1.0);
        assert_eq!(f.length(), 200);
    }

    #[test]
    fn repeat_auto_reverse() {
        let f = Repeat::new(Linear::new(100), 2, true);
        assert_eq!(f.position(50), 0.5);
        assert!((f.position(110) - 0.9).abs() < 1e-6);
        assert_eq!(f.position(200), 0.0);
        assert_eq!(f.position(999), 0.0);
        assert!(f.is_done(200));
    }

    #[test]
    fn repeat_forever_never_finishes() {
        let f = Repeat::forever(Linear::new(10), true);
        assert!(!f.is_done(u32::MAX));
        assert_eq!(f.position(5), 0.5);
        assert_eq!(f.position(15), 0.5);
        assert!((f.position(12) - 0.8).abs() < 1e-6);
        assert_eq!(f.length(), u32::MAX);
    }

    #[test]
    fn repeat_of_zero_length_base() {
        let f = Repeat::new(Linear::new(0), 3, true);
        assert!(f.is_done(0));
        // Third lap, played forward.
        assert_eq!(f.position(0), 1.0);
    }

    #[test]
    fn boxed_functions_delegate() {
        let f: Box<dyn TimingFunction> = Box::new(Linear::new(100));
        assert_eq!(f.position(50), 0.5);
        assert_eq!(f.length(), 100);
        let r = Repeat::new(f, 2, false);
        assert!(r.is_done(200));
    }
}
