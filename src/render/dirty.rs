//! Dirty-region accumulation between frame draws.
//!
//! Invalidation requests are kept as a short list of disjoint rectangles.
//! Overlapping requests merge into their bounding rect, and once the list grows
//! past its limit it collapses into a single bounding rect. Every step only
//! grows the covered area, so a requested pixel is never lost.

use crate::geometry::Rect;

/// Pending redraw area of a frame, in frame coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct DirtyRegion {
    rects: Vec<Rect>,
    bounds: Rect,
    limit: usize,
}

impl DirtyRegion {
    /// An empty region clipped to `bounds`, holding at most `limit` rects.
    pub fn new(bounds: Rect, limit: usize) -> Self {
        Self {
            rects: Vec::new(),
            bounds,
            limit: limit.max(1),
        }
    }

    /// Change the clipping bounds (on frame resize). Pending rects are clipped.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.rects = std::mem::take(&mut self.rects)
            .into_iter()
            .map(|r| r.intersect(bounds))
            .filter(|r| !r.is_empty())
            .collect();
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Add `rect` to the region.
    pub fn add(&mut self, rect: Rect) {
        let mut rect = rect.normalize().intersect(self.bounds);
        if rect.is_empty() {
            return;
        }
        if self.rects.iter().any(|r| r.contains_rect(rect)) {
            return;
        }
        // Absorb everything the new rect touches; unions can reach further
        // rects, so repeat until stable.
        loop {
            let before = self.rects.len();
            self.rects.retain(|r| {
                if r.overlaps(rect) {
                    rect = rect.union(*r);
                    false
                } else {
                    true
                }
            });
            if self.rects.len() == before {
                break;
            }
        }
        self.rects.push(rect);
        if self.rects.len() > self.limit {
            let all = self.bounding_rect();
            tracing::trace!(?all, limit = self.limit, "dirty region collapsed");
            self.rects.clear();
            self.rects.push(all);
        }
    }

    /// Mark the whole bounds dirty.
    pub fn add_all(&mut self) {
        self.rects.clear();
        if !self.bounds.is_empty() {
            self.rects.push(self.bounds);
        }
    }

    pub fn is_dirty(&self) -> bool {
        !self.rects.is_empty()
    }

    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    /// Union of all pending rects.
    pub fn bounding_rect(&self) -> Rect {
        self.rects.iter().fold(Rect::EMPTY, |acc, r| acc.union(*r))
    }

    /// Remove and return the pending rects.
    pub fn take(&mut self) -> Vec<Rect> {
        std::mem::take(&mut self.rects)
    }

    pub fn clear(&mut self) {
        self.rects.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region() -> DirtyRegion {
        DirtyRegion::new(Rect::from_size(100.0, 100.0), 4)
    }

    #[test]
    fn starts_clean() {
        let r = region();
        assert!(!r.is_dirty());
        assert_eq!(r.bounding_rect(), Rect::EMPTY);
    }

    #[test]
    fn disjoint_rects_stay_separate() {
        let mut r = region();
        r.add(Rect::new(0.0, 0.0, 10.0, 10.0));
        r.add(Rect::new(50.0, 50.0, 60.0, 60.0));
        assert_eq!(r.rects().len(), 2);
    }

    #[test]
    fn overlapping_rects_merge() {
        let mut r = region();
        r.add(Rect::new(0.0, 0.0, 10.0, 10.0));
        r.add(Rect::new(5.0, 5.0, 20.0, 20.0));
        assert_eq!(r.rects(), &[Rect::new(0.0, 0.0, 20.0, 20.0)]);
    }

    #[test]
    fn merge_cascades() {
        let mut r = region();
        r.add(Rect::new(0.0, 0.0, 10.0, 10.0));
        r.add(Rect::new(30.0, 0.0, 40.0, 10.0));
        // Bridges both.
        r.add(Rect::new(5.0, 0.0, 35.0, 5.0));
        assert_eq!(r.rects(), &[Rect::new(0.0, 0.0, 40.0, 10.0)]);
    }

    #[test]
    fn contained_rect_is_ignored() {
        let mut r = region();
        r.add(Rect::new(0.0, 0.0, 50.0, 50.0));
        r.add(Rect::new(10.0, 10.0, 20.0, 20.0));
        assert_eq!(r.rects(), &[Rect::new(0.0, 0.0, 50.0, 50.0)]);
    }

    #[test]
    fn rects_are_clipped_to_bounds() {
        let mut r = region();
        r.add(Rect::new(90.0, 90.0, 200.0, 200.0));
        r.add(Rect::new(200.0, 200.0, 300.0, 300.0));
        assert_eq!(r.rects(), &[Rect::new(90.0, 90.0, 100.0, 100.0)]);
    }

    #[test]
    fn collapses_past_limit() {
        let mut r = region();
        for i in 0..5 {
            let x = f64::from(i) * 20.0;
            r.add(Rect::new(x, 0.0, x + 5.0, 5.0));
        }
        assert_eq!(r.rects(), &[Rect::new(0.0, 0.0, 85.0, 5.0)]);
    }

    #[test]
    fn coverage_never_shrinks() {
        let mut r = region();
        let requests = [
            Rect::new(1.0, 1.0, 4.0, 4.0),
            Rect::new(60.0, 2.0, 70.0, 9.0),
            Rect::new(3.0, 3.0, 8.0, 8.0),
            Rect::new(20.0, 80.0, 30.0, 90.0),
            Rect::new(40.0, 40.0, 41.0, 41.0),
            Rect::new(65.0, 5.0, 99.0, 6.0),
        ];
        for req in requests {
            r.add(req);
        }
        for req in requests {
            assert!(
                r.rects().iter().any(|d| d.contains_rect(req)),
                "{req:?} not covered by {:?}",
                r.rects()
            );
        }
    }

    #[test]
    fn add_all_and_take() {
        let mut r = region();
        r.add(Rect::new(0.0, 0.0, 5.0, 5.0));
        r.add_all();
        assert_eq!(r.take(), vec![Rect::from_size(100.0, 100.0)]);
        assert!(!r.is_dirty());
    }

    #[test]
    fn set_bounds_clips_pending() {
        let mut r = region();
        r.add(Rect::new(40.0, 40.0, 60.0, 60.0));
        r.set_bounds(Rect::from_size(50.0, 50.0));
        assert_eq!(r.rects(), &[Rect::new(40.0, 40.0, 50.0, 50.0)]);
    }
}
