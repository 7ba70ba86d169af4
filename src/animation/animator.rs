//! The animator: every running animation of a frame, advanced on one clock.

use crate::render::DirtyRegion;
use crate::view::{ViewId, ViewMut, ViewTree};

use super::target::AnimationTarget;
use super::timing::TimingFunction;

/// Lifecycle of one animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationState {
    /// Added, not ticked yet.
    Scheduled,
    Running,
    Completed,
    Canceled,
}

/// Report of an animation that left the animator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finished {
    pub view: ViewId,
    pub name: String,
    pub canceled: bool,
}

struct Animation {
    view: ViewId,
    name: String,
    timing: Box<dyn TimingFunction>,
    target: Box<dyn AnimationTarget>,
    state: AnimationState,
    start_time: u64,
}

impl Animation {
    /// Deliver the finish callback and report it. The callback only runs when
    /// the view still exists.
    fn finish(
        mut self,
        canceled: bool,
        tree: &mut ViewTree,
        dirty: &mut DirtyRegion,
    ) -> Finished {
        self.state = if canceled {
            AnimationState::Canceled
        } else {
            AnimationState::Completed
        };
        match ViewMut::new(self.view, tree, dirty) {
            Some(mut view) => self.target.animation_finished(&mut view, &self.name, canceled),
            None => tracing::warn!(view = ?self.view, name = %self.name, "animation outlived its view"),
        }
        tracing::debug!(view = ?self.view, name = %self.name, state = ?self.state, "animation finished");
        Finished { view: self.view, name: self.name, canceled }
    }
}

/// Every animation of one frame, keyed by `(view, name)`.
///
/// Animations are ticked in the order they were added.
#[derive(Default)]
pub struct Animator {
    animations: Vec<Animation>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    fn position_of(&self, view: ViewId, name: &str) -> Option<usize> {
        self.animations
            .iter()
            .position(|a| a.view == view && a.name == name)
    }

    /// State of the animation `name` on `view`, if it is still active.
    pub fn state(&self, view: ViewId, name: &str) -> Option<AnimationState> {
        self.position_of(view, name).map(|i| self.animations[i].state)
    }

    /// Names of `view`'s active animations.
    pub fn names(&self, view: ViewId) -> Vec<&str> {
        self.animations
            .iter()
            .filter(|a| a.view == view)
            .map(|a| a.name.as_str())
            .collect()
    }

    /// Schedule an animation. One already running under the same key is
    /// canceled first; its report is returned.
    pub fn add(
        &mut self,
        view: ViewId,
        name: impl Into<String>,
        timing: impl TimingFunction + 'static,
        target: impl AnimationTarget + 'static,
        tree: &mut ViewTree,
        dirty: &mut DirtyRegion,
    ) -> Option<Finished> {
        let name = name.into();
        let replaced = self.remove(view, &name, tree, dirty);
        tracing::debug!(?view, name = %name, length = timing.length(), "animation added");
        self.animations.push(Animation {
            view,
            name,
            timing: Box::new(timing),
            target: Box::new(target),
            state: AnimationState::Scheduled,
            start_time: 0,
        });
        replaced
    }

    /// Cancel and remove one animation.
    pub fn remove(
        &mut self,
        view: ViewId,
        name: &str,
        tree: &mut ViewTree,
        dirty: &mut DirtyRegion,
    ) -> Option<Finished> {
        let index = self.position_of(view, name)?;
        let animation = self.animations.remove(index);
        Some(animation.finish(true, tree, dirty))
    }

    /// Cancel and remove every animation of `view`.
    pub fn remove_all(
        &mut self,
        view: ViewId,
        tree: &mut ViewTree,
        dirty: &mut DirtyRegion,
    ) -> Vec<Finished> {
        let (doomed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.animations)
            .into_iter()
            .partition(|a| a.view == view);
        self.animations = kept;
        doomed
            .into_iter()
            .map(|a| a.finish(true, tree, dirty))
            .collect()
    }

    /// Advance every animation to `now` (milliseconds on the frame clock).
    ///
    /// Animations start on their first tick. Each one gets its tick callback,
    /// and those whose timing function is done are then finished and removed.
    pub fn on_timer(&mut self, now: u64, tree: &mut ViewTree, dirty: &mut DirtyRegion) -> Vec<Finished> {
        let mut done = Vec::new();
        for (index, animation) in self.animations.iter_mut().enumerate() {
            let Some(mut view) = ViewMut::new(animation.view, tree, dirty) else {
                done.push((index, true));
                continue;
            };
            if animation.state == AnimationState::Scheduled {
                animation.state = AnimationState::Running;
                animation.start_time = now;
                animation.target.animation_start(&mut view, &animation.name);
            }
            let elapsed = u32::try_from(now.saturating_sub(animation.start_time)).unwrap_or(u32::MAX);
            let pos = animation.timing.position(elapsed);
            tracing::trace!(view = ?animation.view, name = %animation.name, elapsed, pos, "tick");
            animation.target.animation_tick(&mut view, &animation.name, pos);
            if animation.timing.is_done(elapsed) {
                done.push((index, false));
            }
        }

        let mut finished = Vec::with_capacity(done.len());
        for (index, canceled) in done.into_iter().rev() {
            let animation = self.animations.remove(index);
            finished.push(animation.finish(canceled, tree, dirty));
        }
        finished.reverse();
        finished
    }
}

impl std::fmt::Debug for Animator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.animations.iter().map(|a| (&a.name, a.state)))
            .finish()
    }
}
