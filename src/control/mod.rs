//! Controls: a scalar value with range, tag, editing sessions and listeners.
//!
//! A [`Control`] stores its value normalized to `[0, 1]` and maps it to the user
//! range `[min, max]`. Assignments clamp. Listeners are held weakly and are only
//! notified when the normalized value actually changes.

pub mod interaction;

pub use interaction::{Interaction, Orientation, Slider, Toggle};

use std::cell::RefCell;
use std::rc::{Rc, Weak};

// ---------------------------------------------------------------------------
// ControlListener
// ---------------------------------------------------------------------------

/// Receives value and edit-session notifications from controls.
///
/// Listeners usually dispatch on [`Control::tag`] rather than on identity.
pub trait ControlListener {
    fn value_changed(&mut self, control: &Control);

    fn control_begin_edit(&mut self, _control: &Control) {}

    fn control_end_edit(&mut self, _control: &Control) {}
}

/// Shared handle to a listener; controls keep only a [`Weak`] to it.
pub type SharedListener = Rc<RefCell<dyn ControlListener>>;

/// Outermost edit-session transition, recorded for the owning frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditPhase {
    Began,
    Ended,
}

// ---------------------------------------------------------------------------
// Control
// ---------------------------------------------------------------------------

/// Value, range and listener state of a control.
pub struct Control {
    tag: i32,
    normalized: f32,
    min: f32,
    max: f32,
    default_value: f32,
    wheel_inc: f32,
    editing: u32,
    dirty: bool,
    listeners: Vec<Weak<RefCell<dyn ControlListener>>>,
    edit_log: Option<Vec<EditPhase>>,
}

impl Control {
    /// Tag of a control that no listener addresses.
    pub const UNTAGGED: i32 = -1;

    /// A control over `[0, 1]` with value 0 and default 0.5.
    pub fn new(tag: i32) -> Self {
        Self {
            tag,
            normalized: 0.0,
            min: 0.0,
            max: 1.0,
            default_value: 0.5,
            wheel_inc: 0.1,
            editing: 0,
            dirty: false,
            listeners: Vec::new(),
            edit_log: None,
        }
    }

    /// Set the user range (builder). `min > max` is swapped.
    pub fn with_range(mut self, min: f32, max: f32) -> Self {
        self.set_range(min, max);
        self
    }

    /// Set the initial value without notifying (builder).
    pub fn with_value(mut self, value: f32) -> Self {
        self.normalized = self.to_normalized(value);
        self
    }

    /// Set the default value (builder).
    pub fn with_default(mut self, value: f32) -> Self {
        self.default_value = value;
        self
    }

    pub fn tag(&self) -> i32 {
        self.tag
    }

    pub fn set_tag(&mut self, tag: i32) {
        self.tag = tag;
    }

    pub fn is_tagged(&self) -> bool {
        self.tag != Self::UNTAGGED
    }

    // ── Range ────────────────────────────────────────────────────────

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn range(&self) -> f32 {
        self.max - self.min
    }

    /// Change the range, keeping the plain value (clamped into the new range).
    pub fn set_range(&mut self, min: f32, max: f32) {
        let plain = self.value();
        self.min = min.min(max);
        self.max = min.max(max);
        self.normalized = self.to_normalized(plain);
    }

    pub fn set_min(&mut self, min: f32) {
        self.set_range(min, self.max.max(min));
    }

    pub fn set_max(&mut self, max: f32) {
        self.set_range(self.min.min(max), max);
    }

    pub fn default_value(&self) -> f32 {
        self.default_value
    }

    pub fn set_default_value(&mut self, value: f32) {
        self.default_value = value;
    }

    /// Normalized step used by the mouse wheel and arrow keys.
    pub fn wheel_inc(&self) -> f32 {
        self.wheel_inc
    }

    pub fn set_wheel_inc(&mut self, inc: f32) {
        self.wheel_inc = inc;
    }

    // ── Value ────────────────────────────────────────────────────────

    /// The value in the user range.
    pub fn value(&self) -> f32 {
        self.min + self.normalized * (self.max - self.min)
    }

    /// The value in `[0, 1]`.
    pub fn value_normalized(&self) -> f32 {
        self.normalized
    }

    fn to_normalized(&self, plain: f32) -> f32 {
        let range = self.range();
        if range == 0.0 {
            return 0.0;
        }
        let plain = plain.max(self.min).min(self.max);
        ((plain - self.min) / range).max(0.0).min(1.0)
    }

    /// Assign a user-range value, clamping into `[min, max]`.
    ///
    /// Returns `true` and notifies listeners if the normalized value changed.
    pub fn set_value(&mut self, value: f32) -> bool {
        let normalized = self.to_normalized(value);
        self.store(normalized)
    }

    /// Assign a normalized value, clamping into `[0, 1]`.
    pub fn set_value_normalized(&mut self, value: f32) -> bool {
        let normalized = if self.range() == 0.0 {
            0.0
        } else {
            value.max(0.0).min(1.0)
        };
        self.store(normalized)
    }

    fn store(&mut self, normalized: f32) -> bool {
        if normalized == self.normalized {
            return false;
        }
        self.normalized = normalized;
        self.dirty = true;
        self.notify(|listener, control| listener.value_changed(control));
        true
    }

    /// Reset to the default value. Returns whether the value changed.
    pub fn reset_to_default(&mut self) -> bool {
        self.set_value(self.default_value)
    }

    // ── Dirty flag ───────────────────────────────────────────────────

    /// Whether the value changed since the last redraw request.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }

    /// Clear the dirty flag, returning its previous value.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    // ── Edit sessions ────────────────────────────────────────────────

    pub fn is_editing(&self) -> bool {
        self.editing > 0
    }

    /// Open an edit session. Returns `true` if this opened the outermost one.
    pub fn begin_edit(&mut self) -> bool {
        self.editing += 1;
        if self.editing == 1 {
            self.log_phase(EditPhase::Began);
            self.notify(|listener, control| listener.control_begin_edit(control));
            return true;
        }
        false
    }

    /// Close an edit session. Returns `true` if this closed the outermost one.
    /// Without an open session this does nothing.
    pub fn end_edit(&mut self) -> bool {
        if self.editing == 0 {
            return false;
        }
        self.editing -= 1;
        if self.editing == 0 {
            self.log_phase(EditPhase::Ended);
            self.notify(|listener, control| listener.control_end_edit(control));
            return true;
        }
        false
    }

    fn log_phase(&mut self, phase: EditPhase) {
        if let Some(log) = self.edit_log.as_mut() {
            log.push(phase);
        }
    }

    /// Start recording outermost edit transitions. The tree enables this for
    /// every control it owns so the frame can broadcast them.
    pub(crate) fn track_edit_phases(&mut self) {
        self.edit_log.get_or_insert_with(Vec::new);
    }

    /// Take the transitions recorded since the last call.
    pub(crate) fn take_edit_phases(&mut self) -> Vec<EditPhase> {
        self.edit_log.as_mut().map(std::mem::take).unwrap_or_default()
    }

    // ── Listeners ────────────────────────────────────────────────────

    /// Register a listener. Registering the same listener twice is a no-op.
    pub fn add_listener(&mut self, listener: &SharedListener) {
        let weak = Rc::downgrade(listener);
        if self.listeners.iter().any(|l| l.ptr_eq(&weak)) {
            tracing::warn!(tag = self.tag, "listener already registered");
            return;
        }
        self.listeners.push(weak);
    }

    /// Unregister a listener. Returns whether it was registered.
    pub fn remove_listener(&mut self, listener: &SharedListener) -> bool {
        let weak = Rc::downgrade(listener);
        let before = self.listeners.len();
        self.listeners.retain(|l| !l.ptr_eq(&weak));
        self.listeners.len() != before
    }

    /// Number of listeners that are still alive.
    pub fn listener_count(&self) -> usize {
        self.listeners.iter().filter(|l| l.strong_count() > 0).count()
    }

    fn notify(&mut self, mut f: impl FnMut(&mut dyn ControlListener, &Control)) {
        self.listeners.retain(|l| l.strong_count() > 0);
        for weak in &self.listeners {
            if let Some(listener) = weak.upgrade() {
                match listener.try_borrow_mut() {
                    Ok(mut guard) => f(&mut *guard, self),
                    Err(_) => {
                        tracing::warn!(tag = self.tag, "listener re-entered during notification")
                    }
                }
            }
        }
    }
}

impl Default for Control {
    fn default() -> Self {
        Self::new(Self::UNTAGGED)
    }
}

impl std::fmt::Debug for Control {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Control")
            .field("tag", &self.tag)
            .field("value", &self.value())
            .field("min", &self.min)
            .field("max", &self.max)
            .field("editing", &self.editing)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl ControlListener for Recorder {
        fn value_changed(&mut self, control: &Control) {
            self.events.push(format!("changed {} {}", control.tag(), control.value()));
        }
        fn control_begin_edit(&mut self, control: &Control) {
            self.events.push(format!("begin {}", control.tag()));
        }
        fn control_end_edit(&mut self, control: &Control) {
            self.events.push(format!("end {}", control.tag()));
        }
    }

    fn recorder() -> (Rc<RefCell<Recorder>>, SharedListener) {
        let rec = Rc::new(RefCell::new(Recorder::default()));
        let shared: SharedListener = rec.clone();
        (rec, shared)
    }

    #[test]
    fn defaults() {
        let c = Control::default();
        assert_eq!(c.tag(), Control::UNTAGGED);
        assert!(!c.is_tagged());
        assert_eq!(c.value(), 0.0);
        assert_eq!(c.default_value(), 0.5);
        assert!(!c.is_editing());
    }

    #[test]
    fn user_range_maps_affinely() {
        let mut c = Control::new(1).with_range(-10.0, 10.0);
        c.set_value(5.0);
        assert_eq!(c.value_normalized(), 0.75);
        assert_eq!(c.value(), 5.0);
        c.set_value_normalized(0.25);
        assert_eq!(c.value(), -5.0);
    }

    #[test]
    fn out_of_range_clamps() {
        let mut c = Control::new(1).with_range(0.0, 100.0);
        c.set_value(250.0);
        assert_eq!(c.value(), 100.0);
        c.set_value(-3.0);
        assert_eq!(c.value(), 0.0);
        c.set_value_normalized(7.0);
        assert_eq!(c.value_normalized(), 1.0);
    }

    #[test]
    fn zero_range_pins_to_min() {
        let mut c = Control::new(1).with_range(4.0, 4.0);
        assert!(!c.set_value(9.0));
        assert_eq!(c.value(), 4.0);
        assert_eq!(c.value_normalized(), 0.0);
    }

    #[test]
    fn swapped_range_is_normalized() {
        let c = Control::new(1).with_range(10.0, 0.0);
        assert_eq!(c.min(), 0.0);
        assert_eq!(c.max(), 10.0);
    }

    #[test]
    fn set_range_keeps_plain_value() {
        let mut c = Control::new(1).with_range(0.0, 10.0).with_value(4.0);
        c.set_max(20.0);
        assert_eq!(c.value(), 4.0);
        assert_eq!(c.value_normalized(), 0.2);
        c.set_min(5.0);
        assert_eq!(c.value(), 5.0);
    }

    #[test]
    fn repeated_value_notifies_once() {
        let (rec, shared) = recorder();
        let mut c = Control::new(7);
        c.add_listener(&shared);

        assert!(c.set_value(0.5));
        assert!(!c.set_value(0.5));
        assert_eq!(rec.borrow().events, vec!["changed 7 0.5"]);
    }

    #[test]
    fn clamped_values_compare_after_clamping() {
        let (rec, shared) = recorder();
        let mut c = Control::new(7);
        c.add_listener(&shared);
        assert!(c.set_value(2.0));
        assert!(!c.set_value(3.0));
        assert_eq!(rec.borrow().events.len(), 1);
    }

    #[test]
    fn change_marks_dirty() {
        let mut c = Control::new(1);
        assert!(!c.is_dirty());
        c.set_value(0.3);
        assert!(c.take_dirty());
        assert!(!c.is_dirty());
        c.set_value(0.3);
        assert!(!c.is_dirty());
    }

    #[test]
    fn listeners_notified_in_registration_order() {
        struct Tagger(Rc<RefCell<Vec<u8>>>, u8);
        impl ControlListener for Tagger {
            fn value_changed(&mut self, _: &Control) {
                self.0.borrow_mut().push(self.1);
            }
        }
        let log = Rc::new(RefCell::new(Vec::new()));
        let a: SharedListener = Rc::new(RefCell::new(Tagger(log.clone(), 1)));
        let b: SharedListener = Rc::new(RefCell::new(Tagger(log.clone(), 2)));
        let mut c = Control::new(1);
        c.add_listener(&a);
        c.add_listener(&b);
        c.add_listener(&a);
        c.set_value(1.0);
        assert_eq!(*log.borrow(), vec![1, 2]);
    }

    #[test]
    fn dropped_listener_is_skipped() {
        let (rec, shared) = recorder();
        let mut c = Control::new(1);
        c.add_listener(&shared);
        drop(shared);
        drop(rec);
        assert_eq!(c.listener_count(), 0);
        assert!(c.set_value(1.0));
    }

    #[test]
    fn remove_listener() {
        let (rec, shared) = recorder();
        let mut c = Control::new(1);
        c.add_listener(&shared);
        assert!(c.remove_listener(&shared));
        assert!(!c.remove_listener(&shared));
        c.set_value(1.0);
        assert!(rec.borrow().events.is_empty());
    }

    #[test]
    fn nested_edit_sessions_notify_outermost_only() {
        let (rec, shared) = recorder();
        let mut c = Control::new(3);
        c.add_listener(&shared);

        assert!(c.begin_edit());
        assert!(!c.begin_edit());
        c.set_value(1.0);
        assert!(!c.end_edit());
        assert!(c.is_editing());
        assert!(c.end_edit());
        assert!(!c.end_edit());

        assert_eq!(rec.borrow().events, vec!["begin 3", "changed 3 1", "end 3"]);
    }

    #[test]
    fn edit_phases_recorded_only_when_tracked() {
        let mut c = Control::new(1);
        c.begin_edit();
        c.end_edit();
        assert!(c.take_edit_phases().is_empty());

        c.track_edit_phases();
        c.begin_edit();
        c.begin_edit();
        c.end_edit();
        c.end_edit();
        assert_eq!(c.take_edit_phases(), vec![EditPhase::Began, EditPhase::Ended]);
        assert!(c.take_edit_phases().is_empty());
    }

    #[test]
    fn reset_to_default() {
        let mut c = Control::new(1).with_range(0.0, 10.0).with_default(2.0);
        assert!(c.reset_to_default());
        assert_eq!(c.value(), 2.0);
        assert!(!c.reset_to_default());
    }
}
