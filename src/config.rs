//! Frame configuration and the process-wide default.
//!
//! A [`FrameConfig`] is fixed when a frame is created. Frames built with
//! [`Frame::new`](crate::frame::Frame::new) take the process-wide default from
//! [`global`], which is created lazily on first use. Hosts that want different
//! defaults [`install`] one for a scope; [`teardown`] drops it at shutdown.

use std::sync::{Arc, PoisonError, RwLock};

use crate::color::Color;
use crate::event::Modifiers;

// ---------------------------------------------------------------------------
// FrameConfig
// ---------------------------------------------------------------------------

/// Configuration for a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameConfig {
    /// Animation tick period in milliseconds.
    pub tick_interval_ms: u64,
    /// Whether the focused view gets a focus ring.
    pub focus_drawing: bool,
    pub focus_color: Color,
    /// Focus ring stroke width.
    pub focus_width: f64,
    /// Modifier that resets a clicked control to its default value.
    pub default_value_modifier: Modifiers,
    /// Maximum number of separate dirty rects before they collapse into one.
    pub dirty_region_limit: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 16,
            focus_drawing: false,
            focus_color: Color::rgb(100, 100, 255),
            focus_width: 2.0,
            default_value_modifier: Modifiers::CONTROL,
            dirty_region_limit: 16,
        }
    }
}

impl FrameConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tick period (builder).
    pub fn with_tick_interval(mut self, ms: u64) -> Self {
        self.tick_interval_ms = ms.max(1);
        self
    }

    /// Enable focus ring drawing in the given color and width (builder).
    pub fn with_focus_drawing(mut self, color: Color, width: f64) -> Self {
        self.focus_drawing = true;
        self.focus_color = color;
        self.focus_width = width;
        self
    }

    /// Set the default-value modifier (builder).
    pub fn with_default_value_modifier(mut self, modifiers: Modifiers) -> Self {
        self.default_value_modifier = modifiers;
        self
    }

    /// Set the dirty rect limit (builder).
    pub fn with_dirty_region_limit(mut self, limit: usize) -> Self {
        self.dirty_region_limit = limit.max(1);
        self
    }

    /// Ticks per second for the configured period.
    pub fn ticks_per_second(&self) -> f64 {
        1000.0 / self.tick_interval_ms.max(1) as f64
    }
}

// ---------------------------------------------------------------------------
// Process-wide default
// ---------------------------------------------------------------------------

static GLOBAL: RwLock<Option<Arc<FrameConfig>>> = RwLock::new(None);

/// The process-wide default config, created on first use.
pub fn global() -> Arc<FrameConfig> {
    if let Some(cfg) = GLOBAL.read().unwrap_or_else(PoisonError::into_inner).as_ref() {
        return Arc::clone(cfg);
    }
    let mut slot = GLOBAL.write().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(slot.get_or_insert_with(|| Arc::new(FrameConfig::default())))
}

/// Replace the process-wide default until the returned guard is dropped.
#[must_use = "the previous config is restored when the guard drops"]
pub fn install(config: FrameConfig) -> ConfigScope {
    let mut slot = GLOBAL.write().unwrap_or_else(PoisonError::into_inner);
    let previous = slot.replace(Arc::new(config));
    ConfigScope { previous }
}

/// Drop the process-wide default. The next [`global`] call recreates it.
pub fn teardown() {
    GLOBAL.write().unwrap_or_else(PoisonError::into_inner).take();
}

/// Restores the previously installed config on drop.
#[derive(Debug)]
pub struct ConfigScope {
    previous: Option<Arc<FrameConfig>>,
}

impl Drop for ConfigScope {
    fn drop(&mut self) {
        let mut slot = GLOBAL.write().unwrap_or_else(PoisonError::into_inner);
        *slot = self.previous.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = FrameConfig::default();
        assert_eq!(cfg.tick_interval_ms, 16);
        assert!(!cfg.focus_drawing);
        assert_eq!(cfg.default_value_modifier, Modifiers::CONTROL);
        assert_eq!(cfg.dirty_region_limit, 16);
        assert!((cfg.ticks_per_second() - 62.5).abs() < 1e-9);
    }

    #[test]
    fn builder_chain() {
        let cfg = FrameConfig::new()
            .with_tick_interval(0)
            .with_focus_drawing(Color::RED, 3.0)
            .with_default_value_modifier(Modifiers::ALT)
            .with_dirty_region_limit(0);
        assert_eq!(cfg.tick_interval_ms, 1);
        assert!(cfg.focus_drawing);
        assert_eq!(cfg.focus_color, Color::RED);
        assert_eq!(cfg.focus_width, 3.0);
        assert_eq!(cfg.default_value_modifier, Modifiers::ALT);
        assert_eq!(cfg.dirty_region_limit, 1);
    }

    // Other tests read the global concurrently, so this one only changes a
    // field nothing else asserts on.
    #[test]
    fn install_scope_restores_previous() {
        let before = global();
        {
            let _scope = install(FrameConfig { focus_width: 5.0, ..(*before).clone() });
            assert_eq!(global().focus_width, 5.0);
        }
        assert_eq!(global().focus_width, before.focus_width);
    }
}
