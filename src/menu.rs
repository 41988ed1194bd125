// SPDX-License-Identifier: GPL-3.0-only

//! Collapse/expand state machine for the overlay menu.
//!
//! The widget has exactly two presentations: a small grab dot and the full
//! radial menu. [`MenuController`] owns the transition choreography between
//! them and acts on the window through the [`WindowSurface`] trait, which
//! the shell implements (and tests fake).
//!
//! # Geometry
//!
//! Expanding grows the window around its visual center: the footprint goes
//! from the collapsed square to the expanded square and the top-left shifts
//! by half the size delta on each axis, so the spot the user tapped stays
//! put. Collapsing applies the inverse offset, which makes
//! expand-then-collapse restore both size and position exactly.
//!
//! # Failure handling
//!
//! A failed transition must never leave the state flag disagreeing with
//! what is on screen. Expansion rolls back to the collapsed presentation;
//! collapsing forces the collapsed state regardless and reports what the
//! surface refused. Both paths log and swallow, keeping the overlay
//! unobtrusive.

use std::fmt;
use std::time::{Duration, Instant};

use crate::timer::SingleShotTimer;

/// Errors reported by a [`WindowSurface`] implementation.
#[derive(Debug, Clone)]
pub enum SurfaceError {
    /// The surface refused a resize.
    Resize(String),
    /// The surface refused a move.
    Reposition(String),
    /// The surface refused a visibility change.
    Visibility(String),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::Resize(msg) => write!(f, "window resize failed: {}", msg),
            SurfaceError::Reposition(msg) => write!(f, "window move failed: {}", msg),
            SurfaceError::Visibility(msg) => {
                write!(f, "menu visibility change failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for SurfaceError {}

/// The window operations the menu controller needs from the UI shell.
///
/// Handles are handed to the controller once at construction time; there is
/// no name-based element lookup at runtime.
pub trait WindowSurface {
    /// Resizes the window.
    fn set_size(&mut self, width: f32, height: f32) -> Result<(), SurfaceError>;
    /// Moves the window's top-left corner in screen coordinates.
    fn set_position(&mut self, x: f32, y: f32) -> Result<(), SurfaceError>;
    /// Returns the window's top-left corner in screen coordinates.
    fn position(&self) -> Result<(f32, f32), SurfaceError>;
    /// Shows or hides the radial menu visuals.
    fn set_menu_visible(&mut self, visible: bool) -> Result<(), SurfaceError>;
}

/// Presentation state of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    /// Small grab dot, menu hidden.
    Collapsed,
    /// Large footprint, radial menu visible.
    Expanded,
}

/// Footprints of the two presentations. Both are squares.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuGeometry {
    /// Side length of the collapsed footprint.
    pub collapsed: f32,
    /// Side length of the expanded footprint.
    pub expanded: f32,
}

impl MenuGeometry {
    /// Top-left shift applied on expand so the visual center stays fixed.
    #[must_use]
    pub fn center_offset(&self) -> f32 {
        (self.expanded - self.collapsed) / 2.0
    }
}

impl Default for MenuGeometry {
    fn default() -> Self {
        Self {
            collapsed: crate::app_settings::COLLAPSED_SIZE,
            expanded: crate::app_settings::EXPANDED_SIZE,
        }
    }
}

/// Two-state controller for the overlay menu.
#[derive(Debug)]
pub struct MenuController {
    state: MenuState,
    geometry: MenuGeometry,
    auto_collapse_timeout: Duration,
    auto_collapse: SingleShotTimer,
}

impl MenuController {
    /// Creates a controller in the collapsed state.
    #[must_use]
    pub fn new(geometry: MenuGeometry, auto_collapse_timeout: Duration) -> Self {
        Self {
            state: MenuState::Collapsed,
            geometry,
            auto_collapse_timeout,
            auto_collapse: SingleShotTimer::new(),
        }
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> MenuState {
        self.state
    }

    /// Returns `true` while the menu is expanded.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.state == MenuState::Expanded
    }

    /// Returns `true` while the auto-collapse timeout is pending.
    #[must_use]
    pub fn auto_collapse_armed(&self) -> bool {
        self.auto_collapse.is_armed()
    }

    /// Expands the menu. Only valid from the collapsed state; calling while
    /// already expanded is a no-op.
    ///
    /// On a surface failure the collapsed presentation is restored and the
    /// state stays collapsed.
    pub fn expand(&mut self, surface: &mut dyn WindowSurface, now: Instant) {
        if self.state == MenuState::Expanded {
            return;
        }

        match self.apply_expanded(surface) {
            Ok(()) => {
                self.state = MenuState::Expanded;
                self.auto_collapse.arm(now, self.auto_collapse_timeout);
            }
            Err(e) => {
                tracing::warn!("expand failed, rolling back: {}", e);
                if let Err(rollback) = self.apply_collapsed(surface) {
                    tracing::warn!("expand rollback incomplete: {}", rollback);
                }
                self.state = MenuState::Collapsed;
            }
        }
    }

    /// Collapses the menu. Idempotent: callers may collapse speculatively.
    ///
    /// On a surface failure the state is forced to collapsed anyway, keeping
    /// the flag on the safe side of the invariant.
    pub fn collapse(&mut self, surface: &mut dyn WindowSurface) {
        if self.state == MenuState::Collapsed {
            return;
        }

        self.auto_collapse.cancel();
        self.state = MenuState::Collapsed;

        if let Err(e) = self.apply_collapsed(surface) {
            tracing::warn!("collapse failed, state forced to collapsed: {}", e);
        }
    }

    /// Expands when collapsed, collapses when expanded.
    pub fn toggle(&mut self, surface: &mut dyn WindowSurface, now: Instant) {
        match self.state {
            MenuState::Collapsed => self.expand(surface, now),
            MenuState::Expanded => self.collapse(surface),
        }
    }

    /// Drives the auto-collapse timeout. Called from the shell tick.
    pub fn tick(&mut self, surface: &mut dyn WindowSurface, now: Instant) {
        if self.auto_collapse.fire(now) {
            tracing::debug!("auto-collapse timeout elapsed");
            self.collapse(surface);
        }
    }

    fn apply_expanded(&self, surface: &mut dyn WindowSurface) -> Result<(), SurfaceError> {
        let (x, y) = surface.position()?;
        let offset = self.geometry.center_offset();

        surface.set_size(self.geometry.expanded, self.geometry.expanded)?;
        surface.set_position(x - offset, y - offset)?;
        surface.set_menu_visible(true)?;
        Ok(())
    }

    fn apply_collapsed(&self, surface: &mut dyn WindowSurface) -> Result<(), SurfaceError> {
        let (x, y) = surface.position()?;
        let offset = self.geometry.center_offset();

        surface.set_menu_visible(false)?;
        surface.set_size(self.geometry.collapsed, self.geometry.collapsed)?;
        surface.set_position(x + offset, y + offset)?;
        Ok(())
    }
}

// ============================================================================
// Test Support
// ============================================================================

/// Recording window surface used across the crate's tests.
#[cfg(test)]
pub(crate) mod fakes {
    use super::{SurfaceError, WindowSurface};

    /// In-memory surface that records geometry and visibility, with switches
    /// to make individual operations fail.
    #[derive(Debug, Clone)]
    pub(crate) struct FakeSurface {
        pub size: (f32, f32),
        pub position: (f32, f32),
        pub menu_visible: bool,
        pub fail_resize: bool,
        pub fail_reposition: bool,
    }

    impl FakeSurface {
        pub(crate) fn at(x: f32, y: f32, side: f32) -> Self {
            Self {
                size: (side, side),
                position: (x, y),
                menu_visible: false,
                fail_resize: false,
                fail_reposition: false,
            }
        }
    }

    impl WindowSurface for FakeSurface {
        fn set_size(&mut self, width: f32, height: f32) -> Result<(), SurfaceError> {
            if self.fail_resize {
                return Err(SurfaceError::Resize("fake refused".into()));
            }
            self.size = (width, height);
            Ok(())
        }

        fn set_position(&mut self, x: f32, y: f32) -> Result<(), SurfaceError> {
            if self.fail_reposition {
                return Err(SurfaceError::Reposition("fake refused".into()));
            }
            self.position = (x, y);
            Ok(())
        }

        fn position(&self) -> Result<(f32, f32), SurfaceError> {
            Ok(self.position)
        }

        fn set_menu_visible(&mut self, visible: bool) -> Result<(), SurfaceError> {
            self.menu_visible = visible;
            Ok(())
        }
    }
}
