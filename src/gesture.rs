// SPDX-License-Identifier: GPL-3.0-only

//! Tap vs drag disambiguation for the widget's grab handle.
//!
//! No pointer is perfectly stationary, so a raw down/up pair cannot be
//! trusted as a tap: the tracker only promotes a gesture to a drag once the
//! pointer has moved past a per-axis threshold from where it went down.
//! Below the threshold the gesture stays a candidate tap; past it the widget
//! follows the pointer and the eventual release is not a tap.
//!
//! Touch input jitters more than a mouse, so the two pointer kinds carry
//! separate thresholds (10 px vs 5 px by default).
//!
//! The tracker owns only the gesture classification. Pointer capture and the
//! actual window move are the shell's job; drags are reported to the caller
//! as per-event deltas.

/// A position in window-local coordinates, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Creates a point from x/y coordinates.
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// The kind of pointing device driving a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// Per-device movement thresholds, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragThresholds {
    /// Threshold for mouse gestures.
    pub mouse: f32,
    /// Threshold for touch gestures.
    pub touch: f32,
}

impl DragThresholds {
    fn for_kind(&self, kind: PointerKind) -> f32 {
        match kind {
            PointerKind::Mouse => self.mouse,
            PointerKind::Touch => self.touch,
        }
    }
}

impl Default for DragThresholds {
    fn default() -> Self {
        Self {
            mouse: crate::app_settings::MOUSE_DRAG_THRESHOLD,
            touch: crate::app_settings::TOUCH_DRAG_THRESHOLD,
        }
    }
}

/// How a gesture ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerRelease {
    /// The pointer never left the threshold box: a tap.
    Tap,
    /// The pointer dragged the widget; no tap is reported.
    DragEnd,
}

/// Ephemeral per-gesture record, created on down and discarded on up.
#[derive(Debug, Clone, Copy)]
struct PointerSession {
    kind: PointerKind,
    last: Point,
    dragging: bool,
}

/// Classifies pointer down/move/up sequences into taps and drags.
///
/// One gesture is tracked at a time; pointer and touch input are mutually
/// exclusive while a capture is active, so a new down simply replaces any
/// stale session.
#[derive(Debug, Default)]
pub struct GestureTracker {
    thresholds: DragThresholds,
    session: Option<PointerSession>,
}

impl GestureTracker {
    /// Creates a tracker with the given thresholds.
    #[must_use]
    pub fn new(thresholds: DragThresholds) -> Self {
        Self {
            thresholds,
            session: None,
        }
    }

    /// Begins a gesture at `position`.
    pub fn pointer_down(&mut self, kind: PointerKind, position: Point) {
        self.session = Some(PointerSession {
            kind,
            last: position,
            dragging: false,
        });
    }

    /// Feeds a pointer move.
    ///
    /// Returns `Some((dx, dy))` once the gesture is a drag: the delta since
    /// the last reported position, which the caller applies to the window's
    /// top-left. Returns `None` while the gesture is still a candidate tap
    /// or when no gesture is active.
    pub fn pointer_move(&mut self, position: Point) -> Option<(f32, f32)> {
        let session = self.session.as_mut()?;

        let dx = position.x - session.last.x;
        let dy = position.y - session.last.y;

        if !session.dragging {
            let threshold = self.thresholds.for_kind(session.kind);
            if dx.abs() > threshold || dy.abs() > threshold {
                session.dragging = true;
            } else {
                return None;
            }
        }

        session.last = position;
        Some((dx, dy))
    }

    /// Ends the gesture.
    ///
    /// Returns how the gesture ended, or `None` when no gesture was active
    /// (a stray up event). The session is discarded either way.
    pub fn pointer_up(&mut self) -> Option<PointerRelease> {
        let session = self.session.take()?;
        if session.dragging {
            Some(PointerRelease::DragEnd)
        } else {
            Some(PointerRelease::Tap)
        }
    }

    /// Returns `true` while the active gesture is a drag.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some_and(|s| s.dragging)
    }
}
