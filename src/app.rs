// SPDX-License-Identifier: GPL-3.0-only

//! The widget facade.
//!
//! [`Widget`] ties the pieces together: pointer events flow through the
//! gesture tracker, taps toggle the menu controller, menu buttons run
//! shortcut actions, and the shell's periodic tick drives every deadline
//! timer. This is also the failure boundary: nothing below it propagates an
//! error past these methods. Surface failures are logged and swallowed and
//! the menu is forced toward the collapsed state, so a misbehaving window
//! never takes the event loop down with it.
//!
//! The shell owns the platform half: pointer capture, painting, and the
//! implementations of [`WindowSurface`] and [`KeySink`] handed in at
//! construction time.

use std::time::Instant;

use crate::config::Config;
use crate::gesture::{GestureTracker, Point, PointerKind, PointerRelease};
use crate::input::KeySink;
use crate::menu::{MenuController, MenuState, WindowSurface};
use crate::shortcuts::{ShortcutAction, ShortcutEngine};

/// The overlay widget: gesture handling, menu state, shortcut dispatch.
#[derive(Debug)]
pub struct Widget<W: WindowSurface, S: KeySink> {
    surface: W,
    gestures: GestureTracker,
    menu: MenuController,
    shortcuts: ShortcutEngine<S>,
}

impl<W: WindowSurface, S: KeySink> Widget<W, S> {
    /// Creates the widget over a window surface and a key sink.
    #[must_use]
    pub fn new(surface: W, sink: S, config: &Config) -> Self {
        Self {
            surface,
            gestures: GestureTracker::new(config.drag_thresholds()),
            menu: MenuController::new(config.menu_geometry(), config.auto_collapse_timeout()),
            shortcuts: ShortcutEngine::new(sink, config.hold_duration(), config.chord_step_delay()),
        }
    }

    /// Handles a pointer going down on the grab handle.
    ///
    /// The shell captures the pointer before calling this, so the matching
    /// move/up events arrive here even when the pointer leaves the window.
    pub fn pointer_down(&mut self, kind: PointerKind, position: Point) {
        self.gestures.pointer_down(kind, position);
    }

    /// Handles a pointer move. While the gesture is a drag, the window
    /// follows the pointer.
    pub fn pointer_move(&mut self, position: Point) {
        let Some((dx, dy)) = self.gestures.pointer_move(position) else {
            return;
        };

        match self.surface.position() {
            Ok((x, y)) => {
                if let Err(e) = self.surface.set_position(x + dx, y + dy) {
                    tracing::warn!("drag move failed: {}", e);
                }
            }
            Err(e) => tracing::warn!("drag move failed: {}", e),
        }
    }

    /// Handles the pointer going up. A tap toggles the menu; the end of a
    /// drag does nothing further.
    pub fn pointer_up(&mut self, now: Instant) {
        if self.gestures.pointer_up() == Some(PointerRelease::Tap) {
            self.menu.toggle(&mut self.surface, now);
        }
    }

    /// Runs a menu button's shortcut action.
    ///
    /// The menu always collapses first, then the shortcut fires, so the
    /// injected keys land in whatever window held focus before the tap.
    pub fn activate(&mut self, action: ShortcutAction, now: Instant) {
        self.menu.collapse(&mut self.surface);
        self.shortcuts.dispatch(action, now);
    }

    /// Handles the close button on the expanded menu.
    pub fn close_menu(&mut self) {
        self.menu.collapse(&mut self.surface);
    }

    /// Drives the timers: auto-collapse, hold release, paced chord legs.
    pub fn tick(&mut self, now: Instant) {
        self.menu.tick(&mut self.surface, now);
        self.shortcuts.tick(now);
    }

    /// Returns the menu state.
    #[must_use]
    pub fn menu_state(&self) -> MenuState {
        self.menu.state()
    }

    /// Returns `true` while a drag gesture is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.gestures.is_dragging()
    }

    /// Returns a reference to the window surface.
    #[must_use]
    pub fn surface(&self) -> &W {
        &self.surface
    }

    /// Returns a reference to the key sink.
    #[must_use]
    pub fn sink(&self) -> &S {
        self.shortcuts.sink()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{KeyEvent, KeyState, VirtualKey};
    use crate::menu::fakes::FakeSurface;

    fn widget() -> Widget<FakeSurface, Vec<KeyEvent>> {
        Widget::new(
            FakeSurface::at(100.0, 100.0, 80.0),
            Vec::new(),
            &Config::default(),
        )
    }

    /// Test that a sub-threshold gesture is a tap and never moves the window
    #[test]
    fn test_tap_toggles_without_moving() {
        let mut w = widget();
        let now = Instant::now();

        w.pointer_down(PointerKind::Mouse, Point::new(40.0, 40.0));
        w.pointer_move(Point::new(43.0, 38.0));
        w.pointer_up(now);

        assert_eq!(w.menu_state(), MenuState::Expanded);
        // Expansion re-centers, so compare against the expanded placement
        assert_eq!(w.surface().position, (30.0, 30.0));

        w.pointer_down(PointerKind::Mouse, Point::new(40.0, 40.0));
        w.pointer_up(now);
        assert_eq!(w.menu_state(), MenuState::Collapsed);
        assert_eq!(w.surface().position, (100.0, 100.0));
    }

    /// Test that a drag moves the window by the cumulative delta, no toggle
    #[test]
    fn test_drag_moves_window_and_keeps_menu_state() {
        let mut w = widget();

        w.pointer_down(PointerKind::Mouse, Point::new(40.0, 40.0));
        w.pointer_move(Point::new(50.0, 40.0));
        w.pointer_move(Point::new(55.0, 48.0));
        w.pointer_up(Instant::now());

        assert_eq!(w.menu_state(), MenuState::Collapsed);
        assert_eq!(w.surface().position, (115.0, 108.0));
    }

    /// Test that a touch drag honors the wider threshold before moving
    #[test]
    fn test_touch_drag_threshold() {
        let mut w = widget();

        w.pointer_down(PointerKind::Touch, Point::new(40.0, 40.0));
        w.pointer_move(Point::new(48.0, 40.0));
        assert_eq!(w.surface().position, (100.0, 100.0));

        w.pointer_move(Point::new(52.0, 40.0));
        assert_eq!(w.surface().position, (112.0, 100.0));
    }

    /// Test that a shortcut collapses the menu before injecting keys
    #[test]
    fn test_activate_collapses_first() {
        let mut w = widget();
        let now = Instant::now();

        w.pointer_down(PointerKind::Mouse, Point::new(40.0, 40.0));
        w.pointer_up(now);
        assert_eq!(w.menu_state(), MenuState::Expanded);

        w.activate(ShortcutAction::VoiceInput, now);

        assert_eq!(w.menu_state(), MenuState::Collapsed);
        assert_eq!(w.surface().position, (100.0, 100.0));
        assert_eq!(
            w.sink().as_slice(),
            &[
                KeyEvent::press(VirtualKey::LEFT_META),
                KeyEvent::press(VirtualKey::H),
                KeyEvent::release(VirtualKey::H),
                KeyEvent::release(VirtualKey::LEFT_META),
            ]
        );
    }

    /// Test the close button collapses without firing any shortcut
    #[test]
    fn test_close_menu_injects_nothing() {
        let mut w = widget();
        let now = Instant::now();

        w.pointer_down(PointerKind::Mouse, Point::new(40.0, 40.0));
        w.pointer_up(now);
        w.close_menu();

        assert_eq!(w.menu_state(), MenuState::Collapsed);
        assert!(w.sink().is_empty());
    }

    /// Test that the tick drives both the auto-collapse and the hold release
    #[test]
    fn test_tick_drives_timers() {
        let mut w = widget();
        let start = Instant::now();

        w.pointer_down(PointerKind::Mouse, Point::new(40.0, 40.0));
        w.pointer_up(start);
        w.activate(ShortcutAction::AssistantHold, start);

        // Hold released two seconds in
        w.tick(start + std::time::Duration::from_secs(2));
        let ups = w
            .sink()
            .iter()
            .filter(|e| e.state == KeyState::Released)
            .count();
        assert_eq!(ups, 2);
        assert_eq!(w.menu_state(), MenuState::Collapsed);
    }
}
