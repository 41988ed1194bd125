// SPDX-License-Identifier: GPL-3.0-only

//! Synthetic key event emission.
//!
//! This module provides the seam between the widget logic and the platform's
//! keyboard-injection primitive. The platform side implements [`KeySink`]
//! (on Windows via `SendInput`, see `platform::win32`); the widget side goes
//! through [`KeyInjector`], which knows the ordering conventions the OS
//! expects from chords:
//!
//! - a full chord is pressed in listed order and released in reverse order,
//!   mirroring how a human releases modifier-and-letter combinations;
//! - a held chord is released in the order the caller lists, because the
//!   assistant shortcut wants the letter up before the modifier.
//!
//! Injection is fire-and-forget. A sink must not surface failures to the
//! caller; the Win32 sink logs and swallows them.

use crate::input::VirtualKey;

/// Key event state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    /// Key was pressed down.
    Pressed,
    /// Key was released.
    Released,
}

/// A key event to be emitted through the platform sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The virtual-key code.
    pub key: VirtualKey,
    /// Whether the key was pressed or released.
    pub state: KeyState,
}

impl KeyEvent {
    /// Creates a new key press event.
    #[must_use]
    pub fn press(key: VirtualKey) -> Self {
        Self {
            key,
            state: KeyState::Pressed,
        }
    }

    /// Creates a new key release event.
    #[must_use]
    pub fn release(key: VirtualKey) -> Self {
        Self {
            key,
            state: KeyState::Released,
        }
    }
}

/// Capability for delivering synthetic key events to the OS.
///
/// Implementations must be infallible from the caller's point of view:
/// a failed OS call is logged by the sink, never propagated.
pub trait KeySink {
    /// Delivers one key event.
    fn send(&mut self, event: KeyEvent);
}

/// Recording sink: events are appended in emission order.
///
/// Used by the tests to assert exact key sequences.
impl KeySink for Vec<KeyEvent> {
    fn send(&mut self, event: KeyEvent) {
        self.push(event);
    }
}

/// High-level key injection over a [`KeySink`].
#[derive(Debug)]
pub struct KeyInjector<S: KeySink> {
    sink: S,
}

impl<S: KeySink> KeyInjector<S> {
    /// Creates an injector over the given sink.
    #[must_use]
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Sends key-down then key-up for a single key.
    pub fn tap(&mut self, key: VirtualKey) {
        self.send(KeyEvent::press(key));
        self.send(KeyEvent::release(key));
    }

    /// Presses a chord and releases it again.
    ///
    /// Key-down events are sent in the listed order, key-up events in
    /// reverse order, so the last-pressed key is released first.
    pub fn tap_chord(&mut self, keys: &[VirtualKey]) {
        for &key in keys {
            self.send(KeyEvent::press(key));
        }
        for &key in keys.iter().rev() {
            self.send(KeyEvent::release(key));
        }
    }

    /// Sends key-down for each key in order and leaves them held.
    ///
    /// The caller owns the release: every key pressed this way must
    /// eventually be passed to [`KeyInjector::release`].
    pub fn press(&mut self, keys: &[VirtualKey]) {
        for &key in keys {
            self.send(KeyEvent::press(key));
        }
    }

    /// Sends key-up for each key in the order given.
    ///
    /// The order is the caller's choice; the assistant chord lists the
    /// letter before the modifier.
    pub fn release(&mut self, keys: &[VirtualKey]) {
        for &key in keys {
            self.send(KeyEvent::release(key));
        }
    }

    /// Sends a single prepared event.
    pub fn emit(&mut self, event: KeyEvent) {
        self.send(event);
    }

    /// Returns a reference to the underlying sink.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn send(&mut self, event: KeyEvent) {
        tracing::debug!("inject {:?} {}", event.state, event.key);
        self.sink.send(event);
    }
}
