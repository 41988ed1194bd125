// SPDX-License-Identifier: GPL-3.0-only

//! Shortcut actions behind the radial menu buttons.
//!
//! Every button maps to one system shortcut, delivered as synthetic key
//! events in one of three shapes:
//!
//! - **Simple chord**: press the keys, release them in reverse. Voice input
//!   (Meta+H) and live captions (Meta+Ctrl+L) work this way.
//! - **Long-press chord**: press Meta+C and keep it held for two seconds
//!   before releasing, which the assistant treats differently from a quick
//!   tap of the same chord. The release runs letter-first.
//! - **Paced chord**: Meta+C as discrete legs with a short delay between
//!   them, which some shells recognize more reliably than a burst of
//!   back-to-back events. The legs are scheduled on the tick timer instead
//!   of blocking the UI thread.
//!
//! At most one chord is ever held; starting the long press again while it
//! is still active is ignored so no duplicate key-downs reach the OS.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::input::{KeyEvent, KeyInjector, KeySink, VirtualKey};
use crate::timer::SingleShotTimer;

/// The shortcut behind a menu button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    /// Voice typing, Meta+H.
    VoiceInput,
    /// Live captions, Meta+Ctrl+L.
    LiveCaptions,
    /// Assistant via a two-second hold of Meta+C.
    AssistantHold,
    /// Assistant via a paced tap of Meta+C.
    AssistantTap,
}

/// A menu button's binding, for the UI layer.
#[derive(Debug, Clone, Copy)]
pub struct ShortcutBinding {
    pub action: ShortcutAction,
    pub label: &'static str,
    pub keys: &'static [VirtualKey],
}

/// The fixed shortcut table.
pub const BINDINGS: &[ShortcutBinding] = &[
    ShortcutBinding {
        action: ShortcutAction::VoiceInput,
        label: "Voice input",
        keys: &[VirtualKey::LEFT_META, VirtualKey::H],
    },
    ShortcutBinding {
        action: ShortcutAction::LiveCaptions,
        label: "Live captions",
        keys: &[VirtualKey::LEFT_META, VirtualKey::CONTROL, VirtualKey::L],
    },
    ShortcutBinding {
        action: ShortcutAction::AssistantHold,
        label: "Assistant",
        keys: &[VirtualKey::LEFT_META, VirtualKey::C],
    },
    ShortcutBinding {
        action: ShortcutAction::AssistantTap,
        label: "Assistant (tap)",
        keys: &[VirtualKey::LEFT_META, VirtualKey::C],
    },
];

/// A chord currently held down on the OS side.
#[derive(Debug, Clone)]
struct HeldChord {
    /// Keys in the order they were pressed.
    keys: Vec<VirtualKey>,
}

/// Executes shortcut actions over a key sink.
///
/// Timed behavior (the hold release and the paced legs) runs off deadline
/// timers driven by [`ShortcutEngine::tick`].
#[derive(Debug)]
pub struct ShortcutEngine<S: KeySink> {
    injector: KeyInjector<S>,
    held: Option<HeldChord>,
    hold_duration: Duration,
    hold_timer: SingleShotTimer,
    step_delay: Duration,
    pending_steps: VecDeque<Vec<KeyEvent>>,
    step_timer: SingleShotTimer,
}

impl<S: KeySink> ShortcutEngine<S> {
    /// Creates an engine over the given sink.
    #[must_use]
    pub fn new(sink: S, hold_duration: Duration, step_delay: Duration) -> Self {
        Self {
            injector: KeyInjector::new(sink),
            held: None,
            hold_duration,
            hold_timer: SingleShotTimer::new(),
            step_delay,
            pending_steps: VecDeque::new(),
            step_timer: SingleShotTimer::new(),
        }
    }

    /// Runs one shortcut action.
    pub fn dispatch(&mut self, action: ShortcutAction, now: Instant) {
        tracing::debug!("shortcut action {:?}", action);
        match action {
            ShortcutAction::VoiceInput => {
                self.injector.tap_chord(&[VirtualKey::LEFT_META, VirtualKey::H]);
            }
            ShortcutAction::LiveCaptions => {
                self.injector
                    .tap_chord(&[VirtualKey::LEFT_META, VirtualKey::CONTROL, VirtualKey::L]);
            }
            ShortcutAction::AssistantHold => self.start_hold(now),
            ShortcutAction::AssistantTap => self.start_paced(now),
        }
    }

    /// Returns `true` while a chord is held down.
    #[must_use]
    pub fn is_holding(&self) -> bool {
        self.held.is_some()
    }

    /// Returns `true` while paced chord legs are still queued.
    #[must_use]
    pub fn has_pending_steps(&self) -> bool {
        !self.pending_steps.is_empty()
    }

    /// Releases the held chord, letter before modifier.
    ///
    /// No-op when nothing is held, so a second call cannot emit duplicate
    /// key-up events. Also disarms the hold timer, making an early release
    /// (such as the error path of a failed hold start) safe.
    pub fn release_held(&mut self) {
        self.hold_timer.cancel();

        let Some(chord) = self.held.take() else {
            return;
        };

        let release_order: Vec<VirtualKey> = chord.keys.iter().rev().copied().collect();
        self.injector.release(&release_order);
        tracing::debug!("held chord released");
    }

    /// Drives the hold release and the paced legs. Called from the shell tick.
    pub fn tick(&mut self, now: Instant) {
        if self.hold_timer.fire(now) {
            self.release_held();
        }

        if self.step_timer.fire(now) {
            if let Some(leg) = self.pending_steps.pop_front() {
                for event in leg {
                    self.injector.emit(event);
                }
            }
            if !self.pending_steps.is_empty() {
                self.step_timer.arm(now, self.step_delay);
            }
        }
    }

    /// Returns a reference to the underlying sink.
    #[must_use]
    pub fn sink(&self) -> &S {
        self.injector.sink()
    }

    fn start_hold(&mut self, now: Instant) {
        if self.held.is_some() {
            // One chord at a time; a duplicate down would stick keys
            tracing::debug!("assistant hold already active, ignoring");
            return;
        }

        let keys = vec![VirtualKey::LEFT_META, VirtualKey::C];
        self.injector.press(&keys);
        self.held = Some(HeldChord { keys });
        self.hold_timer.arm(now, self.hold_duration);
    }

    fn start_paced(&mut self, now: Instant) {
        if !self.pending_steps.is_empty() {
            tracing::debug!("paced chord still in flight, ignoring");
            return;
        }

        // First leg goes out immediately, the rest follow one step apart.
        // The two key-ups travel together, as the shortcut expects.
        self.injector.emit(KeyEvent::press(VirtualKey::LEFT_META));
        self.pending_steps
            .push_back(vec![KeyEvent::press(VirtualKey::C)]);
        self.pending_steps.push_back(vec![
            KeyEvent::release(VirtualKey::C),
            KeyEvent::release(VirtualKey::LEFT_META),
        ]);
        self.step_timer.arm(now, self.step_delay);
    }
}
