// SPDX-License-Identifier: GPL-3.0-only

//! Input synthesis for the shortcut actions.
//!
//! This module covers the key-injection side of the widget:
//!
//! - **Keycodes**: the Win32 virtual-key vocabulary ([`VirtualKey`])
//! - **Injection**: chord-aware event emission over a platform sink
//!   ([`KeyInjector`], [`KeySink`])
//!
//! The platform primitive itself lives behind the [`KeySink`] trait so the
//! widget logic can be exercised against a recording sink in tests. The real
//! Windows implementation is `platform::win32::SendInputSink`.

pub mod injector;
pub mod keycode;

pub use injector::{KeyEvent, KeyInjector, KeySink, KeyState};
pub use keycode::VirtualKey;
