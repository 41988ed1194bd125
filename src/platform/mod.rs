// SPDX-License-Identifier: GPL-3.0-only

//! Platform backends.
//!
//! The widget core is platform-neutral behind the `WindowSurface` and
//! `KeySink` traits; this module holds the real implementations. Only a
//! Win32 backend exists, since the shortcuts the widget injects are Windows
//! shell shortcuts.

#[cfg(windows)]
pub mod win32;
