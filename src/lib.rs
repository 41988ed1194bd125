// SPDX-License-Identifier: GPL-3.0-only

//! TouchFuture - a floating assistant overlay for Windows
//!
//! TouchFuture is a small always-on-top widget: a grab dot that can be
//! dragged anywhere on screen and expands into a radial menu when tapped.
//! Each menu button triggers a Windows accessibility shortcut (voice typing,
//! live captions, the assistant) by injecting synthetic key events.
//!
//! # Architecture
//!
//! The core is platform-neutral and event-driven. The shell feeds it pointer
//! events, button activations, and a periodic tick; the core acts on the
//! window through the `WindowSurface` trait and injects keys through the
//! `KeySink` trait. The Win32 shell provides both for real; tests provide
//! recording fakes.
//!
//! # Modules
//!
//! - `app`: the widget facade wiring gestures, menu, and shortcuts together
//! - `app_settings`: centralized application constants
//! - `config`: user configuration with JSON overrides
//! - `gesture`: tap vs drag disambiguation
//! - `input`: virtual-key codes and chord-aware key injection
//! - `menu`: the collapse/expand state machine
//! - `platform`: the Win32 backend (`SendInput` sink and the overlay shell)
//! - `shortcuts`: the shortcut actions behind the menu buttons
//! - `timer`: single-shot deadline timers driven by the shell tick

pub mod app;
pub mod app_settings;
pub mod config;
pub mod gesture;
pub mod input;
pub mod menu;
pub mod platform;
pub mod shortcuts;
pub mod timer;

pub use crate::app::Widget;
pub use crate::config::Config;

// ============================================================================
// Integration Tests
// ============================================================================
