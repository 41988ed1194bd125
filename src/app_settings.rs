// SPDX-License-Identifier: GPL-3.0-only

//! Centralized application settings and constants.

/// Application ID in RDNN (reverse domain name notation) format.
pub const APP_ID: &str = "io.github.touchfuture.TouchFuture";

/// Side length of the collapsed widget footprint in pixels.
pub const COLLAPSED_SIZE: f32 = 80.0;

/// Side length of the expanded radial-menu footprint in pixels.
pub const EXPANDED_SIZE: f32 = 220.0;

/// Idle timeout before an expanded menu collapses on its own, in milliseconds.
pub const AUTO_COLLAPSE_TIMEOUT_MS: u64 = 5000;

/// How long the assistant chord is held before release, in milliseconds.
pub const HOLD_DURATION_MS: u64 = 2000;

/// Delay between the legs of the paced assistant chord, in milliseconds.
pub const CHORD_STEP_DELAY_MS: u64 = 50;

/// Movement threshold that turns a mouse press into a drag, in pixels.
pub const MOUSE_DRAG_THRESHOLD: f32 = 5.0;

/// Movement threshold that turns a touch press into a drag, in pixels.
pub const TOUCH_DRAG_THRESHOLD: f32 = 10.0;

/// File name of the optional user configuration, looked up next to the binary.
pub const CONFIG_FILE_NAME: &str = "touchfuture.json";

/// Interval of the shell tick that drives the deadline timers, in milliseconds.
pub const TICK_INTERVAL_MS: u64 = 50;
