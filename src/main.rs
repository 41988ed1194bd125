// SPDX-License-Identifier: GPL-3.0-only

//! TouchFuture Main Application
//!
//! Entry point for the TouchFuture overlay widget. Sets up logging, loads
//! the optional configuration file from next to the binary, and hands over
//! to the Win32 shell. Only initialization failures are surfaced to the
//! user; everything after startup logs and carries on.

use std::path::PathBuf;

use touchfuture::{app_settings, config::Config};

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("touchfuture=info".parse().unwrap()),
        )
        .init();

    let config = Config::load_or_default(&config_path());
    tracing::debug!(?config, "effective configuration");

    #[cfg(windows)]
    {
        if let Err(e) = touchfuture::platform::win32::run(&config) {
            tracing::error!("initialization failed: {}", e);
            touchfuture::platform::win32::show_init_error(&format!(
                "Initialization error: {e}"
            ));
            std::process::exit(1);
        }
    }

    #[cfg(not(windows))]
    {
        tracing::error!(
            "{} injects Windows shell shortcuts and only runs on Windows",
            app_settings::APP_ID
        );
        std::process::exit(1);
    }
}

/// The configuration file sits next to the binary; when the executable path
/// is unavailable the current directory is used instead.
fn config_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
        .unwrap_or_default()
        .join(app_settings::CONFIG_FILE_NAME)
}
