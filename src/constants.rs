// src/constants.rs
//
// Application-wide constants.

/// Server used when neither the command line nor the config file names one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Collection endpoint, relative to the base URL. Single notes live at `{NOTES_PATH}/{id}`.
pub const NOTES_PATH: &str = "/api/notes";

/// Directory under the platform config dir holding `CONFIG_FILE_NAME`.
pub const CONFIG_DIR_NAME: &str = "noteview";

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Delay in milliseconds after launching the browser before the snapshot's
/// temporary directory may be dropped.
///
/// The opener returns immediately; without this delay the browser may find
/// the file already gone.
///
/// Used in: `infrastructure/renderer.rs`
pub const BROWSER_LAUNCH_DELAY_MS: u64 = 500;
