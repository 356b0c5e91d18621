//! Desktop session detection

use std::env;

/// Kind of graphical session the process is running under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Session {
    X11,
    Wayland,
    /// macOS; the pasteboard needs no display server
    MacOs,
    /// No display server reachable (SSH, console, CI)
    Headless,
}

impl Session {
    /// Detect the session from the current platform and environment
    pub fn detect() -> Self {
        Self::from_env(
            env::consts::OS,
            env::var("WAYLAND_DISPLAY").ok().as_deref(),
            env::var("DISPLAY").ok().as_deref(),
        )
    }

    /// Classify a session from the OS name and WAYLAND_DISPLAY/DISPLAY values
    ///
    /// Wayland wins over X11 when both are set since XWayland also exports
    /// DISPLAY.
    pub fn from_env(os: &str, wayland_display: Option<&str>, display: Option<&str>) -> Self {
        let set = |v: Option<&str>| v.map_or(false, |s| !s.trim().is_empty());

        if os == "macos" {
            Session::MacOs
        } else if set(wayland_display) {
            Session::Wayland
        } else if set(display) {
            Session::X11
        } else {
            Session::Headless
        }
    }

    /// Whether a native clipboard connection can be attempted
    pub fn has_display(self) -> bool {
        self != Session::Headless
    }
}
