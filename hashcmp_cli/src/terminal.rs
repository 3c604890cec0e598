//! Terminal detection

use is_terminal::IsTerminal;
use std::env;
use std::io::{stderr, stdout};

/// Check if stdout is connected to a terminal
pub fn stdout_is_terminal() -> bool {
    stdout().is_terminal()
}

/// Check if stderr is connected to a terminal (progress goes there)
pub fn stderr_is_terminal() -> bool {
    stderr().is_terminal()
}

/// Check if the terminal can draw ANSI escape codes
pub fn supports_ansi() -> bool {
    let term = env::var("TERM").unwrap_or_default();
    if term == "dumb" {
        return false;
    }
    // Windows consoles leave TERM unset
    cfg!(windows) || !term.is_empty()
}

/// Detect if running in a CI environment
fn is_ci_environment() -> bool {
    let ci_vars = [
        "CI",
        "CONTINUOUS_INTEGRATION",
        "JENKINS_URL",
        "GITHUB_ACTIONS",
        "GITLAB_CI",
        "BUILDKITE",
        "TF_BUILD", // Azure DevOps
    ];

    ci_vars.iter().any(|var| env::var(var).is_ok())
}

/// Progress bars are drawn only on an ANSI-capable stderr outside CI
pub fn should_show_progress(progress_enabled: bool) -> bool {
    progress_enabled && stderr_is_terminal() && supports_ansi() && !is_ci_environment()
}

/// Colour is used only when stdout is a terminal and `NO_COLOR` is unset
pub fn should_use_color(color_enabled: bool) -> bool {
    color_enabled && stdout_is_terminal() && env::var_os("NO_COLOR").is_none()
}
