//! Shell and device helper utilities.

/// Escape a string for safe shell use.
///
/// Wraps the string in single quotes and escapes embedded single quotes
/// using the `'\''` technique (end quote, escaped quote, start quote).
pub fn shell_escape(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

/// Find the terminal device this process is attached to.
///
/// Checks stdin, stdout and stderr in that order and returns the first one
/// that is a terminal, e.g. `/dev/pts/3`.
#[cfg(unix)]
pub fn controlling_device() -> Option<String> {
    use std::ffi::CStr;

    for fd in [libc::STDIN_FILENO, libc::STDOUT_FILENO, libc::STDERR_FILENO] {
        // SAFETY: ttyname returns either null or a pointer to a static,
        // NUL-terminated buffer which we copy out before the next call.
        let name = unsafe { libc::ttyname(fd) };
        if name.is_null() {
            continue;
        }
        let name = unsafe { CStr::from_ptr(name) };
        if let Ok(name) = name.to_str() {
            return Some(name.to_string());
        }
    }
    None
}

#[cfg(not(unix))]
pub fn controlling_device() -> Option<String> {
    None
}

/// Whether `output` looks like a device path rather than an error message
pub fn is_device_path(output: &str) -> bool {
    output.starts_with('/') && !output.contains(char::is_whitespace)
}
