#[cfg(windows)]
pub fn setup_console() {
    use windows_sys::Win32::System::Console::{
        GetConsoleMode, GetStdHandle, SetConsoleMode, SetConsoleOutputCP,
        ENABLE_VIRTUAL_TERMINAL_PROCESSING, STD_OUTPUT_HANDLE,
    };
    unsafe {
        SetConsoleOutputCP(65001);
        let handle = GetStdHandle(STD_OUTPUT_HANDLE);
        let mut mode = 0;
        if GetConsoleMode(handle, &mut mode) != 0 {
            SetConsoleMode(handle, mode | ENABLE_VIRTUAL_TERMINAL_PROCESSING);
        }
    }
}

#[cfg(not(windows))]
pub fn setup_console() {}

/// Char-boundary-safe truncation for console lines.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        s.chars().take(max_chars).collect()
    }
}

/// Like [`truncate`], but marks shortened strings with a trailing ellipsis so
/// a clipped console sample is distinguishable from a short one.
pub fn truncate_marked(s: &str, max_chars: usize) -> String {
    let mut out = truncate(s, max_chars);
    if out.len() < s.len() {
        out.push_str("...");
    }
    out
}
