//! Small crate-wide convenience macros.
//!
//! The console macros wrap `web_sys::console` so call sites read like
//! `println!`.  Outside the browser (native unit tests) the same lines go to
//! stderr, which keeps the reducers callable without a JS host.

#[doc(hidden)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Log,
    Warn,
    Error,
}

impl Level {
    #[allow(dead_code)]
    fn as_str(self) -> &'static str {
        match self {
            Level::Log => "log",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }
}

#[doc(hidden)]
pub fn log_line(level: Level, line: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        let value = wasm_bindgen::JsValue::from_str(line);
        match level {
            Level::Log => web_sys::console::log_1(&value),
            Level::Warn => web_sys::console::warn_1(&value),
            Level::Error => web_sys::console::error_1(&value),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        eprintln!("[{}] {}", level.as_str(), line);
    }
}

/// `console.log` with `format!` arguments.
///
/// ```rust,ignore
/// console_log!("Created node {} at ({}, {})", id, x, y);
/// ```
#[macro_export]
macro_rules! console_log {
    ($($arg:tt)*) => {
        $crate::macros::log_line($crate::macros::Level::Log, &format!($($arg)*))
    };
}

/// `console.warn` with `format!` arguments.
#[macro_export]
macro_rules! console_warn {
    ($($arg:tt)*) => {
        $crate::macros::log_line($crate::macros::Level::Warn, &format!($($arg)*))
    };
}

/// `console.error` with `format!` arguments.
#[macro_export]
macro_rules! console_error {
    ($($arg:tt)*) => {
        $crate::macros::log_line($crate::macros::Level::Error, &format!($($arg)*))
    };
}
