//! Internal logging macros
//!
//! With the `log` feature enabled the macros forward to the `log` facade,
//! with `esp32-log` they print through `esp-println`. Otherwise they compile
//! to nothing, but their arguments are still type-checked.

#[cfg(feature = "log")]
macro_rules! emit {
    ($level:ident, $($arg:tt)*) => {
        ::log::$level!($($arg)*)
    };
}

#[cfg(all(feature = "esp32-log", not(feature = "log")))]
macro_rules! emit {
    ($level:ident, $($arg:tt)*) => {
        ::esp_println::println!("[{}] {}", stringify!($level), format_args!($($arg)*))
    };
}

#[cfg(not(any(feature = "log", feature = "esp32-log")))]
macro_rules! emit {
    ($level:ident, $($arg:tt)*) => {{
        let _ = format_args!($($arg)*);
    }};
}

macro_rules! debug {
    ($($arg:tt)*) => { $crate::logging::emit!(debug, $($arg)*) };
}

macro_rules! info {
    ($($arg:tt)*) => { $crate::logging::emit!(info, $($arg)*) };
}

macro_rules! warn_ {
    ($($arg:tt)*) => { $crate::logging::emit!(warn, $($arg)*) };
}

pub(crate) use {debug, emit, info, warn_ as warn};
