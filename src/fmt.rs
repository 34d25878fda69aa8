//! Feature-gated logging.
//!
//! `esp32-log` prints through `esp-println`, `log` goes through the `log`
//! facade. With neither feature the arguments are still type-checked but
//! nothing is emitted.

macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "log")]
        ::log::debug!($($arg)*);
        #[cfg(feature = "esp32-log")]
        ::esp_println::println!($($arg)*);
        #[cfg(not(any(feature = "log", feature = "esp32-log")))]
        let _ = format_args!($($arg)*);
    }};
}

macro_rules! warning {
    ($($arg:tt)*) => {{
        #[cfg(feature = "log")]
        ::log::warn!($($arg)*);
        #[cfg(feature = "esp32-log")]
        ::esp_println::println!($($arg)*);
        #[cfg(not(any(feature = "log", feature = "esp32-log")))]
        let _ = format_args!($($arg)*);
    }};
}

pub(crate) use debug;
pub(crate) use warning;
