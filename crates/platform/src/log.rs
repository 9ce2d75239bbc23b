//! Host logging service
//!
//! Applications emit leveled diagnostics through the host; the host decides
//! where they go (device log buffer, `tracing` on the desktop, a recording
//! vector in tests). Logging is fire-and-forget.

/// Log severity, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LogLevel {
    /// Something the app could not handle
    Error,
    /// Recovered, but worth attention
    Warning,
    /// Normal operation milestones
    Info,
    /// Developer detail
    Debug,
    /// Very chatty developer detail
    Verbose,
}

impl LogLevel {
    /// Upper-case tag used in text logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warning => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
            Self::Verbose => "VERBOSE",
        }
    }
}

impl core::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host diagnostic sink.
pub trait HostLog {
    /// Record one log line.
    fn log(&mut self, level: LogLevel, args: core::fmt::Arguments<'_>);
}

/// Log through a [`HostLog`] with `format!`-style arguments.
///
/// ```no_run
/// # use platform::{app_log, HostLog};
/// # fn f<H: HostLog>(host: &mut H, key: u32) {
/// app_log!(host, Error, "Key {} not recognized!", key);
/// # }
/// ```
#[macro_export]
macro_rules! app_log {
    ($host:expr, $level:ident, $($arg:tt)+) => {
        $crate::log::HostLog::log(
            &mut *$host,
            $crate::log::LogLevel::$level,
            ::core::format_args!($($arg)+),
        )
    };
}
