// src/log.rs
//
// Short logging macros over the `log` facade. The library only emits records;
// the CLI decides where they go (see `init`).

/// Verbosity picked on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Verbosity {
    pub fn level(self) -> ::log::LevelFilter {
        match self {
            Verbosity::Quiet => ::log::LevelFilter::Warn,
            Verbosity::Normal => ::log::LevelFilter::Info,
            Verbosity::Verbose => ::log::LevelFilter::Debug,
        }
    }
}

/// Install the colored stderr logger. Safe to call once per process.
#[cfg(feature = "cli")]
pub fn init(verbosity: Verbosity) {
    let mut clog = colog::default_builder();
    clog.filter(None, verbosity.level());
    // Already initialized (e.g. tests calling twice) is not an error for us
    let _ = clog.try_init();
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        ::log::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        ::log::debug!($($arg)*)
    };
}

/// Warn-level logging
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => {
        ::log::warn!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        ::log::error!($($arg)*)
    };
}
