//! Nice QProp output formatting.

use log;

const QPROP_BANNER_LENGTH: usize = 103;

/// Logs an error to the `qprop-output` logger.
macro_rules! qprop_error {
    ($fmt:expr $(, $($arg:tt)*)?) => {
        log::error!($fmt, $($($arg)*)?);
        log::error!(target: "qprop-output", $fmt, $($($arg)*)?);
    }
}

/// Logs a main output line to the `qprop-output` logger.
macro_rules! qprop_output {
    ($fmt:expr $(, $($arg:tt)*)?) => { log::info!(target: "qprop-output", $fmt, $($($arg)*)?); }
}

pub(crate) use {qprop_error, qprop_output};

/// Logs a nicely formatted section title to the `qprop-output` logger.
pub(crate) fn log_title(title: &str) {
    let length = title.chars().count().max(QPROP_BANNER_LENGTH - 6);
    let bar = "─".repeat(length);
    qprop_output!("┌──{bar}──┐");
    qprop_output!("│§ {title:^length$} §│");
    qprop_output!("└──{bar}──┘");
}
