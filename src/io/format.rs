//! Formatting of the ShellSym report output.

use std::fmt;

use log;

const SHELLSYM_BANNER_LENGTH: usize = 103;

/// Logs a warning to the `shellsym-output` logger.
macro_rules! shellsym_warn {
    ($fmt:expr $(, $($arg:tt)*)?) => { log::warn!(target: "shellsym-output", $fmt, $($($arg)*)?); }
}

/// Logs a main output line to the `shellsym-output` logger.
macro_rules! shellsym_output {
    ($fmt:expr $(, $($arg:tt)*)?) => { log::info!(target: "shellsym-output", $fmt, $($($arg)*)?); }
}

pub(crate) use {shellsym_output, shellsym_warn};

/// Logs a nicely formatted section title to the `shellsym-output` logger.
pub(crate) fn log_title(title: &str) {
    let length = title.chars().count().max(SHELLSYM_BANNER_LENGTH - 6);
    let bar = "─".repeat(length);
    shellsym_output!("┌──{bar}──┐");
    shellsym_output!("│§ {title:^length$} §│");
    shellsym_output!("└──{bar}──┘");
}

/// Writes a nicely formatted subtitle.
pub(crate) fn write_subtitle(f: &mut fmt::Formatter<'_>, subtitle: &str) -> fmt::Result {
    let bar = "═".repeat(subtitle.chars().count());
    writeln!(f, "{subtitle}")?;
    writeln!(f, "{bar}")?;
    Ok(())
}

/// Logs a nicely formatted subtitle to the `shellsym-output` logger.
pub(crate) fn log_subtitle(subtitle: &str) {
    let bar = "═".repeat(subtitle.chars().count());
    shellsym_output!("{}", subtitle);
    shellsym_output!("{}", bar);
}

/// Logs a nicely formatted macro-section beginning to the `shellsym-output` logger.
pub(crate) fn log_macsec_begin(sectitle: &str) {
    let width = SHELLSYM_BANNER_LENGTH - 14;
    let sectitle_space = sectitle.to_string() + " ";
    shellsym_output!("❬❬❬❬❬ [Begin] {sectitle_space:❬<width$}");
}

/// Logs a nicely formatted macro-section ending to the `shellsym-output` logger.
pub(crate) fn log_macsec_end(sectitle: &str) {
    let width = SHELLSYM_BANNER_LENGTH - 14;
    let sectitle_space = sectitle.to_string() + " ";
    shellsym_output!("❭❭❭❭❭ [ End ] {sectitle_space:❭<width$}");
}

/// Turns a boolean into a string of `yes` or `no`.
pub(crate) fn nice_bool(b: bool) -> String {
    if b {
        "yes".to_string()
    } else {
        "no".to_string()
    }
}

/// A trait for logging ShellSym outputs nicely.
pub(crate) trait ShellSymOutput: fmt::Debug + fmt::Display {
    /// Logs display output nicely.
    fn log_output_display(&self) {
        let lines = self.to_string();
        lines.lines().for_each(|line| {
            shellsym_output!("{line}");
        })
    }
}

// Blanket implementation
impl<T> ShellSymOutput for T where T: fmt::Debug + fmt::Display {}
