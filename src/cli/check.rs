use crate::cli::sum::{digest_file, SumOptions};
use crate::config::Config;
use crate::error::{Result, SkeinError};
use std::fmt;
use std::path::Path;

/// Outcome of verifying a checksum list
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub passed: Vec<String>,
    pub failed: Vec<String>,
}

impl CheckReport {
    pub fn all_passed(&self) -> bool {
        self.failed.is_empty()
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for name in &self.passed {
            writeln!(f, "{}: OK", name)?;
        }
        for name in &self.failed {
            writeln!(f, "{}: FAILED", name)?;
        }
        if !self.failed.is_empty() {
            writeln!(
                f,
                "WARNING: {} of {} computed checksums did NOT match",
                self.failed.len(),
                self.passed.len() + self.failed.len()
            )?;
        }
        Ok(())
    }
}

/// Split a `<hex>  <name>` line. Line numbers are 1-based.
fn parse_line(line: &str, line_no: usize) -> Result<(Vec<u8>, &str)> {
    let (digest_hex, name) = line
        .split_once("  ")
        .ok_or(SkeinError::InvalidChecksumLine(line_no))?;
    let digest = hex::decode(digest_hex).map_err(|_| SkeinError::InvalidChecksumLine(line_no))?;
    if digest.is_empty() || name.is_empty() {
        return Err(SkeinError::InvalidChecksumLine(line_no));
    }
    Ok((digest, name))
}

/// Verify every entry of a checksum list. Relative names resolve against `base`,
/// and each entry's digest size follows from its hex length.
pub fn check_list(list: &str, base: &Path, config: &Config) -> Result<CheckReport> {
    let mut report = CheckReport::default();

    for (index, line) in list.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let (expected, name) = parse_line(line, index + 1)?;
        let options = SumOptions {
            size: expected.len(),
            config: config.clone(),
        };

        // Unreadable files count as mismatches rather than aborting the run
        match digest_file(&base.join(name), &options) {
            Ok(actual) if actual == expected => report.passed.push(name.to_string()),
            Ok(_) | Err(SkeinError::Io(_)) => report.failed.push(name.to_string()),
            Err(e) => return Err(e),
        }
    }

    Ok(report)
}

/// Read a checksum list file and verify it
pub fn check_file(list_path: &Path, config: &Config) -> Result<CheckReport> {
    let list = std::fs::read_to_string(list_path)?;
    let base = list_path.parent().unwrap_or_else(|| Path::new("."));
    check_list(&list, base, config)
}
