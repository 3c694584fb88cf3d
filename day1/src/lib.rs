use std::{fmt, io, str::FromStr};

use anyhow::{Context, Result};
use thiserror::Error;
use util::InputSource;

#[derive(Error, Debug)]
pub enum CalibrationError {
    #[error("No digit found in line {line_number}: {line:?}")]
    NoDigitInLine { line_number: usize, line: String },

    #[error("Digit pair ({first:?}, {last:?}) is not made of ASCII digits")]
    InvalidDigitPair { first: char, last: char },

    #[error("Unable to read line {line_number}")]
    ReadLine {
        line_number: usize,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingDigitPolicy {
    #[default]
    Fail,
    Zero,
}

#[derive(Error, Debug)]
#[error("Unknown missing digit policy {0:?}, expected \"fail\" or \"zero\"")]
pub struct MissingDigitPolicyParseError(String);

impl FromStr for MissingDigitPolicy {
    type Err = MissingDigitPolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fail" => Ok(Self::Fail),
            "zero" => Ok(Self::Zero),
            _ => Err(MissingDigitPolicyParseError(s.to_string())),
        }
    }
}

impl fmt::Display for MissingDigitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fail => write!(f, "fail"),
            Self::Zero => write!(f, "zero"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitPair {
    first: char,
    last: char,
}

impl DigitPair {
    pub fn first(&self) -> char {
        self.first
    }

    pub fn last(&self) -> char {
        self.last
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCalibration<'a> {
    pub line_number: usize,
    pub line: &'a str,
    pub digits: Option<DigitPair>,
    pub value: u32,
}

impl fmt::Display for LineCalibration<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.line_number;
        writeln!(f, "line ({n}) {}", self.line)?;
        match self.digits {
            Some(pair) => write!(
                f,
                "digits ({n}) ({} {}): {}",
                pair.first, pair.last, self.value
            ),
            None => write!(f, "digits ({n}) (none): {}", self.value),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CalibrationSummary {
    pub lines: usize,
    pub total: u64,
}

fn find_digit(mut chars: impl Iterator<Item = char>) -> Option<char> {
    chars.find(|c| c.is_ascii_digit())
}

pub fn find_first_digit(line: &str) -> Option<char> {
    find_digit(line.chars())
}

pub fn find_last_digit(line: &str) -> Option<char> {
    find_digit(line.chars().rev())
}

pub fn find_digit_pair(line: &str) -> Option<DigitPair> {
    let first = find_first_digit(line)?;
    let last = find_last_digit(line)?;

    Some(DigitPair { first, last })
}

pub fn combine(first: char, last: char) -> Result<u32, CalibrationError> {
    if !(first.is_ascii_digit() && last.is_ascii_digit()) {
        return Err(CalibrationError::InvalidDigitPair { first, last });
    }

    let mut number = String::from(first);
    number.push(last);

    number
        .parse()
        .map_err(|_| CalibrationError::InvalidDigitPair { first, last })
}

pub fn calibrate_line(
    line_number: usize,
    line: &str,
    policy: MissingDigitPolicy,
) -> Result<LineCalibration<'_>, CalibrationError> {
    let digits = find_digit_pair(line);

    let value = match (digits, policy) {
        (Some(pair), _) => combine(pair.first, pair.last)?,
        (None, MissingDigitPolicy::Zero) => {
            log::warn!("no digit in line {line_number}: {line:?}, counting it as 0");
            0
        }
        (None, MissingDigitPolicy::Fail) => {
            return Err(CalibrationError::NoDigitInLine {
                line_number,
                line: line.to_string(),
            })
        }
    };

    Ok(LineCalibration {
        line_number,
        line,
        digits,
        value,
    })
}

pub fn sum_calibration_values<F>(
    input: impl Iterator<Item = io::Result<String>>,
    policy: MissingDigitPolicy,
    mut on_line: F,
) -> Result<CalibrationSummary, CalibrationError>
where
    F: FnMut(&LineCalibration<'_>),
{
    let mut summary = CalibrationSummary::default();

    for (i, line) in input.enumerate() {
        let line_number = i + 1;
        let line = line.map_err(|source| CalibrationError::ReadLine {
            line_number,
            source,
        })?;

        let calibration = calibrate_line(line_number, &line, policy)?;
        log::debug!(
            "line {line_number}: {:?} -> {}",
            calibration.digits,
            calibration.value
        );
        on_line(&calibration);

        summary.total += u64::from(calibration.value);
        summary.lines += 1;
    }

    Ok(summary)
}

pub fn get_calibration_sum(
    input: impl Iterator<Item = io::Result<String>>,
) -> Result<u64, CalibrationError> {
    sum_calibration_values(input, MissingDigitPolicy::default(), |_| {}).map(|s| s.total)
}

pub fn run<F>(
    source: &InputSource,
    policy: MissingDigitPolicy,
    on_line: F,
) -> Result<CalibrationSummary>
where
    F: FnMut(&LineCalibration<'_>),
{
    let lines = source.lines()?;
    log::info!("reading calibration document from {source} (missing digits: {policy})");

    let summary = sum_calibration_values(lines, policy, on_line)
        .with_context(|| format!("Failed to calibrate {source}"))?;

    log::info!("{} lines, grand total {}", summary.lines, summary.total);

    Ok(summary)
}
