//! Zoo description loader.
//!
//! The input is five positional lines:
//!
//! 1. zoo dimensions, three integers embedded in text
//! 2. depot position, three integers (a leading `-` is accepted)
//! 3. battery capacity, a plain integer
//! 4. food storages as `(x,y,z,diet)` tuples
//! 5. enclosures as `(x,y,z,importance,diet)` tuples
//!
//! In strict mode any text other than tuples and `, ; [ ]` separators is
//! rejected with the line number and the offending fragment. Lenient mode
//! drops it with a warning.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::{Captures, Regex};
use thiserror::Error;
use zoo_route::{Diet, Enclosure, FoodStorage, Position, Zoo};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read input file {}", path.display())]
    MissingInputFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: expected {expected}, but the input ends early")]
    MissingLine { line: usize, expected: &'static str },

    #[error("line {line}: malformed {expected}: `{text}`")]
    MalformedRecord {
        line: usize,
        expected: &'static str,
        text: String,
    },
}

pub type Result<T> = std::result::Result<T, LoadError>;

const DIMENSIONS: &str = "zoo dimensions";
const DEPOT: &str = "depot position";
const BATTERY: &str = "battery capacity";
const STORAGES: &str = "food storage records";
const ENCLOSURES: &str = "enclosure records";

fn integer_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-?\d+").expect("integer pattern compiles"))
}

fn storage_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*,\s*([cho])\s*\)")
            .expect("storage pattern compiles")
    })
}

fn enclosure_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*,\s*([\d.]+)\s*,\s*([cho])\s*\)")
            .expect("enclosure pattern compiles")
    })
}

/// Reads zoo description files.
#[derive(Debug, Clone, Copy)]
pub struct ZooLoader {
    strict: bool,
}

impl Default for ZooLoader {
    fn default() -> Self {
        Self { strict: true }
    }
}

impl ZooLoader {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    /// Load a zoo from `path`.
    pub fn load(&self, path: &Path) -> Result<Zoo> {
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::MissingInputFile {
            path: path.to_path_buf(),
            source,
        })?;
        let zoo = self.parse(&content)?;

        tracing::debug!(
            path = %path.display(),
            storages = zoo.storages.len(),
            enclosures = zoo.enclosures.len(),
            "Loaded zoo"
        );
        Ok(zoo)
    }

    /// Parse the five description lines. Lines past the fifth are ignored.
    pub fn parse(&self, content: &str) -> Result<Zoo> {
        let lines: Vec<&str> = content.lines().map(str::trim).collect();

        let dimensions = self.parse_position(nth_line(&lines, 0, DIMENSIONS)?, 1, DIMENSIONS)?;
        let depot = self.parse_position(nth_line(&lines, 1, DEPOT)?, 2, DEPOT)?;
        let battery_capacity = parse_battery(nth_line(&lines, 2, BATTERY)?, 3)?;
        let storages = self.parse_storages(nth_line(&lines, 3, STORAGES)?, 4)?;
        let enclosures = self.parse_enclosures(nth_line(&lines, 4, ENCLOSURES)?, 5)?;

        Ok(Zoo::new(
            dimensions,
            depot,
            battery_capacity,
            storages,
            enclosures,
        ))
    }

    fn parse_position(&self, text: &str, line: usize, expected: &'static str) -> Result<Position> {
        let malformed = || LoadError::MalformedRecord {
            line,
            expected,
            text: text.to_string(),
        };

        let numbers = integer_pattern()
            .find_iter(text)
            .map(|m| m.as_str().parse::<i64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| malformed())?;

        let valid = if self.strict {
            numbers.len() == 3
        } else {
            numbers.len() >= 3
        };
        if !valid {
            return Err(malformed());
        }
        if numbers.len() > 3 {
            tracing::warn!(line, expected, "Ignoring extra numbers");
        }
        Ok(Position::new(numbers[0], numbers[1], numbers[2]))
    }

    fn parse_storages(&self, text: &str, line: usize) -> Result<Vec<FoodStorage>> {
        self.parse_records(text, line, STORAGES, storage_pattern(), |caps| {
            let position = position_from(caps)?;
            let diet = diet_from(caps, 4)?;
            Some(FoodStorage::new(position, diet))
        })
    }

    fn parse_enclosures(&self, text: &str, line: usize) -> Result<Vec<Enclosure>> {
        self.parse_records(text, line, ENCLOSURES, enclosure_pattern(), |caps| {
            let position = position_from(caps)?;
            let importance = caps[4].parse::<f64>().ok()?;
            let diet = diet_from(caps, 5)?;
            Some(Enclosure::new(position, importance, diet))
        })
    }

    /// Extract every tuple matching `pattern`, validating the text in between.
    fn parse_records<T>(
        &self,
        text: &str,
        line: usize,
        expected: &'static str,
        pattern: &Regex,
        build: impl Fn(&Captures<'_>) -> Option<T>,
    ) -> Result<Vec<T>> {
        let mut records = Vec::new();
        let mut cursor = 0;

        for caps in pattern.captures_iter(text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            self.check_gap(&text[cursor..whole.start()], line, expected)?;
            cursor = whole.end();

            match build(&caps) {
                Some(record) => records.push(record),
                None => self.reject(whole.as_str(), line, expected)?,
            }
        }
        self.check_gap(&text[cursor..], line, expected)?;

        Ok(records)
    }

    fn check_gap(&self, gap: &str, line: usize, expected: &'static str) -> Result<()> {
        if gap.chars().all(is_separator) {
            return Ok(());
        }
        self.reject(gap.trim_matches(is_separator), line, expected)
    }

    fn reject(&self, fragment: &str, line: usize, expected: &'static str) -> Result<()> {
        if self.strict {
            return Err(LoadError::MalformedRecord {
                line,
                expected,
                text: fragment.to_string(),
            });
        }
        tracing::warn!(line, expected, fragment, "Dropping unparseable text");
        Ok(())
    }
}

/// Load `path` with strict validation.
pub fn load_zoo(path: &Path) -> Result<Zoo> {
    ZooLoader::default().load(path)
}

fn nth_line<'a>(lines: &[&'a str], idx: usize, expected: &'static str) -> Result<&'a str> {
    lines.get(idx).copied().ok_or(LoadError::MissingLine {
        line: idx + 1,
        expected,
    })
}

fn parse_battery(text: &str, line: usize) -> Result<f64> {
    text.parse::<i64>()
        .map(|capacity| capacity as f64)
        .map_err(|_| LoadError::MalformedRecord {
            line,
            expected: BATTERY,
            text: text.to_string(),
        })
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, ',' | ';' | '[' | ']')
}

fn position_from(caps: &Captures<'_>) -> Option<Position> {
    let coord = |idx: usize| caps[idx].parse::<i64>().ok();
    Some(Position::new(coord(1)?, coord(2)?, coord(3)?))
}

fn diet_from(caps: &Captures<'_>, idx: usize) -> Option<Diet> {
    caps[idx].chars().next().and_then(Diet::from_letter)
}
