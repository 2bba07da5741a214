//! Parsers for engine output.
//!
//! Each parser takes the complete captured standard output of one engine
//! action and decodes it into a typed result. The parsers are pure and
//! hold no state between calls.
//!
//! Three output shapes are handled:
//!
//! - **Usage text** (`rrdtool --help`), which opens with a banner such as
//!   `RRDtool 1.7.2  Copyright by Tobias Oetiker`.
//! - **Info blocks** (`rrdtool info`), one `key = value` pair per line.
//!   Only the per data source keys (`ds[name].attr = value`) are kept;
//!   global keys such as `step` or `rra[0].cf` are ignored.
//! - **Fetch tables** (`rrdtool fetch`), a whitespace separated header of
//!   data source names followed by `timestamp: v1 v2 ...` rows.
//!
//! `create` and `update` produce no payload; their output is discarded.
//!
//! Only version parsing can fail. Unexpected info or fetch output degrades
//! to an empty result rather than an error.

use std::sync::LazyLock;

use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{ParseError, Result};

/// Name of the column prepended to every fetch header.
pub const TIMESTAMP_COLUMN: &str = "timestamp";

static VERSION_BANNER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^RRDtool[ \t]+[0-9]+(?:\.[0-9]+)*").expect("version banner pattern is valid")
});

static INFO_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ds\[([A-Za-z]+)\]\.([A-Za-z]+) = (.*)$").expect("info line pattern is valid")
});

/// Extracts the version banner from the engine's usage text.
///
/// The banner must open the text. The whole match (product name and
/// version) is returned, e.g. `"RRDtool 1.7.2"`.
///
/// # Errors
///
/// Returns [`ParseError::VersionNotFound`] if the text does not begin with
/// a version banner.
///
/// # Examples
///
/// ```rust
/// use rrdshell::parse::parse_version;
///
/// let help = "RRDtool 1.7.2  Copyright by Tobias Oetiker\nUsage: rrdtool [options] command\n";
/// assert_eq!(parse_version(help).unwrap(), "RRDtool 1.7.2");
/// assert!(parse_version("Usage: rrdtool\n").is_err());
/// ```
pub fn parse_version(text: &str) -> Result<String> {
    VERSION_BANNER
        .find(text)
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ParseError::VersionNotFound.into())
}

/// Decodes the output of `rrdtool create` or `rrdtool update`.
///
/// Both actions print nothing meaningful on success; whatever was captured
/// is discarded and success carries no payload.
pub fn parse_ack(_text: &str) {}

/// A per data source attribute value from `rrdtool info`.
///
/// The engine prints numbers bare and strings quoted; consumers branch on
/// the variant rather than guessing.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum InfoValue {
    /// A numeric value such as `index = 0` or `max = 1.0000000000e+02`.
    Number(f64),
    /// Any value that is not a number, with quote characters removed.
    Text(String),
}

impl InfoValue {
    /// Coerces a raw info value.
    ///
    /// Text that parses to a number (and not to NaN) becomes
    /// [`InfoValue::Number`]; anything else is kept as text with every `'`
    /// and `"` stripped. `NaN` therefore stays textual, `inf` and
    /// `infinity` become infinite numbers, and an empty value stays as
    /// empty text.
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(number) if !number.is_nan() => Self::Number(number),
            _ => Self::Text(raw.chars().filter(|c| !matches!(*c, '\'' | '"')).collect()),
        }
    }

    /// Returns the number, if this is a numeric value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    /// Returns the text, if this is a textual value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Text(s) => Some(s),
        }
    }
}

/// Attributes reported for one data source, in first-seen order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataSourceInfo {
    name: String,
    attributes: Vec<(String, InfoValue)>,
}

impl DataSourceInfo {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attributes: Vec::new(),
        }
    }

    /// The data source name, e.g. `shortterm`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up an attribute such as `type`, `min` or `index`.
    pub fn get(&self, attribute: &str) -> Option<&InfoValue> {
        self.attributes
            .iter()
            .find(|(name, _)| name == attribute)
            .map(|(_, value)| value)
    }

    /// Iterates over `(attribute, value)` pairs in first-seen order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &InfoValue)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of attributes recorded.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns `true` if no attributes were recorded.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Sets an attribute, replacing an earlier value in place.
    fn set(&mut self, attribute: &str, value: InfoValue) {
        match self.attributes.iter_mut().find(|(name, _)| name == attribute) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((attribute.to_string(), value)),
        }
    }
}

impl Serialize for DataSourceInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.attributes.len()))?;
        for (attribute, value) in &self.attributes {
            map.serialize_entry(attribute, value)?;
        }
        map.end()
    }
}

/// Per data source metadata decoded from `rrdtool info`.
///
/// Data sources appear in the order the engine first reported them.
/// Serializes as a nested JSON object: `{"shortterm": {"index": 0, ...}}`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InfoRecord {
    data_sources: Vec<DataSourceInfo>,
}

impl InfoRecord {
    /// Looks up a data source by name.
    pub fn get(&self, data_source: &str) -> Option<&DataSourceInfo> {
        self.data_sources.iter().find(|ds| ds.name == data_source)
    }

    /// Shorthand for `get(data_source)?.get(attribute)`.
    pub fn attribute(&self, data_source: &str, attribute: &str) -> Option<&InfoValue> {
        self.get(data_source)?.get(attribute)
    }

    /// Iterates over data sources in first-seen order.
    pub fn data_sources(&self) -> impl Iterator<Item = &DataSourceInfo> {
        self.data_sources.iter()
    }

    /// Number of data sources.
    pub fn len(&self) -> usize {
        self.data_sources.len()
    }

    /// Returns `true` if the output described no data sources.
    pub fn is_empty(&self) -> bool {
        self.data_sources.is_empty()
    }

    fn entry(&mut self, data_source: &str) -> &mut DataSourceInfo {
        let index = match self.data_sources.iter().position(|ds| ds.name == data_source) {
            Some(index) => index,
            None => {
                self.data_sources.push(DataSourceInfo::new(data_source));
                self.data_sources.len() - 1
            }
        };
        &mut self.data_sources[index]
    }
}

impl Serialize for InfoRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.data_sources.len()))?;
        for ds in &self.data_sources {
            map.serialize_entry(&ds.name, ds)?;
        }
        map.end()
    }
}

/// Decodes the per data source lines of `rrdtool info` output.
///
/// Lines not shaped like `ds[name].attribute = value` are skipped. Output
/// without any such line yields an empty record.
///
/// # Examples
///
/// ```rust
/// use rrdshell::parse::{parse_info, InfoValue};
///
/// let info = parse_info("ds[shortterm].index = 0\nds[shortterm].type = \"GAUGE\"\n");
/// assert_eq!(info.attribute("shortterm", "index"), Some(&InfoValue::Number(0.0)));
/// assert_eq!(
///     info.attribute("shortterm", "type"),
///     Some(&InfoValue::Text("GAUGE".to_string()))
/// );
/// ```
pub fn parse_info(text: &str) -> InfoRecord {
    let mut record = InfoRecord::default();

    for line in text.lines() {
        let Some(caps) = INFO_LINE.captures(line) else {
            continue;
        };
        let (_, [data_source, attribute, raw]) = caps.extract();
        record
            .entry(data_source)
            .set(attribute, InfoValue::from_raw(raw));
    }

    record
}

/// A time window decoded from `rrdtool fetch`.
///
/// `headers` starts with [`TIMESTAMP_COLUMN`] followed by the data source
/// names; every row holds the timestamp followed by one value per data
/// source. Missing samples are `NaN` and must not be read as zero.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FetchResult {
    /// Column names, `"timestamp"` first.
    pub headers: Vec<String>,
    /// Rows aligned positionally with `headers`.
    pub rows: Vec<Vec<f64>>,
}

impl FetchResult {
    /// Data source names, without the leading timestamp column.
    pub fn data_sources(&self) -> &[String] {
        self.headers.get(1..).unwrap_or(&[])
    }

    /// Position of a column in `headers`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// All values of one column, in row order.
    ///
    /// A row too short to hold the column contributes `NaN`.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let index = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(index).copied().unwrap_or(f64::NAN))
                .collect(),
        )
    }

    /// Row timestamps as whole seconds, one entry per row.
    ///
    /// A row that is empty or whose first token was not a number yields
    /// `None`, so `timestamps()[i]` always describes `rows[i]`.
    #[allow(clippy::cast_possible_truncation)] // engine timestamps are integral seconds
    pub fn timestamps(&self) -> Vec<Option<i64>> {
        self.rows
            .iter()
            .map(|row| {
                row.first()
                    .filter(|ts| ts.is_finite())
                    .map(|ts| *ts as i64)
            })
            .collect()
    }

    /// Returns `true` if the window contained no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Decodes the tabular output of `rrdtool fetch`.
///
/// The first line names the data sources. Each following non-blank line is
/// split on runs of whitespace and `:`; every token becomes a number, with
/// non-numeric tokens (the engine prints `nan` or `-nan`) becoming `NaN`.
/// Rows are taken as-is: they are neither padded nor truncated.
///
/// # Examples
///
/// ```rust
/// use rrdshell::parse::parse_fetch;
///
/// let result = parse_fetch("shortterm midterm\n1364374210: 0.0 0.03\n\n");
/// assert_eq!(result.headers, ["timestamp", "shortterm", "midterm"]);
/// assert_eq!(result.rows, vec![vec![1_364_374_210.0, 0.0, 0.03]]);
/// ```
pub fn parse_fetch(text: &str) -> FetchResult {
    let mut lines = text.lines();

    let headers = std::iter::once(TIMESTAMP_COLUMN)
        .chain(lines.next().unwrap_or_default().split_whitespace())
        .map(str::to_string)
        .collect();

    let rows = lines
        .filter(|line| !line.trim().is_empty())
        .map(parse_row)
        .collect();

    FetchResult { headers, rows }
}

fn parse_row(line: &str) -> Vec<f64> {
    line.split(|c: char| c == ':' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| token.parse().unwrap_or(f64::NAN))
        .collect()
}
