//! Consolidation functions understood by `rrdtool fetch`.
//!
//! A consolidation function selects which archive (RRA) the engine reads
//! from when it reduces raw samples to the requested resolution. Only the
//! four functions the engine accepts for `fetch` are modeled.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownConsolidationFn;

/// Aggregation method used by the engine when reducing samples.
///
/// # Examples
///
/// ```rust
/// use rrdshell::ConsolidationFn;
///
/// assert_eq!(ConsolidationFn::Average.as_str(), "AVERAGE");
/// assert_eq!("max".parse::<ConsolidationFn>(), Ok(ConsolidationFn::Max));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConsolidationFn {
    /// Arithmetic mean of the primary data points.
    Average,

    /// Minimum of the primary data points.
    Min,

    /// Maximum of the primary data points.
    Max,

    /// Most recent primary data point.
    Last,
}

impl ConsolidationFn {
    /// All consolidation functions, in the order the engine documents them.
    pub const ALL: [ConsolidationFn; 4] = [Self::Average, Self::Min, Self::Max, Self::Last];

    /// Returns the token the engine expects on its command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Average => "AVERAGE",
            Self::Min => "MIN",
            Self::Max => "MAX",
            Self::Last => "LAST",
        }
    }
}

impl fmt::Display for ConsolidationFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConsolidationFn {
    type Err = UnknownConsolidationFn;

    /// Parses a consolidation function name, ignoring ASCII case.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|cf| cf.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownConsolidationFn(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_tokens() {
        let tokens: Vec<&str> = ConsolidationFn::ALL.iter().map(|cf| cf.as_str()).collect();
        assert_eq!(tokens, ["AVERAGE", "MIN", "MAX", "LAST"]);
        assert_eq!(ConsolidationFn::Last.to_string(), "LAST");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("AVERAGE".parse(), Ok(ConsolidationFn::Average));
        assert_eq!("min".parse(), Ok(ConsolidationFn::Min));
        assert_eq!("Last".parse(), Ok(ConsolidationFn::Last));

        let err = "SUM".parse::<ConsolidationFn>().unwrap_err();
        assert!(err.to_string().contains("'SUM'"));
    }

    #[test]
    fn test_serde_uses_engine_names() {
        let json = serde_json::to_string(&ConsolidationFn::Average).unwrap();
        assert_eq!(json, "\"AVERAGE\"");

        let cf: ConsolidationFn = serde_json::from_str("\"MAX\"").unwrap();
        assert_eq!(cf, ConsolidationFn::Max);
    }
}
