//! Argument builders for engine invocations.
//!
//! Each function returns the full argument vector for one engine action,
//! starting with the action verb. Builders never validate their input:
//! data-source and archive definitions are opaque tokens passed through in
//! caller order, and the file path is rendered as-is.
//!
//! ```rust
//! use std::path::Path;
//! use rrdshell::{ConsolidationFn, command};
//!
//! let args = command::fetch_args(
//!     Path::new("load.rrd"),
//!     ConsolidationFn::Average,
//!     1_364_374_210,
//!     1_364_407_660,
//!     None,
//! );
//! assert_eq!(
//!     args,
//!     ["fetch", "load.rrd", "AVERAGE", "--start", "1364374210", "--end", "1364407660"]
//! );
//! ```

use std::path::Path;

use crate::consolidate::ConsolidationFn;

/// Arguments that make the engine print its usage, which opens with the
/// version banner.
pub fn version_args() -> Vec<String> {
    vec!["--help".to_string()]
}

/// Arguments for `rrdtool info <file>`.
pub fn info_args(file: &Path) -> Vec<String> {
    vec!["info".to_string(), path_token(file)]
}

/// Arguments for `rrdtool fetch`.
///
/// `--resolution` is emitted only when `resolution` is `Some`, so that the
/// engine otherwise picks the archive's native step.
pub fn fetch_args(
    file: &Path,
    cf: ConsolidationFn,
    start: i64,
    end: i64,
    resolution: Option<u64>,
) -> Vec<String> {
    let mut args = vec![
        "fetch".to_string(),
        path_token(file),
        cf.as_str().to_string(),
        "--start".to_string(),
        start.to_string(),
        "--end".to_string(),
        end.to_string(),
    ];

    if let Some(resolution) = resolution {
        args.push("--resolution".to_string());
        args.push(resolution.to_string());
    }

    args
}

/// Arguments for `rrdtool create`: data sources first, then archives.
pub fn create_args<D, A>(file: &Path, data_sources: &[D], archives: &[A]) -> Vec<String>
where
    D: AsRef<str>,
    A: AsRef<str>,
{
    let mut args = Vec::with_capacity(2 + data_sources.len() + archives.len());
    args.push("create".to_string());
    args.push(path_token(file));
    args.extend(data_sources.iter().map(|ds| ds.as_ref().to_string()));
    args.extend(archives.iter().map(|rra| rra.as_ref().to_string()));
    args
}

/// Arguments for `rrdtool update`, values in caller order.
pub fn update_args<V: AsRef<str>>(file: &Path, values: &[V]) -> Vec<String> {
    let mut args = Vec::with_capacity(2 + values.len());
    args.push("update".to_string());
    args.push(path_token(file));
    args.extend(values.iter().map(|v| v.as_ref().to_string()));
    args
}

fn path_token(file: &Path) -> String {
    file.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_args() {
        assert_eq!(version_args(), ["--help"]);
    }

    #[test]
    fn test_info_args() {
        assert_eq!(
            info_args(Path::new("data/load.rrd")),
            ["info", "data/load.rrd"]
        );
    }

    #[test]
    fn test_fetch_without_resolution_omits_flag() {
        let args = fetch_args(Path::new("load.rrd"), ConsolidationFn::Min, 10, 20, None);
        assert_eq!(
            args,
            ["fetch", "load.rrd", "MIN", "--start", "10", "--end", "20"]
        );
        assert!(!args.iter().any(|a| a == "--resolution"));
    }

    #[test]
    fn test_fetch_with_resolution_appends_once() {
        let args = fetch_args(
            Path::new("load.rrd"),
            ConsolidationFn::Average,
            1_364_374_210,
            1_364_407_660,
            Some(3600),
        );
        assert_eq!(
            args,
            [
                "fetch",
                "load.rrd",
                "AVERAGE",
                "--start",
                "1364374210",
                "--end",
                "1364407660",
                "--resolution",
                "3600",
            ]
        );
        assert_eq!(args.iter().filter(|a| *a == "--resolution").count(), 1);
    }

    #[test]
    fn test_fetch_negative_start() {
        let args = fetch_args(Path::new("a.rrd"), ConsolidationFn::Last, -3600, 0, None);
        assert_eq!(args[4], "-3600");
    }

    #[test]
    fn test_create_preserves_order() {
        let args = create_args(
            Path::new("load.rrd"),
            &["DS:temp:GAUGE:600:U:U"],
            &[
                "RRA:AVERAGE:0.5:1:1200",
                "RRA:MIN:0.5:1:1200",
                "RRA:MAX:0.5:1:1200",
            ],
        );
        assert_eq!(
            args,
            [
                "create",
                "load.rrd",
                "DS:temp:GAUGE:600:U:U",
                "RRA:AVERAGE:0.5:1:1200",
                "RRA:MIN:0.5:1:1200",
                "RRA:MAX:0.5:1:1200",
            ]
        );
    }

    #[test]
    fn test_create_with_no_specs() {
        let none: [&str; 0] = [];
        assert_eq!(
            create_args(Path::new("x.rrd"), &none, &none),
            ["create", "x.rrd"]
        );
    }

    #[test]
    fn test_update_preserves_order() {
        let values = vec![
            "1364374210:0.5".to_string(),
            "1364374220:U".to_string(),
            "N:1.5".to_string(),
        ];
        assert_eq!(
            update_args(Path::new("load.rrd"), &values),
            [
                "update",
                "load.rrd",
                "1364374210:0.5",
                "1364374220:U",
                "N:1.5"
            ]
        );
    }
}
