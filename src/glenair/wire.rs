//! Wire size conversion between AWG and mm²
//!
//! AWG sizes larger than gauge 1 use the "zero series" (1/0 through 4/0).
//! Numerically these are carried as negative gauges: 1/0 is -1, 4/0 is -4.
//!
//! mm² values are rendered the way the vendor catalog prints them: two
//! decimals below 1 mm², one decimal otherwise. Rounding is Rust's float
//! formatting, i.e. round-half-to-even on the exact binary value, so 21.15
//! (stored as 21.1499...) renders as "21.1".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Wire sizing system
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireSystem {
    #[default]
    #[serde(rename = "AWG")]
    Awg,
    #[serde(rename = "MM2")]
    Mm2,
}

impl WireSystem {
    /// Catalog spelling, as stored in the wire mapping table
    pub fn as_str(&self) -> &'static str {
        match self {
            WireSystem::Awg => "AWG",
            WireSystem::Mm2 => "MM2",
        }
    }

    /// Display label for prompts and tables
    pub fn label(&self) -> &'static str {
        match self {
            WireSystem::Awg => "AWG",
            WireSystem::Mm2 => "mm²",
        }
    }

    /// Standard sizes offered for this system, smallest wire first
    pub fn standard_sizes(&self) -> &'static [&'static str] {
        match self {
            WireSystem::Awg => STANDARD_AWG_SIZES,
            WireSystem::Mm2 => STANDARD_MM2_SIZES,
        }
    }
}

impl fmt::Display for WireSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WireSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "awg" => Ok(WireSystem::Awg),
            "mm2" | "mm²" | "mm" => Ok(WireSystem::Mm2),
            _ => Err(format!("Invalid wire system: {}. Use 'awg' or 'mm2'", s)),
        }
    }
}

/// Whole AWG gauges and their nominal cross-section in mm²
///
/// Reference only; contact compatibility comes from the wire mapping table.
pub const AWG_TO_MM2: &[(u32, f64)] = &[
    (4, 21.15),
    (6, 13.30),
    (8, 8.37),
    (10, 5.26),
    (12, 3.31),
    (14, 2.08),
    (16, 1.31),
    (18, 0.82),
    (20, 0.52),
    (22, 0.33),
    (24, 0.20),
    (26, 0.13),
    (28, 0.08),
    (30, 0.05),
    (32, 0.03),
    (34, 0.02),
    (36, 0.013),
    (40, 0.005),
];

pub const STANDARD_AWG_SIZES: &[&str] = &[
    "40", "36", "34", "32", "30", "28", "26", "24", "22", "20", "18", "16", "14", "12", "10", "8",
    "6", "4",
];

pub const STANDARD_MM2_SIZES: &[&str] = &[
    "0.005", "0.013", "0.02", "0.03", "0.05", "0.08", "0.13", "0.20", "0.33", "0.52", "0.82",
    "1.31", "2.08", "3.31", "5.26", "8.37", "13.30", "21.15",
];

/// Look up the nominal mm² cross-section of a whole AWG gauge
pub fn awg_to_mm2(gauge: u32) -> Option<f64> {
    AWG_TO_MM2
        .iter()
        .find(|(g, _)| *g == gauge)
        .map(|(_, mm2)| *mm2)
}

/// Closest tabulated AWG gauge for a cross-section in mm²
pub fn nearest_awg(mm2: f64) -> Option<u32> {
    if !mm2.is_finite() || mm2 <= 0.0 {
        return None;
    }
    AWG_TO_MM2
        .iter()
        .min_by(|a, b| {
            (a.1 - mm2)
                .abs()
                .partial_cmp(&(b.1 - mm2).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(g, _)| *g)
}

/// A raw wire value as entered by a user or read from a file
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawWireValue<'a> {
    Text(&'a str),
    Number(f64),
}

impl<'a> From<&'a str> for RawWireValue<'a> {
    fn from(s: &'a str) -> Self {
        RawWireValue::Text(s)
    }
}

impl<'a> From<&'a String> for RawWireValue<'a> {
    fn from(s: &'a String) -> Self {
        RawWireValue::Text(s.as_str())
    }
}

impl From<f64> for RawWireValue<'static> {
    fn from(n: f64) -> Self {
        RawWireValue::Number(n)
    }
}

impl From<i32> for RawWireValue<'static> {
    fn from(n: i32) -> Self {
        RawWireValue::Number(n as f64)
    }
}

/// Parse a wire value, accepting the AWG "N/0" notation
///
/// Returns `None` for anything that is not a finite number. The whole trimmed
/// input must be numeric: a numeric prefix with trailing text such as
/// "20 AWG" is rejected rather than read as 20.
pub fn parse_value<'a>(raw: impl Into<RawWireValue<'a>>) -> Option<f64> {
    match raw.into() {
        RawWireValue::Number(n) => Some(n).filter(|n| n.is_finite()),
        RawWireValue::Text(text) => {
            let v = text.trim();
            if let Some((num, denom)) = v.split_once('/') {
                if let (Ok(n), Ok(0)) = (num.trim().parse::<i64>(), denom.trim().parse::<i64>()) {
                    return Some(if n == 0 { 0.0 } else { -(n.abs() as f64) });
                }
            }
            v.parse::<f64>().ok().filter(|n| n.is_finite())
        }
    }
}

/// Render a wire value in the given system
pub fn format_value(value: f64, system: WireSystem) -> String {
    match system {
        WireSystem::Awg => {
            if value == 0.0 {
                "0".to_string()
            } else if (-4.0..0.0).contains(&value) && value.fract() == 0.0 {
                format!("{}/0", -value as i64)
            } else {
                format!("{}", value)
            }
        }
        WireSystem::Mm2 => {
            if value < 1.0 {
                format!("{:.2}", value)
            } else {
                format!("{:.1}", value)
            }
        }
    }
}

/// Parse then re-render a wire value; `None` when unparseable
pub fn normalize(raw: &str, system: WireSystem) -> Option<String> {
    parse_value(raw).map(|v| format_value(v, system))
}

/// A wire value with its equivalent in the other system, when tabulated
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossReference {
    pub system: WireSystem,
    pub value: String,
    pub awg: Option<String>,
    pub mm2: Option<String>,
}

/// Cross-reference a wire value against the AWG/mm² table
pub fn cross_reference(raw: &str, system: WireSystem) -> Option<CrossReference> {
    let value = parse_value(raw)?;
    let (awg, mm2) = match system {
        WireSystem::Awg => {
            let mm2 = if value > 0.0 && value.fract() == 0.0 {
                awg_to_mm2(value as u32)
            } else {
                None
            };
            (Some(value), mm2)
        }
        WireSystem::Mm2 => (nearest_awg(value).map(|g| g as f64), Some(value)),
    };

    Some(CrossReference {
        system,
        value: format_value(value, system),
        awg: awg.map(|g| format_value(g, WireSystem::Awg)),
        mm2: mm2.map(|m| format_value(m, WireSystem::Mm2)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_zero_series() {
        assert_eq!(parse_value("1/0"), Some(-1.0));
        assert_eq!(parse_value("2/0"), Some(-2.0));
        assert_eq!(parse_value("4/0"), Some(-4.0));
        assert_eq!(parse_value(" 3/0 "), Some(-3.0));
    }

    #[test]
    fn test_parse_plain_values() {
        assert_eq!(parse_value("20"), Some(20.0));
        assert_eq!(parse_value("0"), Some(0.0));
        assert_eq!(parse_value("0.52"), Some(0.52));
        assert_eq!(parse_value(18.0), Some(18.0));
        assert_eq!(parse_value(12), Some(12.0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("abc"), None);
        assert_eq!(parse_value("1/2"), None);
        assert_eq!(parse_value("20 AWG"), None);
        assert_eq!(parse_value("NaN"), None);
        assert_eq!(parse_value(f64::INFINITY), None);
    }

    #[test]
    fn test_format_awg() {
        assert_eq!(format_value(-1.0, WireSystem::Awg), "1/0");
        assert_eq!(format_value(-2.0, WireSystem::Awg), "2/0");
        assert_eq!(format_value(-4.0, WireSystem::Awg), "4/0");
        assert_eq!(format_value(20.0, WireSystem::Awg), "20");
        assert_eq!(format_value(0.0, WireSystem::Awg), "0");
    }

    #[test]
    fn test_format_mm2_precision() {
        assert_eq!(format_value(0.52, WireSystem::Mm2), "0.52");
        assert_eq!(format_value(0.2, WireSystem::Mm2), "0.20");
        assert_eq!(format_value(13.3, WireSystem::Mm2), "13.3");
        assert_eq!(format_value(1.31, WireSystem::Mm2), "1.3");
        assert_eq!(format_value(21.15, WireSystem::Mm2), "21.1");
    }

    #[test]
    fn test_format_mm2_ties_round_half_even() {
        // Exact binary ties
        assert_eq!(format_value(1.25, WireSystem::Mm2), "1.2");
        assert_eq!(format_value(0.125, WireSystem::Mm2), "0.12");
        assert_eq!(format_value(0.375, WireSystem::Mm2), "0.38");
        assert_eq!(format_value(2.75, WireSystem::Mm2), "2.8");
    }

    #[test]
    fn test_awg_round_trip_for_table() {
        for (gauge, _) in AWG_TO_MM2 {
            let formatted = format_value(*gauge as f64, WireSystem::Awg);
            let parsed = parse_value(formatted.as_str()).unwrap();
            assert_eq!(format_value(parsed, WireSystem::Awg), formatted);
        }
        for n in 1..=4 {
            let formatted = format_value(-(n as f64), WireSystem::Awg);
            assert_eq!(formatted, format!("{}/0", n));
            assert_eq!(parse_value(formatted.as_str()), Some(-(n as f64)));
        }
    }

    #[test]
    fn test_awg_lookup() {
        assert_eq!(awg_to_mm2(20), Some(0.52));
        assert_eq!(awg_to_mm2(21), None);
        assert_eq!(nearest_awg(0.5), Some(20));
        assert_eq!(nearest_awg(0.0), None);
    }

    #[test]
    fn test_cross_reference() {
        let awg = cross_reference("20", WireSystem::Awg).unwrap();
        assert_eq!(awg.value, "20");
        assert_eq!(awg.mm2.as_deref(), Some("0.52"));

        let zero = cross_reference("1/0", WireSystem::Awg).unwrap();
        assert_eq!(zero.value, "1/0");
        assert_eq!(zero.mm2, None);

        let mm2 = cross_reference("2.0", WireSystem::Mm2).unwrap();
        assert_eq!(mm2.value, "2.0");
        assert_eq!(mm2.awg.as_deref(), Some("14"));

        assert!(cross_reference("big", WireSystem::Awg).is_none());
    }

    #[test]
    fn test_wire_system_parse() {
        assert_eq!("awg".parse::<WireSystem>().unwrap(), WireSystem::Awg);
        assert_eq!("MM2".parse::<WireSystem>().unwrap(), WireSystem::Mm2);
        assert_eq!("mm²".parse::<WireSystem>().unwrap(), WireSystem::Mm2);
        assert!("swg".parse::<WireSystem>().is_err());
    }
}
