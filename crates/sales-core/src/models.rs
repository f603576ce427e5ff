use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::SalesError;
use crate::platform::Platform;

// ── Manufacturer ──────────────────────────────────────────────────────────────

/// Hardware manufacturer category, plus the synthetic `All` aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Manufacturer {
    /// Union of every real manufacturer. Never assigned to a record.
    #[serde(rename = "Overall")]
    All,
    Microsoft,
    Nintendo,
    PC,
    Sega,
    Sony,
    Other,
}

impl Manufacturer {
    /// Every manufacturer key, `All` first.
    pub const ALL: [Manufacturer; 7] = [
        Manufacturer::All,
        Manufacturer::Microsoft,
        Manufacturer::Nintendo,
        Manufacturer::PC,
        Manufacturer::Sega,
        Manufacturer::Sony,
        Manufacturer::Other,
    ];

    /// Display name; `All` shows as `"Overall"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "Overall",
            Self::Microsoft => "Microsoft",
            Self::Nintendo => "Nintendo",
            Self::PC => "PC",
            Self::Sega => "Sega",
            Self::Sony => "Sony",
            Self::Other => "Other",
        }
    }

    /// Label used by the manufacturer filter.
    pub fn filter_label(&self) -> &'static str {
        match self {
            Self::All => "All manufacturers",
            other => other.as_str(),
        }
    }

    /// Position in [`Manufacturer::ALL`].
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|m| m == self).unwrap_or(0)
    }

    /// The next manufacturer in filter order, wrapping around.
    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// The previous manufacturer in filter order, wrapping around.
    pub fn previous(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl Default for Manufacturer {
    fn default() -> Self {
        Self::All
    }
}

impl fmt::Display for Manufacturer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Manufacturer {
    type Err = SalesError;

    /// Case-insensitive; accepts both `"all"` and `"overall"` for the aggregate.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "overall" => Ok(Self::All),
            "microsoft" => Ok(Self::Microsoft),
            "nintendo" => Ok(Self::Nintendo),
            "pc" => Ok(Self::PC),
            "sega" => Ok(Self::Sega),
            "sony" => Ok(Self::Sony),
            "other" => Ok(Self::Other),
            _ => Err(SalesError::InvalidManufacturer(s.to_string())),
        }
    }
}

// ── Genre ─────────────────────────────────────────────────────────────────────

/// The twelve genre labels recognised by the genre aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Adventure,
    Fighting,
    Misc,
    Platform,
    Puzzle,
    Racing,
    #[serde(rename = "Role-Playing")]
    RolePlaying,
    Shooter,
    Simulation,
    Sports,
    Strategy,
}

impl Genre {
    /// Declaration order; also the tie-break order for equal release counts.
    pub const ALL: [Genre; 12] = [
        Genre::Action,
        Genre::Adventure,
        Genre::Fighting,
        Genre::Misc,
        Genre::Platform,
        Genre::Puzzle,
        Genre::Racing,
        Genre::RolePlaying,
        Genre::Shooter,
        Genre::Simulation,
        Genre::Sports,
        Genre::Strategy,
    ];

    /// The dataset label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Action => "Action",
            Self::Adventure => "Adventure",
            Self::Fighting => "Fighting",
            Self::Misc => "Misc",
            Self::Platform => "Platform",
            Self::Puzzle => "Puzzle",
            Self::Racing => "Racing",
            Self::RolePlaying => "Role-Playing",
            Self::Shooter => "Shooter",
            Self::Simulation => "Simulation",
            Self::Sports => "Sports",
            Self::Strategy => "Strategy",
        }
    }

    /// Exact-match lookup of a dataset label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.as_str() == label)
    }

    /// Position in [`Genre::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Region ────────────────────────────────────────────────────────────────────

/// Sales territories, in the fixed order the region view reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Region {
    NaSales,
    EuSales,
    JpSales,
    OtherSales,
}

impl Region {
    pub const ALL: [Region; 4] = [
        Region::NaSales,
        Region::EuSales,
        Region::JpSales,
        Region::OtherSales,
    ];

    /// Short label for charts.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NaSales => "NA",
            Self::EuSales => "EU",
            Self::JpSales => "JP",
            Self::OtherSales => "Others",
        }
    }

    /// Position in [`Region::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── RawRecord ─────────────────────────────────────────────────────────────────

/// One dataset row exactly as imported.
///
/// Numeric fields accept numbers, numeric strings and `null`.  A string that
/// does not parse as a number is kept as `NaN` so the defect stays visible in
/// downstream sums instead of being silently dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default, deserialize_with = "loose_number")]
    pub year_of_release: Option<f64>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    /// North American sales, millions of units.
    #[serde(default, deserialize_with = "loose_sales")]
    pub na_sales: f64,
    #[serde(default, deserialize_with = "loose_sales")]
    pub eu_sales: f64,
    #[serde(default, deserialize_with = "loose_sales")]
    pub jp_sales: f64,
    #[serde(default, deserialize_with = "loose_sales")]
    pub other_sales: f64,
    #[serde(default, deserialize_with = "loose_sales")]
    pub global_sales: f64,
    #[serde(default, deserialize_with = "loose_number")]
    pub critic_score: Option<f64>,
    #[serde(default, deserialize_with = "loose_number")]
    pub critic_count: Option<f64>,
    #[serde(default, deserialize_with = "loose_number")]
    pub user_score: Option<f64>,
    #[serde(default, deserialize_with = "loose_number")]
    pub user_count: Option<f64>,
    #[serde(default)]
    pub developer: Option<String>,
    #[serde(default)]
    pub rating: Option<String>,
}

// ── Game ──────────────────────────────────────────────────────────────────────

/// A normalized record: the raw fields plus the derived manufacturer and an
/// integer release year.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub name: Option<String>,
    pub platform: Platform,
    /// Truncated release year; `0` means unknown.
    pub year_of_release: i32,
    pub genre: Option<String>,
    pub publisher: Option<String>,
    pub na_sales: f64,
    pub eu_sales: f64,
    pub jp_sales: f64,
    pub other_sales: f64,
    pub global_sales: f64,
    pub critic_score: Option<f64>,
    pub critic_count: Option<f64>,
    pub user_score: Option<f64>,
    pub user_count: Option<f64>,
    pub developer: Option<String>,
    pub rating: Option<String>,
    /// Always derived from `platform`; never [`Manufacturer::All`].
    pub manufacturer: Manufacturer,
}

impl Game {
    /// The genre if it is one of the twelve known labels.
    pub fn known_genre(&self) -> Option<Genre> {
        self.genre.as_deref().and_then(Genre::from_label)
    }

    /// Sales in `region`, millions of units.
    pub fn sales(&self, region: Region) -> f64 {
        match region {
            Region::NaSales => self.na_sales,
            Region::EuSales => self.eu_sales,
            Region::JpSales => self.jp_sales,
            Region::OtherSales => self.other_sales,
        }
    }

    /// The critic score when present and non-zero.
    pub fn rated_score(&self) -> Option<f64> {
        self.critic_score.filter(|s| *s != 0.0 && !s.is_nan())
    }

    /// `true` when the release year is known (non-zero).
    pub fn has_release_year(&self) -> bool {
        self.year_of_release != 0
    }

    /// Name for display, with a placeholder for unnamed rows.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("(untitled)")
    }
}

// ── Lenient numeric parsing ───────────────────────────────────────────────────

/// Coerce a JSON value to a number the way the dataset export needs.
///
/// * `null`, empty strings → `None`
/// * numbers and numeric strings → the value
/// * booleans → `1.0` / `0.0`
/// * anything else → `NaN`
pub fn coerce_number(value: Value) -> Option<f64> {
    match value {
        Value::Null => None,
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if b { 1.0 } else { 0.0 }),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.parse().unwrap_or(f64::NAN))
            }
        }
        Value::Array(_) | Value::Object(_) => Some(f64::NAN),
    }
}

fn loose_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(coerce_number))
}

fn loose_sales<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(loose_number(deserializer)?.unwrap_or(0.0))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> RawRecord {
        serde_json::from_str(json).expect("valid record")
    }

    // ── Manufacturer ──────────────────────────────────────────────────────────

    #[test]
    fn test_manufacturer_default_is_all() {
        assert_eq!(Manufacturer::default(), Manufacturer::All);
    }

    #[test]
    fn test_manufacturer_display_all_is_overall() {
        assert_eq!(Manufacturer::All.to_string(), "Overall");
        assert_eq!(Manufacturer::All.filter_label(), "All manufacturers");
        assert_eq!(Manufacturer::Sega.filter_label(), "Sega");
    }

    #[test]
    fn test_manufacturer_from_str() {
        assert_eq!("all".parse::<Manufacturer>().unwrap(), Manufacturer::All);
        assert_eq!("Overall".parse::<Manufacturer>().unwrap(), Manufacturer::All);
        assert_eq!("SONY".parse::<Manufacturer>().unwrap(), Manufacturer::Sony);
        assert_eq!("pc".parse::<Manufacturer>().unwrap(), Manufacturer::PC);
        assert!("atari".parse::<Manufacturer>().is_err());
    }

    #[test]
    fn test_manufacturer_cycle_wraps() {
        assert_eq!(Manufacturer::All.next(), Manufacturer::Microsoft);
        assert_eq!(Manufacturer::Other.next(), Manufacturer::All);
        assert_eq!(Manufacturer::All.previous(), Manufacturer::Other);
        for m in Manufacturer::ALL {
            assert_eq!(m.next().previous(), m);
        }
    }

    #[test]
    fn test_manufacturer_serializes_as_map_key() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(Manufacturer::All, 1);
        map.insert(Manufacturer::Sony, 2);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"Overall":1,"Sony":2}"#);
    }

    // ── Genre / Region ────────────────────────────────────────────────────────

    #[test]
    fn test_genre_from_label_exact() {
        assert_eq!(Genre::from_label("Role-Playing"), Some(Genre::RolePlaying));
        assert_eq!(Genre::from_label("action"), None);
        assert_eq!(Genre::from_label("Horror"), None);
    }

    #[test]
    fn test_genre_index_matches_declaration_order() {
        for (i, genre) in Genre::ALL.iter().enumerate() {
            assert_eq!(genre.index(), i);
        }
    }

    #[test]
    fn test_region_labels_and_wire_names() {
        let labels: Vec<&str> = Region::ALL.iter().map(|r| r.label()).collect();
        assert_eq!(labels, vec!["NA", "EU", "JP", "Others"]);
        assert_eq!(serde_json::to_string(&Region::NaSales).unwrap(), "\"naSales\"");
    }

    // ── RawRecord deserialization ─────────────────────────────────────────────

    #[test]
    fn test_raw_record_camel_case_fields() {
        let record = parse(
            r#"{"name":"Wii Sports","platform":"Wii","yearOfRelease":2006,"genre":"Sports",
                "naSales":41.36,"euSales":28.96,"jpSales":3.77,"otherSales":8.45,
                "globalSales":82.53,"criticScore":76,"criticCount":51,"userScore":8,
                "userCount":322,"developer":"Nintendo","rating":"E"}"#,
        );
        assert_eq!(record.name.as_deref(), Some("Wii Sports"));
        assert_eq!(record.platform, Platform::Wii);
        assert_eq!(record.year_of_release, Some(2006.0));
        assert!((record.na_sales - 41.36).abs() < 1e-9);
        assert_eq!(record.critic_score, Some(76.0));
    }

    #[test]
    fn test_raw_record_missing_fields_default() {
        let record = parse(r#"{"platform":"PC"}"#);
        assert!(record.name.is_none());
        assert!(record.year_of_release.is_none());
        assert_eq!(record.na_sales, 0.0);
        assert!(record.critic_score.is_none());
    }

    #[test]
    fn test_raw_record_null_sales_is_zero() {
        let record = parse(r#"{"platform":"PC","naSales":null}"#);
        assert_eq!(record.na_sales, 0.0);
    }

    #[test]
    fn test_raw_record_numeric_strings() {
        let record = parse(r#"{"platform":"PC","yearOfRelease":"2015.9","userScore":"8.5"}"#);
        assert_eq!(record.year_of_release, Some(2015.9));
        assert_eq!(record.user_score, Some(8.5));
    }

    #[test]
    fn test_raw_record_non_numeric_string_is_nan() {
        let record = parse(r#"{"platform":"PC","userScore":"tbd","euSales":"n/a"}"#);
        assert!(record.user_score.unwrap().is_nan());
        assert!(record.eu_sales.is_nan());
    }

    // ── coerce_number ─────────────────────────────────────────────────────────

    #[test]
    fn test_coerce_number_variants() {
        assert_eq!(coerce_number(Value::Null), None);
        assert_eq!(coerce_number(Value::String("  ".into())), None);
        assert_eq!(coerce_number(Value::Bool(true)), Some(1.0));
        assert_eq!(coerce_number(serde_json::json!(12.5)), Some(12.5));
        assert!(coerce_number(serde_json::json!([1])).unwrap().is_nan());
    }
}
