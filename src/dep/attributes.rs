//! Raster attributes: the raw attribute map and its normalized, typed form.
//!
//! Incoming attribute keys are matched case- and spacing-insensitively
//! (`Data Scale`, `data_scale` and `DATA SCALE` all name the same field).
//! Normalization happens once, at the boundary; everything downstream
//! operates on the typed [`RasterAttributes`].

use std::fmt::{Display, Formatter};

use crate::errors::{Result, WhiteboxError};
use crate::raster::{ByteOrder, DataScale, DataType};

/// Fields that must be present after normalization.
const REQUIRED_FIELDS: [&str; 12] = [
    "cols",
    "data_scale",
    "dtype",
    "east",
    "max",
    "min",
    "north",
    "rows",
    "south",
    "west",
    "xy_units",
    "z_units",
];

/// Recognized optional fields, back-filled with empty values when absent.
const OPTIONAL_FIELDS: [&str; 8] = [
    "display_min",
    "display_max",
    "metadata_entry",
    "projection",
    "preferred_palette",
    "palette_nonlinearity",
    "byte_order",
    "nodata",
];

/// Default palette file marker applied when no preferred palette is given.
pub const DEFAULT_PALETTE_FILE: &str = "high_relief.pal";

/// One raw attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Float(f64),
    Int(i64),
    Text(String),
}

impl AttrValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Float(v) => Some(*v),
            AttrValue::Int(v) => Some(*v as f64),
            AttrValue::Text(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttrValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Whether the value is the empty-string filler used for absent fields.
    fn is_empty_text(&self) -> bool {
        matches!(self, AttrValue::Text(s) if s.is_empty())
    }
}

impl Display for AttrValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AttrValue::Float(v) => write!(f, "{v}"),
            AttrValue::Int(v) => write!(f, "{v}"),
            AttrValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> AttrValue {
        AttrValue::Float(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> AttrValue {
        AttrValue::Int(v)
    }
}

impl From<i32> for AttrValue {
    fn from(v: i32) -> AttrValue {
        AttrValue::Int(v as i64)
    }
}

impl From<usize> for AttrValue {
    fn from(v: usize) -> AttrValue {
        AttrValue::Int(v as i64)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> AttrValue {
        AttrValue::Text(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> AttrValue {
        AttrValue::Text(v)
    }
}

/// An ordered attribute mapping with arbitrary-case keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttrMap {
    entries: Vec<(String, AttrValue)>,
}

impl AttrMap {
    pub fn new() -> AttrMap {
        AttrMap::default()
    }

    /// Insert or overwrite `key` (exact-case match).
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder form of [`AttrMap::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> AttrMap {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Accumulate a repeated line-valued key: later occurrences append,
    /// newline-joined, instead of overwriting.
    pub(crate) fn append_line(&mut self, key: &str, line: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, AttrValue::Text(existing))) => {
                existing.push('\n');
                existing.push_str(line);
            }
            Some(slot) => slot.1 = AttrValue::Text(line.to_string()),
            None => self
                .entries
                .push((key.to_string(), AttrValue::Text(line.to_string()))),
        }
    }
}

impl<K: Into<String>, V: Into<AttrValue>> FromIterator<(K, V)> for AttrMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> AttrMap {
        let mut map = AttrMap::new();
        for (k, v) in iter {
            map.set(k, v);
        }
        map
    }
}

/// Normalized raster attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterAttributes {
    pub min: f64,
    pub max: f64,
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
    pub cols: usize,
    pub rows: usize,
    /// Band count; anything above 1 is unsupported.
    pub stacks: Option<u32>,
    pub data_type: DataType,
    pub z_units: String,
    pub xy_units: String,
    pub data_scale: DataScale,
    pub projection: String,
    pub display_min: Option<f64>,
    pub display_max: Option<f64>,
    pub preferred_palette: String,
    /// Either a numeric nonlinearity or a palette file marker.
    pub palette_nonlinearity: String,
    pub byte_order: Option<ByteOrder>,
    pub nodata: Option<f64>,
    pub metadata_entries: Vec<String>,
}

impl RasterAttributes {
    pub fn byte_order_or_default(&self) -> ByteOrder {
        self.byte_order.unwrap_or_default()
    }
}

/// Lower-case and underscore-join an attribute key: `"Data Scale"` and
/// `"data_scale"` both map to `data_scale`.
fn lower_key(key: &str) -> String {
    key.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Reconcile raw attributes into a [`RasterAttributes`].
///
/// `inferred_type` is the numeric kind derived from the grid (encode path)
/// or from the header's `Data Type` string (decode path); it wins over any
/// data-type attribute in `raw`.
pub fn normalize(raw: &AttrMap, inferred_type: DataType) -> Result<RasterAttributes> {
    let mut lower = AttrMap::new();
    lower.set("dtype", inferred_type.as_str());
    for (key, value) in raw.iter() {
        lower.set(lower_key(key), value.clone());
    }

    if !lower.contains("xy_units") {
        if let Some(units) = lower.get("units").cloned() {
            lower.set("xy_units", units);
        }
    }
    if !lower.contains("z_units") {
        if let Some(units) = lower.get("units").cloned() {
            lower.set("z_units", units);
        }
    }
    if !lower.contains("preferred_palette") {
        lower.set("palette_nonlinearity", DEFAULT_PALETTE_FILE);
    }
    if !lower.contains("palette_nonlinearity") {
        lower.set("palette_nonlinearity", 1.0);
    }

    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| !lower.contains(field))
        .map(|field| field.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(WhiteboxError::MissingFields(missing));
    }

    for field in OPTIONAL_FIELDS {
        if !lower.contains(field) {
            lower.set(field, "");
        }
    }

    let scale_text = text_field(&lower, "data_scale");
    let data_scale = DataScale::from_scale_str(&scale_text)
        .ok_or_else(|| WhiteboxError::InvalidDataScale(scale_text.clone()))?;
    if data_scale == DataScale::Rgb {
        return Err(WhiteboxError::Unsupported(
            "rgb rasters are not handled; serialize the array yourself and run the tool \
             against the files"
                .to_string(),
        ));
    }

    let stacks = opt_u32(&lower, "stacks")?;
    if let Some(stacks) = stacks {
        if stacks > 1 {
            return Err(WhiteboxError::Unsupported(format!(
                "only single-stack rasters are supported, got stacks = {stacks}"
            )));
        }
    }

    Ok(RasterAttributes {
        min: req_f64(&lower, "min")?,
        max: req_f64(&lower, "max")?,
        north: req_f64(&lower, "north")?,
        south: req_f64(&lower, "south")?,
        east: req_f64(&lower, "east")?,
        west: req_f64(&lower, "west")?,
        cols: req_usize(&lower, "cols")?,
        rows: req_usize(&lower, "rows")?,
        stacks,
        data_type: inferred_type,
        z_units: text_field(&lower, "z_units"),
        xy_units: text_field(&lower, "xy_units"),
        data_scale,
        projection: text_field(&lower, "projection"),
        display_min: opt_f64(&lower, "display_min")?,
        display_max: opt_f64(&lower, "display_max")?,
        preferred_palette: text_field(&lower, "preferred_palette"),
        palette_nonlinearity: text_field(&lower, "palette_nonlinearity"),
        byte_order: opt_byte_order(&lower)?,
        nodata: opt_f64(&lower, "nodata")?,
        metadata_entries: metadata_entries(&lower),
    })
}

fn field_parse_err(field: &str, value: &AttrValue) -> WhiteboxError {
    WhiteboxError::FieldParse {
        field: field.to_string(),
        value: value.to_text(),
    }
}

fn req_f64(map: &AttrMap, field: &str) -> Result<f64> {
    let value = map
        .get(field)
        .ok_or_else(|| WhiteboxError::MissingFields(vec![field.to_string()]))?;
    match value.as_f64() {
        Some(v) => Ok(v),
        None => match value {
            AttrValue::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| field_parse_err(field, value)),
            _ => Err(field_parse_err(field, value)),
        },
    }
}

fn req_usize(map: &AttrMap, field: &str) -> Result<usize> {
    let value = map
        .get(field)
        .ok_or_else(|| WhiteboxError::MissingFields(vec![field.to_string()]))?;
    let parsed = match value {
        AttrValue::Int(v) => usize::try_from(*v).ok(),
        AttrValue::Text(s) => s.trim().parse().ok(),
        AttrValue::Float(_) => None,
    };
    parsed.ok_or_else(|| field_parse_err(field, value))
}

fn opt_f64(map: &AttrMap, field: &str) -> Result<Option<f64>> {
    match map.get(field) {
        None => Ok(None),
        Some(v) if v.is_empty_text() => Ok(None),
        Some(v @ AttrValue::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| field_parse_err(field, v)),
        Some(v) => Ok(v.as_f64()),
    }
}

fn opt_u32(map: &AttrMap, field: &str) -> Result<Option<u32>> {
    match map.get(field) {
        None => Ok(None),
        Some(v) if v.is_empty_text() => Ok(None),
        Some(v @ AttrValue::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| field_parse_err(field, v)),
        Some(v) => v
            .as_int()
            .and_then(|i| u32::try_from(i).ok())
            .map(Some)
            .ok_or_else(|| field_parse_err(field, v)),
    }
}

fn opt_byte_order(map: &AttrMap) -> Result<Option<ByteOrder>> {
    match map.get("byte_order") {
        None => Ok(None),
        Some(v) if v.is_empty_text() => Ok(None),
        Some(v) => {
            let text = v.to_text();
            ByteOrder::from_header_str(&text.trim().to_uppercase())
                .map(Some)
                .ok_or_else(|| field_parse_err("byte_order", v))
        }
    }
}

fn text_field(map: &AttrMap, field: &str) -> String {
    map.get(field).map(AttrValue::to_text).unwrap_or_default()
}

fn metadata_entries(map: &AttrMap) -> Vec<String> {
    let joined = text_field(map, "metadata_entry");
    joined
        .lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> AttrMap {
        AttrMap::new()
            .with("min", 0.0)
            .with("max", 10.0)
            .with("north", 5.0)
            .with("south", 0.0)
            .with("east", 0.0)
            .with("west", 5.0)
            .with("cols", 5)
            .with("rows", 5)
            .with("z_units", "M")
            .with("xy_units", "M")
            .with("data_scale", "continuous")
    }

    #[test]
    fn keys_are_case_and_spacing_insensitive() {
        let mut raw = minimal();
        raw.set("Data Scale", "categorical");
        raw.set("DATA SCALE", "boolean");
        let attrs = normalize(&raw, DataType::Float).unwrap();
        assert_eq!(attrs.data_scale, DataScale::Boolean);
    }

    #[test]
    fn units_backfill() {
        // A generic `units` fills in for absent z/xy units.
        let raw: AttrMap = minimal()
            .iter()
            .filter(|(k, _)| *k != "z_units" && *k != "xy_units")
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        let raw = raw.with("units", "feet");
        let attrs = normalize(&raw, DataType::Float).unwrap();
        assert_eq!(attrs.z_units, "feet");
        assert_eq!(attrs.xy_units, "feet");
    }

    #[test]
    fn palette_defaults() {
        // Without a preferred palette, the nonlinearity slot carries the
        // default palette file marker.
        let attrs = normalize(&minimal(), DataType::Float).unwrap();
        assert_eq!(attrs.preferred_palette, "");
        assert_eq!(attrs.palette_nonlinearity, DEFAULT_PALETTE_FILE);

        // With a palette present but no nonlinearity, the numeric default
        // applies instead.
        let raw = minimal().with("preferred_palette", "spectrum.pal");
        let attrs = normalize(&raw, DataType::Float).unwrap();
        assert_eq!(attrs.preferred_palette, "spectrum.pal");
        assert_eq!(attrs.palette_nonlinearity, "1");
    }

    #[test]
    fn missing_fields_are_listed_exactly() {
        let raw = AttrMap::new()
            .with("min", 0.0)
            .with("max", 1.0)
            .with("data_scale", "continuous");
        let err = normalize(&raw, DataType::Float).unwrap_err();
        let WhiteboxError::MissingFields(missing) = err else {
            panic!("expected MissingFields, got {err:?}");
        };
        assert_eq!(
            missing,
            vec!["cols", "east", "north", "rows", "south", "west", "xy_units", "z_units"]
        );
    }

    #[test]
    fn invalid_data_scale() {
        let raw = minimal().with("data_scale", "chromatic");
        let err = normalize(&raw, DataType::Float).unwrap_err();
        assert!(matches!(err, WhiteboxError::InvalidDataScale(ref s) if s == "chromatic"));
    }

    #[test]
    fn rgb_is_unsupported() {
        let raw = minimal().with("data_scale", "RGB");
        let err = normalize(&raw, DataType::Float).unwrap_err();
        assert!(matches!(err, WhiteboxError::Unsupported(_)));
    }

    #[test]
    fn stacks_above_one_rejected() {
        let raw = minimal().with("stacks", 2);
        let err = normalize(&raw, DataType::Integer).unwrap_err();
        assert!(matches!(err, WhiteboxError::Unsupported(_)));

        let raw = minimal().with("stacks", 1);
        let attrs = normalize(&raw, DataType::Integer).unwrap();
        assert_eq!(attrs.stacks, Some(1));
    }

    #[test]
    fn metadata_entries_split_on_lines() {
        let raw = minimal().with("metadata_entry", "created by test\nsecond note");
        let attrs = normalize(&raw, DataType::Float).unwrap();
        assert_eq!(
            attrs.metadata_entries,
            vec!["created by test".to_string(), "second note".to_string()]
        );
    }

    #[test]
    fn numeric_text_values_coerce() {
        let raw = minimal().with("min", "0.25").with("cols", "5");
        let attrs = normalize(&raw, DataType::Float).unwrap();
        assert_eq!(attrs.min, 0.25);
        assert_eq!(attrs.cols, 5);

        let raw = minimal().with("north", "tall");
        assert!(matches!(
            normalize(&raw, DataType::Float).unwrap_err(),
            WhiteboxError::FieldParse { ref field, .. } if field == "north"
        ));
    }
}
