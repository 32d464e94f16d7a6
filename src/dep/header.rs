//! The textual header record: ordered `Key: value` lines.

use crate::dep::attributes::{AttrMap, AttrValue, RasterAttributes};
use crate::errors::{Result, WhiteboxError};

/// Key whose repeated occurrences accumulate instead of overwriting.
pub const METADATA_ENTRY_KEY: &str = "Metadata Entry";

/// Fields coerced to integers on parse.
const INT_FIELDS: [&str; 3] = ["Cols", "Rows", "Stacks"];

/// Fields coerced to floats on parse. `Nodata` is numeric here so the
/// sentinel can be compared against grid samples when masking.
const FLOAT_FIELDS: [&str; 9] = [
    "Min",
    "Max",
    "North",
    "South",
    "East",
    "West",
    "Display Min",
    "Display Max",
    "Nodata",
];

/// Fields whose values keep their original case; every other string value
/// is upper-cased on parse.
const PRESERVE_CASE_FIELDS: [&str; 2] = ["Data Type", "Byte Order"];

/// Render normalized attributes as header text.
///
/// Field order is fixed. `Stacks` is emitted only when present; absent
/// optional fields render as empty values; `Byte Order` always renders
/// (little-endian by default). Values pass through unescaped, so embedded
/// colons are preserved.
pub fn serialize(attrs: &RasterAttributes) -> String {
    fn opt_num(v: Option<f64>) -> String {
        v.map(|x| x.to_string()).unwrap_or_default()
    }

    let mut lines = vec![
        format!("Min: {}", attrs.min),
        format!("Max: {}", attrs.max),
        format!("North: {}", attrs.north),
        format!("South: {}", attrs.south),
        format!("East: {}", attrs.east),
        format!("West: {}", attrs.west),
        format!("Cols: {}", attrs.cols),
        format!("Rows: {}", attrs.rows),
    ];
    if let Some(stacks) = attrs.stacks {
        lines.push(format!("Stacks: {stacks}"));
    }
    lines.push(format!("Data Type: {}", attrs.data_type));
    lines.push(format!("Z Units: {}", attrs.z_units));
    lines.push(format!("Xy Units: {}", attrs.xy_units));
    lines.push(format!("Projection: {}", attrs.projection));
    lines.push(format!("Data Scale: {}", attrs.data_scale));
    lines.push(format!("Display Min: {}", opt_num(attrs.display_min)));
    lines.push(format!("Display Max: {}", opt_num(attrs.display_max)));
    lines.push(format!("Preferred Palette: {}", attrs.preferred_palette));
    lines.push(format!("Palette Nonlinearity: {}", attrs.palette_nonlinearity));
    lines.push(format!("Nodata: {}", opt_num(attrs.nodata)));
    lines.push(format!("Byte Order: {}", attrs.byte_order_or_default()));
    for entry in &attrs.metadata_entries {
        lines.push(format!("{METADATA_ENTRY_KEY}: {entry}"));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Parse header text into a raw attribute map keyed by title-cased field
/// names.
///
/// Each line splits on its *first* colon, so values may legally contain
/// colons. Numeric fields coerce per [`INT_FIELDS`]/[`FLOAT_FIELDS`]; an
/// empty numeric value counts as absent, letting a header with blank
/// optional fields round-trip. Repeated `Metadata Entry` keys accumulate
/// in order.
pub fn parse(text: &str) -> Result<AttrMap> {
    let mut attrs = AttrMap::new();
    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((key, rest)) = line.split_once(':') else {
            return Err(WhiteboxError::MalformedHeader {
                line: line.to_string(),
            });
        };
        let key = title_case(key.trim());
        let value = rest.trim();

        if key == METADATA_ENTRY_KEY {
            attrs.append_line(&key, &value.to_uppercase());
            continue;
        }

        let parsed = if INT_FIELDS.contains(&key.as_str()) {
            if value.is_empty() {
                continue;
            }
            AttrValue::Int(value.parse().map_err(|_| WhiteboxError::FieldParse {
                field: key.clone(),
                value: value.to_string(),
            })?)
        } else if FLOAT_FIELDS.contains(&key.as_str()) {
            if value.is_empty() {
                continue;
            }
            AttrValue::Float(value.parse().map_err(|_| WhiteboxError::FieldParse {
                field: key.clone(),
                value: value.to_string(),
            })?)
        } else if PRESERVE_CASE_FIELDS.contains(&key.as_str()) {
            AttrValue::Text(value.to_string())
        } else {
            AttrValue::Text(value.to_uppercase())
        };
        attrs.set(key, parsed);
    }
    Ok(attrs)
}

/// Title-case a key for lookup: `"BYTE ORDER"` becomes `"Byte Order"`.
fn title_case(key: &str) -> String {
    key.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_cases_keys() {
        assert_eq!(title_case("BYTE ORDER"), "Byte Order");
        assert_eq!(title_case("data   scale"), "Data Scale");
        assert_eq!(title_case("min"), "Min");
    }

    #[test]
    fn splits_on_first_colon_only() {
        let attrs = parse("Projection: EPSG:26917\n").unwrap();
        assert_eq!(
            attrs.get("Projection"),
            Some(&AttrValue::Text("EPSG:26917".to_string()))
        );
    }

    #[test]
    fn numeric_coercion_by_key_class() {
        let attrs = parse("Min: -1.5\nCols: 12\nNodata: -9999\n").unwrap();
        assert_eq!(attrs.get("Min"), Some(&AttrValue::Float(-1.5)));
        assert_eq!(attrs.get("Cols"), Some(&AttrValue::Int(12)));
        assert_eq!(attrs.get("Nodata"), Some(&AttrValue::Float(-9999.0)));
    }

    #[test]
    fn empty_numeric_values_are_absent() {
        let attrs = parse("Display Min: \nNodata:\n").unwrap();
        assert!(!attrs.contains("Display Min"));
        assert!(!attrs.contains("Nodata"));
    }

    #[test]
    fn string_values_upper_cased_except_preserved() {
        let attrs = parse("Z Units: meters\nData Type: float\nByte Order: LITTLE_ENDIAN\n")
            .unwrap();
        assert_eq!(attrs.get("Z Units"), Some(&AttrValue::Text("METERS".into())));
        assert_eq!(attrs.get("Data Type"), Some(&AttrValue::Text("float".into())));
        assert_eq!(
            attrs.get("Byte Order"),
            Some(&AttrValue::Text("LITTLE_ENDIAN".into()))
        );
    }

    #[test]
    fn metadata_entries_accumulate() {
        let attrs =
            parse("Metadata Entry: first\nMin: 0\nMetadata Entry: second\n").unwrap();
        assert_eq!(
            attrs.get(METADATA_ENTRY_KEY),
            Some(&AttrValue::Text("FIRST\nSECOND".to_string()))
        );
    }

    #[test]
    fn colonless_line_is_malformed() {
        let err = parse("Min 0\n").unwrap_err();
        assert!(matches!(err, WhiteboxError::MalformedHeader { .. }));
    }

    #[test]
    fn unparseable_numeric_field() {
        let err = parse("Rows: tall\n").unwrap_err();
        assert!(matches!(
            err,
            WhiteboxError::FieldParse { ref field, .. } if field == "Rows"
        ));
    }
}
