use std::fmt;

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// A single recorded blood shard sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropRecord {
    #[serde(rename = "When", deserialize_with = "deserialize_when")]
    pub when: NaiveDateTime,
    #[serde(rename = "PriceGp")]
    pub price_gp: u64,
}

impl DropRecord {
    pub fn new(when: NaiveDateTime, price_gp: u64) -> DropRecord {
        DropRecord { when, price_gp }
    }

    pub fn price_display(&self) -> String {
        format!("{} gp", format_gp(self.price_gp))
    }
}

impl fmt::Display for DropRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {:>16}", self.when.format("%Y-%m-%d %H:%M"), self.price_display())
    }
}

/// Accepts both naive local timestamps and RFC 3339 strings carrying an offset.
/// Offset timestamps are shifted into local wall-clock time.
fn deserialize_when<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;

    if let Ok(when) = raw.parse::<NaiveDateTime>() {
        return Ok(when);
    }

    DateTime::parse_from_rfc3339(&raw)
        .map(|when| when.with_timezone(&Local).naive_local())
        .map_err(serde::de::Error::custom)
}

/// Formats an amount with `,` thousands separators, e.g. `9700000` -> `9,700,000`.
pub fn format_gp(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_format_gp() {
        assert_eq!(format_gp(0), "0");
        assert_eq!(format_gp(999), "999");
        assert_eq!(format_gp(1000), "1,000");
        assert_eq!(format_gp(9_700_000), "9,700,000");
        assert_eq!(format_gp(123_456_789_012), "123,456,789,012");
    }

    #[test]
    fn test_price_display() -> Result<()> {
        let when = NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|d| d.and_hms_opt(13, 7, 0))
            .ok_or_else(|| anyhow::anyhow!("invalid date"))?;
        let record = DropRecord::new(when, 9_700_000);

        assert_eq!(record.price_display(), "9,700,000 gp");
        assert_eq!(record.to_string(), "2024-05-01 13:07      9,700,000 gp");

        Ok(())
    }

    #[test]
    fn test_deserialize_naive_timestamp() -> Result<()> {
        let record: DropRecord = serde_json::from_str(r#"{"When":"2024-05-01T13:07:00","PriceGp":900000}"#)?;

        assert_eq!(record.when.to_string(), "2024-05-01 13:07:00");
        assert_eq!(record.price_gp, 900_000);

        Ok(())
    }

    #[test]
    fn test_deserialize_offset_timestamp() -> Result<()> {
        let raw = r#"{"When":"2024-05-01T13:07:00.1234567+02:00","PriceGp":13000000}"#;
        let record: DropRecord = serde_json::from_str(raw)?;

        let expected = DateTime::parse_from_rfc3339("2024-05-01T13:07:00.1234567+02:00")?
            .with_timezone(&Local)
            .naive_local();
        assert_eq!(record.when, expected);

        Ok(())
    }

    #[test]
    fn test_deserialize_rejects_garbage_timestamp() {
        let result = serde_json::from_str::<DropRecord>(r#"{"When":"yesterday","PriceGp":1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_rejects_negative_price() {
        let result = serde_json::from_str::<DropRecord>(r#"{"When":"2024-05-01T13:07:00","PriceGp":-5}"#);
        assert!(result.is_err());
    }
}
