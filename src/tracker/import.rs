use std::sync::OnceLock;

use chrono::NaiveDateTime;
use log::debug;
use regex::Regex;

use super::record::DropRecord;

/// Number of lines after a marker that may hold its price line.
const LOOKAHEAD_LINES: usize = 6;

fn marker_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)^\s*Vyrewatch\s+Sentinel:\s*$").expect("valid marker pattern"))
}

fn price_line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)\bBlood\s*shard\b.*?\(([^)]+)\)").expect("valid price line pattern"))
}

fn comma_grouped_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{1,3}(?:,[0-9]{3})+(?:\.[0-9]+)?$").expect("valid comma pattern"))
}

fn suffixed_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^([0-9]+(?:\.[0-9]+)?)\s*([kKmMbB])$").expect("valid suffix pattern"))
}

/// Result of importing a block of pasted chat text.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportOutcome {
    pub records: Vec<DropRecord>,
    pub imported: usize,
}

/// Lazily walks pasted text and yields one price per marker that resolves.
pub struct PriceScanner<'a> {
    lines: Vec<&'a str>,
    cursor: usize,
}

impl<'a> PriceScanner<'a> {
    pub fn new(text: &'a str) -> PriceScanner<'a> {
        // "\r\n" and lone "\r" are both line breaks.
        let lines = if text.trim().is_empty() {
            Vec::new()
        } else {
            text.split("\r\n").flat_map(|chunk| chunk.split(['\r', '\n'])).collect()
        };

        PriceScanner { lines, cursor: 0 }
    }

    /// Looks for the first price line in the window following the marker at `marker`.
    fn price_after(&self, marker: usize) -> Option<u64> {
        let end = (marker + LOOKAHEAD_LINES).min(self.lines.len().saturating_sub(1));

        for line in self.lines.iter().take(end + 1).skip(marker + 1) {
            let line = line.trim();
            if line.eq_ignore_ascii_case("image") {
                continue;
            }

            if let Some(captures) = price_line_pattern().captures(line) {
                let inside = captures[1].trim();
                let price = parse_price(inside);
                if price.is_none() {
                    debug!("unparseable price expression, inside={:?}", inside);
                }
                return price;
            }
        }

        None
    }
}

impl Iterator for PriceScanner<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        while self.cursor < self.lines.len() {
            let index = self.cursor;
            self.cursor += 1;

            if !marker_pattern().is_match(self.lines[index]) {
                continue;
            }

            match self.price_after(index) {
                Some(price) => return Some(price),
                None => debug!("marker without usable price line, line={}", index + 1),
            }
        }

        None
    }
}

/// Converts the text found inside a price line's parentheses into gp.
///
/// Forms are tried in order: comma grouped (`9,700,000`), suffixed shorthand
/// (`9.00M`, `900k`) and finally whatever digits the text contains.
pub fn parse_price(inside: &str) -> Option<u64> {
    let inside = inside.trim();

    if comma_grouped_pattern().is_match(inside) {
        // A fractional part is concatenated, not scaled: "1,234.5" -> 12345.
        return digits_only(inside);
    }

    if let Some(captures) = suffixed_pattern().captures(inside) {
        let value: f64 = captures[1].parse().ok()?;
        let multiplier = match captures[2].to_ascii_lowercase().as_str() {
            "k" => 1_000f64,
            "m" => 1_000_000f64,
            "b" => 1_000_000_000f64,
            _ => 1f64,
        };

        let scaled = (value * multiplier).round();
        if !scaled.is_finite() || scaled > u64::MAX as f64 {
            return None;
        }
        return Some(scaled as u64);
    }

    digits_only(inside)
}

fn digits_only(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Imports every resolvable marker in `text`, stamping each record with `now`.
pub fn import_text(text: &str, now: NaiveDateTime) -> ImportOutcome {
    let records: Vec<DropRecord> = PriceScanner::new(text)
        .map(|price_gp| DropRecord::new(now, price_gp))
        .collect();

    ImportOutcome {
        imported: records.len(),
        records,
    }
}
