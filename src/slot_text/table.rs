// SPDX-License-Identifier: MPL-2.0
//! Authored block table parsing.
//!
//! Authors configure the block as a two-column table: a key cell and a
//! value cell per row. Unknown keys and short rows are ignored.

use crate::domain::slot::SlotConfig;

/// Parses table rows (cell texts, in order) into a slot configuration.
#[must_use]
pub fn parse_slot_table<R: AsRef<[String]>>(rows: &[R]) -> SlotConfig {
    let mut config = SlotConfig::default();

    for row in rows {
        let [key, value, ..] = row.as_ref() else {
            continue;
        };
        let value = value.trim();

        match key.trim().to_lowercase().as_str() {
            "prefix" => config.prefix = value.to_owned(),
            "slot" => {
                config.items = value
                    .split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(str::to_owned)
                    .collect();
            }
            "total-animation-duration" => {
                if let Some(ms) = parse_leading_millis(value) {
                    config.total_duration_ms = Some(ms);
                }
            }
            "initial-wait" => {
                if let Some(ms) = parse_leading_millis(value) {
                    config.initial_wait_ms = Some(ms);
                }
            }
            "prefix-color" => config.prefix_color = Some(value.to_owned()),
            "slot-color" => config.slot_color = Some(value.to_owned()),
            _ => {}
        }
    }

    config
}

/// Reads the leading run of digits (`"1500ms"` → 1500).
///
/// Negative or digit-less values yield `None`.
fn parse_leading_millis(value: &str) -> Option<u64> {
    let digits = value.strip_prefix('+').unwrap_or(value);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(key: &str, value: &str) -> Vec<String> {
        vec![key.to_owned(), value.to_owned()]
    }

    #[test]
    fn parses_all_known_keys() {
        let rows = vec![
            row("Prefix", " Make it "),
            row("SLOT", "Bold., Bright , ,Yours"),
            row("total-animation-duration", "9000"),
            row("initial-wait", "250ms"),
            row("prefix-color", "#222"),
            row("slot-color", "#0a0"),
        ];
        let config = parse_slot_table(&rows);
        assert_eq!(config.prefix, "Make it");
        assert_eq!(config.items, vec!["Bold.", "Bright", "Yours"]);
        assert_eq!(config.total_duration_ms, Some(9000));
        assert_eq!(config.initial_wait_ms, Some(250));
        assert_eq!(config.prefix_color.as_deref(), Some("#222"));
        assert_eq!(config.slot_color.as_deref(), Some("#0a0"));
    }

    #[test]
    fn invalid_numbers_are_ignored() {
        let rows = vec![
            row("total-animation-duration", "fast"),
            row("initial-wait", "-100"),
        ];
        let config = parse_slot_table(&rows);
        assert_eq!(config.total_duration_ms, None);
        assert_eq!(config.initial_wait_ms, None);
    }

    #[test]
    fn short_rows_and_unknown_keys_are_skipped() {
        let rows = vec![
            vec!["slot".to_owned()],
            row("colour", "red"),
            vec!["slot".to_owned(), "A,B".to_owned(), "extra".to_owned()],
        ];
        let config = parse_slot_table(&rows);
        assert_eq!(config.items, vec!["A", "B"]);
        assert!(config.prefix_color.is_none());
    }

    #[test]
    fn later_rows_override_earlier_ones() {
        let rows = vec![row("slot", "A"), row("slot", "B,C")];
        assert_eq!(parse_slot_table(&rows).items, vec!["B", "C"]);
    }

    #[test]
    fn leading_integer_parse() {
        assert_eq!(parse_leading_millis("1500"), Some(1500));
        assert_eq!(parse_leading_millis("+20s"), Some(20));
        assert_eq!(parse_leading_millis("0"), Some(0));
        assert_eq!(parse_leading_millis(""), None);
        assert_eq!(parse_leading_millis("ms"), None);
    }
}
