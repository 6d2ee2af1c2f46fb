use once_cell::sync::Lazy;
use regex::Regex;
use std::time::{SystemTime, UNIX_EPOCH};

// Display and parsing helpers for the pt-BR locale (BRL currency, dd/mm/yyyy dates).
pub mod brazilian_format {
    use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

    const NBSP: char = '\u{a0}';
    const INVALID_DATE: &str = "Invalid Date";

    /// Formats a value as Brazilian currency, e.g. `R$ 1.234,56`.
    ///
    /// The space after the symbol is a non-breaking space, matching what
    /// browsers produce for the `pt-BR`/`BRL` pair.
    pub fn format_money(value: f64) -> String {
        let sign = if value < 0.0 { "-" } else { "" };
        if value.is_nan() {
            return format!("R${}NaN", NBSP);
        }
        if value.is_infinite() {
            return format!("{}R${}∞", sign, NBSP);
        }
        let (units, cents) = round_decimal(value, 2);
        format!("{}R${}{},{}", sign, NBSP, group_thousands(&units), cents)
    }

    /// Thousands-grouped number with up to three fraction digits: `1.234.567,891`.
    pub fn format_number(value: f64) -> String {
        let sign = if value < 0.0 { "-" } else { "" };
        if value.is_nan() {
            return "NaN".to_string();
        }
        if value.is_infinite() {
            return format!("{}∞", sign);
        }
        let (units, fraction) = round_decimal(value, 3);
        let fraction = fraction.trim_end_matches('0');
        if fraction.is_empty() {
            format!("{}{}", sign, group_thousands(&units))
        } else {
            format!("{}{},{}", sign, group_thousands(&units), fraction)
        }
    }

    /// `dd/mm/yyyy`. Unparseable text yields `Invalid Date`.
    pub fn format_date<'a>(date: impl Into<DateInput<'a>>) -> String {
        match date.into().resolve() {
            Some(dt) => dt.format("%d/%m/%Y").to_string(),
            None => INVALID_DATE.to_string(),
        }
    }

    /// `dd/mm/yyyy, HH:MM` (24h clock).
    pub fn format_date_time<'a>(date: impl Into<DateInput<'a>>) -> String {
        match date.into().resolve() {
            Some(dt) => dt.format("%d/%m/%Y, %H:%M").to_string(),
            None => INVALID_DATE.to_string(),
        }
    }

    /// Either a date value or text to be parsed leniently.
    ///
    /// Timezone-aware values are shown in local time.
    #[derive(Debug, Clone, PartialEq)]
    pub enum DateInput<'a> {
        Value(NaiveDateTime),
        Text(&'a str),
    }

    impl DateInput<'_> {
        fn resolve(&self) -> Option<NaiveDateTime> {
            match self {
                DateInput::Value(dt) => Some(*dt),
                DateInput::Text(text) => parse_date_text(text),
            }
        }
    }

    impl From<NaiveDateTime> for DateInput<'_> {
        fn from(value: NaiveDateTime) -> Self {
            DateInput::Value(value)
        }
    }

    impl From<NaiveDate> for DateInput<'_> {
        fn from(value: NaiveDate) -> Self {
            DateInput::Value(value.and_time(NaiveTime::MIN))
        }
    }

    impl<Tz: TimeZone> From<DateTime<Tz>> for DateInput<'_> {
        fn from(value: DateTime<Tz>) -> Self {
            DateInput::Value(value.with_timezone(&Local).naive_local())
        }
    }

    impl<'a> From<&'a str> for DateInput<'a> {
        fn from(value: &'a str) -> Self {
            DateInput::Text(value)
        }
    }

    impl<'a> From<&'a String> for DateInput<'a> {
        fn from(value: &'a String) -> Self {
            DateInput::Text(value.as_str())
        }
    }

    const DATE_TIME_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
    ];

    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

    fn parse_date_text(text: &str) -> Option<NaiveDateTime> {
        let text = text.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Some(dt.with_timezone(&Local).naive_local());
        }
        if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
            return Some(dt.with_timezone(&Local).naive_local());
        }
        DATE_TIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
            .or_else(|| {
                DATE_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                    .map(|date| date.and_time(NaiveTime::MIN))
            })
    }

    /// Rounds `|value|` to `places` fraction digits, half away from zero,
    /// working on its shortest decimal form (`1.005` rounds up to `1.01`).
    /// Returns the integer digits and exactly `places` fraction digits.
    fn round_decimal(value: f64, places: usize) -> (String, String) {
        let repr = format!("{}", value.abs());
        let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));
        let mut digits: Vec<u8> = int_part
            .bytes()
            .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(places))
            .collect();

        if frac_part.as_bytes().get(places).is_some_and(|d| *d >= b'5') {
            let mut i = digits.len();
            loop {
                if i == 0 {
                    digits.insert(0, b'1');
                    break;
                }
                i -= 1;
                if digits[i] == b'9' {
                    digits[i] = b'0';
                } else {
                    digits[i] += 1;
                    break;
                }
            }
        }

        let (units, fraction) = digits.split_at(digits.len() - places);
        (
            String::from_utf8_lossy(units).into_owned(),
            String::from_utf8_lossy(fraction).into_owned(),
        )
    }

    fn group_thousands(digits: &str) -> String {
        let len = digits.len();
        let mut out = String::with_capacity(len + len / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push('.');
            }
            out.push(ch);
        }
        out
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_format_money() {
            assert_eq!(format_money(1234.56), "R$\u{a0}1.234,56");
            assert_eq!(format_money(0.0), "R$\u{a0}0,00");
            assert_eq!(format_money(4.5), "R$\u{a0}4,50");
            assert_eq!(format_money(1_000_000.0), "R$\u{a0}1.000.000,00");
            assert_eq!(format_money(-12.3), "-R$\u{a0}12,30");
            assert_eq!(format_money(0.999), "R$\u{a0}1,00");
        }

        #[test]
        fn test_format_money_rounds_half_cents_up() {
            assert_eq!(format_money(0.145), "R$\u{a0}0,15");
            assert_eq!(format_money(1.005), "R$\u{a0}1,01");
            assert_eq!(format_money(2.675), "R$\u{a0}2,68");
            assert_eq!(format_money(-1.005), "-R$\u{a0}1,01");
            assert_eq!(format_money(9.995), "R$\u{a0}10,00");
            assert_eq!(format_money(0.144), "R$\u{a0}0,14");
        }

        #[test]
        fn test_format_money_large_values_have_no_float_noise() {
            assert_eq!(format_money(1e21), "R$\u{a0}1.000.000.000.000.000.000.000,00");
            assert_eq!(format_money(123_456_789_012.34), "R$\u{a0}123.456.789.012,34");
        }

        #[test]
        fn test_format_number() {
            assert_eq!(format_number(1234.0), "1.234");
            assert_eq!(format_number(1234567.891), "1.234.567,891");
            assert_eq!(format_number(1234.5), "1.234,5");
            assert_eq!(format_number(999.0), "999");
            assert_eq!(format_number(0.12345), "0,123");
            assert_eq!(format_number(-2500.0), "-2.500");
        }

        #[test]
        fn test_format_number_rounds_on_decimal_digits() {
            assert_eq!(format_number(1.0005), "1,001");
            assert_eq!(format_number(0.9995), "1");
            assert_eq!(format_number(1e21), "1.000.000.000.000.000.000.000");
            assert_eq!(format_number(0.0001), "0");
        }

        #[test]
        fn test_format_date_from_value() {
            let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
            assert_eq!(format_date(date), "07/03/2024");
        }

        #[test]
        fn test_format_date_from_text() {
            assert_eq!(format_date("2024-12-30"), "30/12/2024");
            assert_eq!(format_date("2024-12-30T18:20:00"), "30/12/2024");
        }

        #[test]
        fn test_format_date_time() {
            let dt = NaiveDate::from_ymd_opt(2024, 12, 30)
                .unwrap()
                .and_hms_opt(8, 5, 59)
                .unwrap();
            assert_eq!(format_date_time(dt), "30/12/2024, 08:05");
            assert_eq!(format_date_time("2024-01-02 23:45:10"), "02/01/2024, 23:45");
        }

        #[test]
        fn test_format_date_invalid_text() {
            assert_eq!(format_date("not a date"), "Invalid Date");
            assert_eq!(format_date_time("32/13/2024"), "Invalid Date");
        }
    }
}

static NON_SLUG_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_\s-]").expect("slug pattern is valid"));
static SLUG_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s_-]+").expect("slug pattern is valid"));

/// URL-friendly slug: lower-case ASCII word characters joined by single hyphens.
///
/// Characters outside `[A-Za-z0-9_]`, whitespace and `-` are dropped, so
/// accented letters disappear rather than being transliterated.
pub fn string_to_slug(input: &str) -> String {
    let lowered = input.to_lowercase();
    let stripped = NON_SLUG_CHARS.replace_all(lowered.trim(), "");
    let joined = SLUG_SEPARATORS.replace_all(&stripped, "-");
    joined.trim_matches('-').to_string()
}

/// Base-36 timestamp followed by a base-36 random fragment.
///
/// Collisions are unlikely but not impossible when called in a tight loop.
pub fn generate_unique_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();
    let mut fragment = to_base36(rand::random::<u64>());
    fragment.truncate(11);
    format!("{}{}", to_base36(millis), fragment)
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
