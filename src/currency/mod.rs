use std::fmt;

use serde::{Deserialize, Serialize};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("USD")
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Separators used when rendering numbers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocaleConfig {
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            decimal_separator: '.',
            grouping_separator: ',',
        }
    }
}

impl LocaleConfig {
    /// Picks separators for a BCP 47 language tag, falling back to `en-US` rules.
    pub fn for_tag(tag: &str) -> Self {
        let language = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match language.as_str() {
            "de" | "es" | "it" | "nl" | "pt" | "id" | "tr" => Self {
                decimal_separator: ',',
                grouping_separator: '.',
            },
            "fr" | "sv" | "nb" | "fi" | "pl" | "cs" => Self {
                decimal_separator: ',',
                grouping_separator: ' ',
            },
            _ => Self::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum NegativeStyle {
    #[default]
    Sign,
    Parentheses,
}

/// Everything needed to turn an amount into display text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MoneyFormat {
    pub currency: CurrencyCode,
    pub locale: LocaleConfig,
    pub negative_style: NegativeStyle,
}

impl MoneyFormat {
    pub fn new(currency: CurrencyCode, locale: LocaleConfig) -> Self {
        Self {
            currency,
            locale,
            negative_style: NegativeStyle::Sign,
        }
    }

    pub fn format(&self, amount: f64) -> String {
        format_currency_value(amount, &self.currency, &self.locale, self.negative_style)
    }
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        "INR" => "₹".into(),
        "AUD" => "A$".into(),
        "CAD" => "CA$".into(),
        _ => format!("{code} "),
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "JPY" | "KRW" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

pub fn format_currency_value(
    amount: f64,
    code: &CurrencyCode,
    locale: &LocaleConfig,
    negative_style: NegativeStyle,
) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let precision = minor_units_for(code.as_str());
    let digits = format_number(locale, amount.abs(), precision);
    // Amounts that round to zero never carry a sign.
    let negative = amount < 0.0 && digits != format_number(locale, 0.0, precision);
    let body = format!("{}{digits}", symbol_for(code.as_str()));
    match (negative, negative_style) {
        (false, _) => body,
        (true, NegativeStyle::Sign) => format!("-{body}"),
        (true, NegativeStyle::Parentheses) => format!("({body})"),
    }
}

pub fn format_number(locale: &LocaleConfig, value: f64, precision: u8) -> String {
    let rendered = format!("{:.*}", precision as usize, value);
    let (int_part, fraction) = match rendered.split_once('.') {
        Some((int_part, fraction)) => (int_part, Some(fraction)),
        None => (rendered.as_str(), None),
    };
    let grouped = group_digits(int_part, locale.grouping_separator);
    match fraction {
        Some(fraction) => format!("{grouped}{}{fraction}", locale.decimal_separator),
        None => grouped,
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx != 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_dollars_with_grouping() {
        let money = MoneyFormat::default();
        assert_eq!(money.format(1234.5), "$1,234.50");
        assert_eq!(money.format(40.0), "$40.00");
        assert_eq!(money.format(0.0), "$0.00");
    }

    #[test]
    fn formats_negative_and_locale_variants() {
        let euro = MoneyFormat {
            currency: CurrencyCode::new("eur"),
            locale: LocaleConfig::for_tag("de-DE"),
            negative_style: NegativeStyle::Parentheses,
        };
        assert_eq!(euro.format(-1234567.891), "(€1.234.567,89)");
        let yen = MoneyFormat::new(CurrencyCode::new("JPY"), LocaleConfig::default());
        assert_eq!(yen.format(1500.0), "¥1,500");
    }

    #[test]
    fn tiny_negatives_do_not_render_a_sign() {
        assert_eq!(MoneyFormat::default().format(-0.001), "$0.00");
        assert_eq!(MoneyFormat::default().format(f64::NAN), "$0.00");
    }
}
