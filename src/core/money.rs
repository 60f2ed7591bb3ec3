use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Amounts are tracked and displayed in whole cents
pub const CENTS_SCALE: u32 = 2;

/// Rounds a decimal value to cents
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp(CENTS_SCALE)
}

/// Formats an amount as dollars with grouping separators, e.g. `$1,200.00`
pub fn format_usd(amount: Decimal) -> String {
    let rounded = round_cents(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{}${}.{}", sign, grouped, fraction)
}

/// Formats a percentage with one decimal place, e.g. `40.0%`
pub fn format_percent(percent: Decimal) -> String {
    format!("{:.1}%", percent.round_dp(1))
}

/// An amount as it arrives from a record store or a form field.
///
/// The hosted store hands back numbers, the UI hands back display strings
/// such as `"$1,200.00"`. Both are accepted and normalized later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawAmount {
    Number(Decimal),
    Text(String),
}

impl fmt::Display for RawAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawAmount::Number(n) => write!(f, "{}", n),
            RawAmount::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<Decimal> for RawAmount {
    fn from(value: Decimal) -> Self {
        RawAmount::Number(value)
    }
}

impl From<i64> for RawAmount {
    fn from(value: i64) -> Self {
        RawAmount::Number(Decimal::from(value))
    }
}

impl From<&str> for RawAmount {
    fn from(value: &str) -> Self {
        RawAmount::Text(value.to_string())
    }
}

impl From<String> for RawAmount {
    fn from(value: String) -> Self {
        RawAmount::Text(value)
    }
}

impl Serialize for RawAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            RawAmount::Number(n) => Serialize::serialize(n, serializer),
            RawAmount::Text(s) => serializer.serialize_str(s),
        }
    }
}

struct RawAmountVisitor;

impl<'de> Visitor<'de> for RawAmountVisitor {
    type Value = RawAmount;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number or a currency-formatted string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<RawAmount, E> {
        Ok(RawAmount::Number(Decimal::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<RawAmount, E> {
        Ok(RawAmount::Number(Decimal::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<RawAmount, E> {
        // Go through the shortest round-trip text so 399.99 stays 399.99
        let text = v.to_string();
        match Decimal::from_str(&text).or_else(|_| Decimal::from_scientific(&text)) {
            Ok(n) => Ok(RawAmount::Number(n)),
            Err(_) => Ok(RawAmount::Text(text)),
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<RawAmount, E> {
        Ok(RawAmount::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<RawAmount, E> {
        Ok(RawAmount::Text(v))
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<RawAmount, E> {
        Ok(RawAmount::Text(String::new()))
    }
}

impl<'de> Deserialize<'de> for RawAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(RawAmountVisitor)
    }
}
