use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::warn;

use crate::core::{AppError, RawAmount, Result};

/// Converts amounts of unknown representation into decimals.
///
/// Two policies are offered:
/// - [`AmountNormalizer::normalize`] never fails; anything it cannot read
///   (or a negative value) counts as zero. Used when aggregating stored
///   payments.
/// - [`AmountNormalizer::parse_strict`] rejects the same inputs with a
///   validation error. Used when a new payment is submitted.
pub struct AmountNormalizer;

impl AmountNormalizer {
    /// Lenient normalization: unreadable or negative amounts become zero
    pub fn normalize(amount: &RawAmount) -> Decimal {
        let parsed = match amount {
            RawAmount::Number(n) => Some(*n),
            RawAmount::Text(text) => Self::leading_number(&Self::clean(text)).map(|(n, _)| n),
        };

        match parsed {
            Some(n) if n.is_sign_negative() && !n.is_zero() => {
                warn!(amount = %amount, "Negative payment amount counted as zero");
                Decimal::ZERO
            }
            Some(n) => n,
            None => {
                warn!(amount = %amount, "Unparseable payment amount counted as zero");
                Decimal::ZERO
            }
        }
    }

    /// Strict parsing for user-entered amounts
    ///
    /// Accepts an optional leading minus sign and `$` prefix, digits with
    /// commas only as thousands separators, and at most one decimal point.
    /// Surrounding whitespace is ignored. The amount must not be negative.
    pub fn parse_strict(amount: &RawAmount) -> Result<Decimal> {
        let value = match amount {
            RawAmount::Number(n) => *n,
            RawAmount::Text(text) => Self::parse_formatted(text.trim()).ok_or_else(|| {
                AppError::validation(format!("Invalid amount format: '{}'", text))
            })?,
        };

        if value.is_sign_negative() && !value.is_zero() {
            return Err(AppError::validation(format!(
                "Amount cannot be negative: {}",
                value
            )));
        }

        Ok(value)
    }

    /// Parse `[-][$]digits[.digits]` (sign and `$` in either order)
    fn parse_formatted(text: &str) -> Option<Decimal> {
        let mut rest = text;
        let mut negative = false;
        let mut dollar = false;
        loop {
            if let Some(r) = rest.strip_prefix('-').filter(|_| !negative) {
                negative = true;
                rest = r;
            } else if let Some(r) = rest.strip_prefix('$').filter(|_| !dollar) {
                dollar = true;
                rest = r;
            } else {
                break;
            }
        }

        let (whole, fraction) = match rest.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (rest, None),
        };

        let digits = Self::grouped_digits(whole)?;
        let fraction = fraction.unwrap_or("");
        if !fraction.chars().all(|c| c.is_ascii_digit())
            || (digits.is_empty() && fraction.is_empty())
        {
            return None;
        }

        let mut canonical = String::with_capacity(digits.len() + fraction.len() + 3);
        if negative {
            canonical.push('-');
        }
        canonical.push_str(if digits.is_empty() { "0" } else { &digits });
        if !fraction.is_empty() {
            canonical.push('.');
            canonical.push_str(fraction);
        }

        Decimal::from_str(&canonical).ok()
    }

    /// Digits of an integer part, with commas allowed only between groups of
    /// three (`1,234,567`)
    fn grouped_digits(whole: &str) -> Option<String> {
        if !whole.contains(',') {
            return whole.chars().all(|c| c.is_ascii_digit()).then(|| whole.to_string());
        }

        let mut groups = whole.split(',');
        let head = groups.next()?;
        if head.is_empty() || head.len() > 3 || !head.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }

        let mut digits = head.to_string();
        for group in groups {
            if group.len() != 3 || !group.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            digits.push_str(group);
        }
        Some(digits)
    }

    /// Keep digits, decimal points and a minus sign that precedes every digit
    fn clean(text: &str) -> String {
        let mut cleaned = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '0'..='9' | '.' => cleaned.push(c),
                '-' if cleaned.is_empty() => cleaned.push(c),
                _ => {}
            }
        }
        cleaned
    }

    /// Parse the longest numeric prefix (`-?digits[.digits]`) of a cleaned string.
    ///
    /// Returns the value and the number of bytes consumed, or `None` when the
    /// prefix contains no digit or does not fit a decimal.
    fn leading_number(cleaned: &str) -> Option<(Decimal, usize)> {
        let bytes = cleaned.as_bytes();
        let mut pos = 0;
        let negative = bytes.first() == Some(&b'-');
        if negative {
            pos = 1;
        }

        let int_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        let int_part = &cleaned[int_start..pos];

        let mut frac_part = "";
        if pos < bytes.len() && bytes[pos] == b'.' {
            let frac_start = pos + 1;
            let mut end = frac_start;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
            frac_part = &cleaned[frac_start..end];
            pos = end;
        }

        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }

        let mut canonical = String::with_capacity(pos + 2);
        if negative {
            canonical.push('-');
        }
        canonical.push_str(if int_part.is_empty() { "0" } else { int_part });
        if !frac_part.is_empty() {
            canonical.push('.');
            canonical.push_str(frac_part);
        }

        Decimal::from_str(&canonical).ok().map(|n| (n, pos))
    }
}
