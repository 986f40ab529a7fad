//! Brazilian Real (BRL) amount parsing and formatting.
//!
//! Display strings use the pt-BR convention: `.` groups thousands, `,`
//! separates cents and the `R$` symbol is followed by a non-breaking space,
//! e.g. `"R$\u{a0}1.234,56"`.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Currency symbol prefix.
pub const CURRENCY_SYMBOL: &str = "R$";

/// Separator between the symbol and the amount (U+00A0).
pub const SYMBOL_SEPARATOR: char = '\u{a0}';

/// Longest digit run accepted by [`mask_amount_input`].
const MAX_MASK_DIGITS: usize = 26;

/// Round to cents, midpoint away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Parse a displayed amount such as `"R$ 1.234,56"` into a decimal.
///
/// Everything except digits, `,`, `.` and `-` is dropped, every `.` is
/// treated as a thousands separator and removed, and the first `,` becomes
/// the decimal point. The longest leading numeric prefix is then parsed,
/// so trailing junk is ignored (`"1,2,3"` parses as `1.2`).
///
/// Returns `None` when no number can be read; callers must check.
pub fn parse_amount(display: &str) -> Option<Decimal> {
    let kept: String = display
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .filter(|&c| c != '.')
        .collect();
    let normalized = kept.replacen(',', ".", 1);

    let mut prefix = String::with_capacity(normalized.len());
    let mut chars = normalized.chars().peekable();
    if chars.peek() == Some(&'-') {
        prefix.push('-');
        chars.next();
    }
    let mut int_digits = 0usize;
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        prefix.push(c);
        int_digits += 1;
        chars.next();
    }
    let mut frac = String::new();
    if chars.peek() == Some(&'.') {
        chars.next();
        while let Some(&c) = chars.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            frac.push(c);
            chars.next();
        }
    }

    if int_digits == 0 && frac.is_empty() {
        return None;
    }
    if int_digits == 0 {
        prefix.push('0');
    }
    if !frac.is_empty() {
        prefix.push('.');
        prefix.push_str(&frac);
    }

    Decimal::from_str(&prefix).ok()
}

/// Format an amount without the currency symbol: `1234.5` → `"1.234,50"`.
///
/// Always two decimals, rounded midpoint away from zero.
pub fn format_decimal_br(amount: Decimal) -> String {
    let rounded = round_money(amount);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let plain = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut out = String::with_capacity(plain.len() + int_part.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    out.push(',');
    out.push_str(frac_part);
    out
}

/// Format an amount for display: `1234.56` → `"R$\u{a0}1.234,56"`.
///
/// Negative amounts put the sign before the symbol (`"-R$\u{a0}5,00"`).
pub fn format_amount(amount: Decimal) -> String {
    let body = format_decimal_br(amount);
    match body.strip_prefix('-') {
        Some(abs) => format!("-{CURRENCY_SYMBOL}{SYMBOL_SEPARATOR}{abs}"),
        None => format!("{CURRENCY_SYMBOL}{SYMBOL_SEPARATOR}{body}"),
    }
}

/// Live mask for a currency text input.
///
/// Typed digits are read as cents, so `"123456"` becomes `"1.234,56"` and
/// an input without digits becomes `"0,00"`.
pub fn mask_amount_input(typed: &str) -> String {
    let digits: String = typed
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(MAX_MASK_DIGITS)
        .collect();
    let cents = Decimal::from_str(&digits).unwrap_or(Decimal::ZERO);
    format_decimal_br(cents / Decimal::ONE_HUNDRED)
}

fn group_thousands(int_part: &str) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}
