//! CPF/CNPJ check-digit validation, formatting and input masks.
//!
//! Every function here is total: malformed or partially typed input yields
//! `false` or a pass-through string, never a panic or an error. Form layers
//! call these on every keystroke.

use serde::{Deserialize, Serialize};
use std::fmt;

/// CPF length in digits.
pub const CPF_LEN: usize = 11;

/// CNPJ length in digits.
pub const CNPJ_LEN: usize = 14;

const CNPJ_WEIGHTS_1: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const CNPJ_WEIGHTS_2: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Remove every character that is not an ASCII digit.
pub fn sanitize(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn digit_values(sanitized: &str) -> Vec<u32> {
    sanitized.bytes().map(|b| u32::from(b - b'0')).collect()
}

fn all_same(digits: &[u32]) -> bool {
    digits.windows(2).all(|w| w[0] == w[1])
}

fn weighted_sum(digits: &[u32], weights: &[u32]) -> u32 {
    digits.iter().zip(weights).map(|(d, w)| d * w).sum()
}

/// CPF rule: `11 - sum % 11`, collapsing 10 and 11 to 0.
fn cpf_digit(sum: u32) -> u32 {
    let d = 11 - (sum % 11);
    if d >= 10 { 0 } else { d }
}

/// CNPJ rule: remainders 0 and 1 give 0, otherwise `11 - remainder`.
fn cnpj_digit(sum: u32) -> u32 {
    let r = sum % 11;
    if r < 2 { 0 } else { 11 - r }
}

/// Validate an individual taxpayer number (CPF) with the modulo-11 check.
///
/// Punctuation is ignored; the input must contain exactly 11 digits that are
/// not all identical.
pub fn is_valid_cpf(input: &str) -> bool {
    let sanitized = sanitize(input);
    if sanitized.len() != CPF_LEN {
        return false;
    }
    let d = digit_values(&sanitized);
    if all_same(&d) {
        return false;
    }

    // weights 10..2 over digits 0..8, then 11..2 over digits 0..9
    let w1: Vec<u32> = (2..=10).rev().collect();
    let w2: Vec<u32> = (2..=11).rev().collect();
    let d1 = cpf_digit(weighted_sum(&d[..9], &w1));
    let d2 = cpf_digit(weighted_sum(&d[..10], &w2));

    d[9] == d1 && d[10] == d2
}

/// Validate an entity taxpayer number (CNPJ) with the modulo-11 check.
pub fn is_valid_cnpj(input: &str) -> bool {
    let sanitized = sanitize(input);
    if sanitized.len() != CNPJ_LEN {
        return false;
    }
    let d = digit_values(&sanitized);
    if all_same(&d) {
        return false;
    }

    let d1 = cnpj_digit(weighted_sum(&d[..12], &CNPJ_WEIGHTS_1));
    let d2 = cnpj_digit(weighted_sum(&d[..13], &CNPJ_WEIGHTS_2));

    d[12] == d1 && d[13] == d2
}

/// Validate either a CPF or a CNPJ, chosen by the sanitized length.
pub fn is_valid_document(input: &str) -> bool {
    match sanitize(input).len() {
        CPF_LEN => is_valid_cpf(input),
        CNPJ_LEN => is_valid_cnpj(input),
        _ => false,
    }
}

/// Compute the two CPF check digits for a 9-digit base.
pub fn cpf_check_digits(base: &[u8; 9]) -> [u8; 2] {
    let mut d: Vec<u32> = base.iter().map(|&b| u32::from(b % 10)).collect();
    let w1: Vec<u32> = (2..=10).rev().collect();
    let d1 = cpf_digit(weighted_sum(&d, &w1));
    d.push(d1);
    let w2: Vec<u32> = (2..=11).rev().collect();
    let d2 = cpf_digit(weighted_sum(&d, &w2));
    [d1 as u8, d2 as u8]
}

/// Compute the two CNPJ check digits for a 12-digit base.
pub fn cnpj_check_digits(base: &[u8; 12]) -> [u8; 2] {
    let mut d: Vec<u32> = base.iter().map(|&b| u32::from(b % 10)).collect();
    let d1 = cnpj_digit(weighted_sum(&d, &CNPJ_WEIGHTS_1));
    d.push(d1);
    let d2 = cnpj_digit(weighted_sum(&d, &CNPJ_WEIGHTS_2));
    [d1 as u8, d2 as u8]
}

/// Format a CPF as `XXX.XXX.XXX-XX`.
///
/// Input that does not sanitize to exactly 11 digits is returned unchanged.
pub fn format_cpf(input: &str) -> String {
    let s = sanitize(input);
    if s.len() != CPF_LEN {
        return input.to_string();
    }
    format!("{}.{}.{}-{}", &s[..3], &s[3..6], &s[6..9], &s[9..])
}

/// Format a CNPJ as `XX.XXX.XXX/XXXX-XX`.
///
/// Input that does not sanitize to exactly 14 digits is returned unchanged.
pub fn format_cnpj(input: &str) -> String {
    let s = sanitize(input);
    if s.len() != CNPJ_LEN {
        return input.to_string();
    }
    format!(
        "{}.{}.{}/{}-{}",
        &s[..2],
        &s[2..5],
        &s[5..8],
        &s[8..12],
        &s[12..]
    )
}

/// Format a CPF or CNPJ depending on its sanitized length; anything else
/// passes through unchanged.
pub fn format_document(input: &str) -> String {
    match sanitize(input).len() {
        CPF_LEN => format_cpf(input),
        CNPJ_LEN => format_cnpj(input),
        _ => input.to_string(),
    }
}

/// Progressive CPF mask for live typing.
///
/// Keeps at most 11 digits and inserts separators as soon as the digits
/// that follow them exist: `"1234"` → `"123.4"`, `"1234567890"` →
/// `"123.456.789-0"`.
pub fn mask_cpf(input: &str) -> String {
    let s: String = sanitize(input).chars().take(CPF_LEN).collect();
    match s.len() {
        0..=3 => s,
        4..=6 => format!("{}.{}", &s[..3], &s[3..]),
        7..=9 => format!("{}.{}.{}", &s[..3], &s[3..6], &s[6..]),
        _ => format!("{}.{}.{}-{}", &s[..3], &s[3..6], &s[6..9], &s[9..]),
    }
}

/// Which kind of fiscal identifier a value holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    /// Cadastro de Pessoas Físicas: individual, 11 digits.
    Cpf,
    /// Cadastro Nacional da Pessoa Jurídica: entity, 14 digits.
    Cnpj,
}

impl DocumentKind {
    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cpf => "CPF",
            Self::Cnpj => "CNPJ",
        }
    }
}

/// Error returned when a value is not a valid CPF or CNPJ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentError {
    /// The rejected input.
    pub value: String,
    /// Why it was rejected.
    pub reason: String,
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid fiscal document '{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for DocumentError {}

/// A checked CPF or CNPJ, stored as bare digits.
///
/// Serializes as the digit string (the form persisted by the backend) and
/// displays in the formatted mask.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FiscalDocument {
    kind: DocumentKind,
    digits: String,
}

impl FiscalDocument {
    /// Parse and validate a CPF or CNPJ in any punctuation.
    pub fn parse(input: &str) -> Result<Self, DocumentError> {
        let digits = sanitize(input);
        let kind = match digits.len() {
            CPF_LEN => DocumentKind::Cpf,
            CNPJ_LEN => DocumentKind::Cnpj,
            n => {
                return Err(DocumentError {
                    value: input.into(),
                    reason: format!("expected 11 (CPF) or 14 (CNPJ) digits, got {n}"),
                });
            }
        };
        let valid = match kind {
            DocumentKind::Cpf => is_valid_cpf(&digits),
            DocumentKind::Cnpj => is_valid_cnpj(&digits),
        };
        if !valid {
            return Err(DocumentError {
                value: input.into(),
                reason: format!("{} check digits do not match", kind.label()),
            });
        }
        Ok(Self { kind, digits })
    }

    /// Parse a value that must be a CPF.
    pub fn parse_cpf(input: &str) -> Result<Self, DocumentError> {
        let doc = Self::parse(input)?;
        if doc.kind != DocumentKind::Cpf {
            return Err(DocumentError {
                value: input.into(),
                reason: "expected a CPF, got a CNPJ".into(),
            });
        }
        Ok(doc)
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Bare digits, no punctuation.
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Formatted representation.
    pub fn formatted(&self) -> String {
        format_document(&self.digits)
    }
}

impl fmt::Display for FiscalDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl std::str::FromStr for FiscalDocument {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for FiscalDocument {
    type Error = DocumentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<FiscalDocument> for String {
    fn from(doc: FiscalDocument) -> Self {
        doc.digits
    }
}
