//! Amounts written out in Brazilian Portuguese ("valor por extenso").
//!
//! Contracting documents state the estimated value both in digits and in
//! words; [`validate_monetary_value`] checks that the two agree.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use super::error::ValidationError;
use super::money::round_money;

const UNITS: [&str; 20] = [
    "zero",
    "um",
    "dois",
    "três",
    "quatro",
    "cinco",
    "seis",
    "sete",
    "oito",
    "nove",
    "dez",
    "onze",
    "doze",
    "treze",
    "quatorze",
    "quinze",
    "dezesseis",
    "dezessete",
    "dezoito",
    "dezenove",
];

const TENS: [&str; 10] = [
    "", "", "vinte", "trinta", "quarenta", "cinquenta", "sessenta", "setenta", "oitenta", "noventa",
];

const HUNDREDS: [&str; 10] = [
    "",
    "cento",
    "duzentos",
    "trezentos",
    "quatrocentos",
    "quinhentos",
    "seiscentos",
    "setecentos",
    "oitocentos",
    "novecentos",
];

/// (singular, plural) per thousand-group, starting at millions.
const SCALES: [(&str, &str); 3] = [
    ("milhão", "milhões"),
    ("bilhão", "bilhões"),
    ("trilhão", "trilhões"),
];

/// Exclusive upper bound for [`amount_in_words`].
const MAX_INTEGER: u64 = 1_000_000_000_000_000;

fn below_thousand(n: u64) -> String {
    debug_assert!(n < 1000);
    if n == 100 {
        return "cem".into();
    }
    let h = (n / 100) as usize;
    let rest = n % 100;
    let mut parts: Vec<String> = Vec::with_capacity(3);
    if h > 0 {
        parts.push(HUNDREDS[h].into());
    }
    if rest > 0 {
        if rest < 20 {
            parts.push(UNITS[rest as usize].into());
        } else {
            let t = (rest / 10) as usize;
            let u = (rest % 10) as usize;
            parts.push(TENS[t].into());
            if u > 0 {
                parts.push(UNITS[u].into());
            }
        }
    }
    parts.join(" e ")
}

/// Cardinal number in words, `0 <= n < 10^15`.
fn integer_in_words(n: u64) -> String {
    if n == 0 {
        return UNITS[0].into();
    }

    let mut groups = Vec::with_capacity(5);
    let mut rest = n;
    while rest > 0 {
        groups.push(rest % 1000);
        rest /= 1000;
    }

    // (words, group value) from the highest group down
    let mut parts: Vec<(String, u64)> = Vec::new();
    for (scale, &g) in groups.iter().enumerate().rev() {
        if g == 0 {
            continue;
        }
        let words = match scale {
            0 => below_thousand(g),
            1 if g == 1 => "mil".into(),
            1 => format!("{} mil", below_thousand(g)),
            s => {
                let (singular, plural) = SCALES[s - 2];
                let name = if g == 1 { singular } else { plural };
                format!("{} {}", below_thousand(g), name)
            }
        };
        parts.push((words, g));
    }

    let mut out = String::new();
    let last = parts.len() - 1;
    for (i, (words, g)) in parts.iter().enumerate() {
        if i > 0 {
            // "mil e cem", "dois mil e vinte", but "mil duzentos e trinta"
            if i == last && (*g < 100 || g % 100 == 0) {
                out.push_str(" e ");
            } else {
                out.push(' ');
            }
        }
        out.push_str(words);
    }
    out
}

/// Write a BRL amount out in words.
///
/// `1234.56` → `"mil duzentos e trinta e quatro reais e cinquenta e seis
/// centavos"`. Amounts are rounded to cents first. Returns `None` for
/// negative amounts and for amounts of a quadrillion reais or more.
pub fn amount_in_words(amount: Decimal) -> Option<String> {
    let rounded = round_money(amount);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        return None;
    }
    let integer = rounded.trunc().to_u64()?;
    if integer >= MAX_INTEGER {
        return None;
    }
    let cents = ((rounded - rounded.trunc()) * Decimal::ONE_HUNDRED).to_u64()?;

    let reais = if integer == 1 {
        "um real".to_string()
    } else if integer >= 1_000_000 && integer % 1_000_000 == 0 {
        format!("{} de reais", integer_in_words(integer))
    } else {
        format!("{} reais", integer_in_words(integer))
    };

    let centavos = match cents {
        0 => None,
        1 => Some("um centavo".to_string()),
        c => Some(format!("{} centavos", integer_in_words(c))),
    };

    Some(match centavos {
        None => reais,
        Some(c) if integer == 0 => c,
        Some(c) => format!("{reais} e {c}"),
    })
}

/// Lowercase, drop accents and punctuation, collapse whitespace.
fn normalize_words(s: &str) -> String {
    let folded: String = s
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' => 'a',
            'é' | 'ê' => 'e',
            'í' => 'i',
            'ó' | 'ô' | 'õ' => 'o',
            'ú' | 'ü' => 'u',
            'ç' => 'c',
            ',' | '.' | ';' | '-' | '(' | ')' => ' ',
            other => other,
        })
        .collect();
    folded
        .split_whitespace()
        .map(|w| if w == "catorze" { "quatorze" } else { w })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Check that a numeric amount and its written form agree.
///
/// Accents, case, punctuation and the "catorze"/"quatorze" spelling are
/// ignored in the comparison.
pub fn validate_monetary_value(amount: Decimal, written: &str) -> Result<(), ValidationError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ValidationError::new("amount", "Valor numérico inválido"));
    }
    if written.trim().is_empty() {
        return Err(ValidationError::new(
            "written",
            "Valor por extenso não pode estar vazio",
        ));
    }
    let Some(expected) = amount_in_words(amount) else {
        return Err(ValidationError::new(
            "amount",
            "Valor fora do intervalo suportado",
        ));
    };
    if normalize_words(&expected) != normalize_words(written) {
        return Err(ValidationError::new(
            "written",
            format!("Valor por extenso não confere com o valor numérico (esperado: {expected})"),
        ));
    }
    Ok(())
}
