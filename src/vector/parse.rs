use std::collections::BTreeMap;

use super::types::SparseVector;
use super::DimIndex;

/// Parse one input line into a sparse vector.
///
/// A line is a sequence of `<index>:<value>` tokens separated by single ASCII
/// spaces. Empty tokens (doubled or trailing spaces) are skipped. Numeric
/// parsing is deliberately permissive: each part contributes its longest
/// numeric prefix and falls back to 0 on failure, so a malformed token is
/// never an error. A repeated index keeps the first-seen value.
pub fn parse_line(line: &str) -> SparseVector {
    let mut entries: BTreeMap<DimIndex, f32> = BTreeMap::new();

    for token in line.split(' ') {
        if token.is_empty() {
            continue;
        }
        // The first `:` splits index from value; with no delimiter the whole
        // token serves as both parts.
        let (index_part, value_part) = token.split_once(':').unwrap_or((token, token));
        entries
            .entry(parse_index(index_part))
            .or_insert_with(|| parse_weight(value_part));
    }

    SparseVector::from_sorted_entries(entries.into_iter().collect())
}

/// Longest leading run of ASCII digits, `atoi`-style: leading whitespace and
/// an optional `+` are skipped, and a token with no leading digits is 0.
/// Oversized indices saturate rather than wrap.
fn parse_index(token: &str) -> DimIndex {
    let token = token.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let token = token.strip_prefix('+').unwrap_or(token);
    token
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0, |acc: DimIndex, digit| {
            acc.saturating_mul(10).saturating_add((digit - b'0') as DimIndex)
        })
}

/// Longest leading prefix that reads as a decimal floating-point number,
/// `atof`-style: optional sign, digits, fraction, exponent. A token with no
/// numeric prefix is 0.0.
fn parse_weight(token: &str) -> f32 {
    let token = token.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let bytes = token.as_bytes();
    let mut end = 0;

    if matches!(bytes.first().copied(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let mut saw_digit = false;
    while bytes.get(end).is_some_and(|b| b.is_ascii_digit()) {
        end += 1;
        saw_digit = true;
    }
    if bytes.get(end) == Some(&b'.') {
        end += 1;
        while bytes.get(end).is_some_and(|b| b.is_ascii_digit()) {
            end += 1;
            saw_digit = true;
        }
    }
    if !saw_digit {
        return 0.0;
    }
    // An exponent only counts if at least one digit follows the marker;
    // otherwise the prefix stops at the mantissa.
    if matches!(bytes.get(end).copied(), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end).copied(), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        if bytes.get(exp_end).is_some_and(|b| b.is_ascii_digit()) {
            while bytes.get(exp_end).is_some_and(|b| b.is_ascii_digit()) {
                exp_end += 1;
            }
            end = exp_end;
        }
    }

    token[..end].parse().unwrap_or(0.0)
}
