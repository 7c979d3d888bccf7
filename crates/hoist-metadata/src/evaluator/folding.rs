//! Constant folding over primitive metadata values.
//!
//! Operators follow JavaScript semantics so folded metadata matches what the
//! expression would produce at runtime.

use crate::schema::{MetadataValue, number_to_string};
use hoist_scanner::SyntaxKind;

pub(crate) fn to_number(value: &MetadataValue) -> f64 {
    match value {
        MetadataValue::Null => 0.0,
        MetadataValue::Bool(value) => f64::from(u8::from(*value)),
        MetadataValue::Number(value) => *value,
        MetadataValue::String(text) => string_to_number(text),
        _ => f64::NAN,
    }
}

fn string_to_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        return u64::from_str_radix(hex, 16).map_or(f64::NAN, |n| n as f64);
    }
    // Rust also accepts `inf` and `nan`, JavaScript does not.
    if trimmed
        .bytes()
        .any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E')
    {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

pub(crate) fn to_js_string(value: &MetadataValue) -> String {
    match value {
        MetadataValue::Null => "null".to_string(),
        MetadataValue::Bool(value) => value.to_string(),
        MetadataValue::Number(value) => number_to_string(*value),
        MetadataValue::String(text) => text.clone(),
        _ => "[object Object]".to_string(),
    }
}

fn to_uint32(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    const TWO_32: f64 = 4_294_967_296.0;
    let wrapped = value.trunc() % TWO_32;
    let wrapped = if wrapped < 0.0 { wrapped + TWO_32 } else { wrapped };
    wrapped as u32
}

fn to_int32(value: f64) -> i32 {
    to_uint32(value) as i32
}

fn strict_equals(left: &MetadataValue, right: &MetadataValue) -> bool {
    match (left, right) {
        (MetadataValue::Null, MetadataValue::Null) => true,
        (MetadataValue::Bool(a), MetadataValue::Bool(b)) => a == b,
        (MetadataValue::Number(a), MetadataValue::Number(b)) => a == b,
        (MetadataValue::String(a), MetadataValue::String(b)) => a == b,
        _ => false,
    }
}

fn loose_equals(left: &MetadataValue, right: &MetadataValue) -> bool {
    match (left, right) {
        (MetadataValue::Null, MetadataValue::Null) => true,
        (MetadataValue::Null, _) | (_, MetadataValue::Null) => false,
        (MetadataValue::Bool(_), _) => loose_equals(&MetadataValue::Number(to_number(left)), right),
        (_, MetadataValue::Bool(_)) => loose_equals(left, &MetadataValue::Number(to_number(right))),
        (MetadataValue::Number(a), MetadataValue::String(b)) => *a == string_to_number(b),
        (MetadataValue::String(a), MetadataValue::Number(b)) => string_to_number(a) == *b,
        _ => strict_equals(left, right),
    }
}

/// Relational comparison; `None` when either side is NaN.
fn compare(left: &MetadataValue, right: &MetadataValue) -> Option<std::cmp::Ordering> {
    if let (MetadataValue::String(a), MetadataValue::String(b)) = (left, right) {
        return Some(a.cmp(b));
    }
    to_number(left).partial_cmp(&to_number(right))
}

/// Fold `operator` over two primitives. `None` for operators that are
/// recorded symbolically instead.
pub(crate) fn fold_binary(
    operator: SyntaxKind,
    left: &MetadataValue,
    right: &MetadataValue,
) -> Option<MetadataValue> {
    use std::cmp::Ordering;

    let number = MetadataValue::Number;
    let value = match operator {
        SyntaxKind::BarBarToken => {
            if left.is_truthy() {
                left.clone()
            } else {
                right.clone()
            }
        }
        SyntaxKind::AmpersandAmpersandToken => {
            if left.is_truthy() {
                right.clone()
            } else {
                left.clone()
            }
        }
        SyntaxKind::AmpersandToken => {
            number(f64::from(to_int32(to_number(left)) & to_int32(to_number(right))))
        }
        SyntaxKind::BarToken => {
            number(f64::from(to_int32(to_number(left)) | to_int32(to_number(right))))
        }
        SyntaxKind::CaretToken => {
            number(f64::from(to_int32(to_number(left)) ^ to_int32(to_number(right))))
        }
        SyntaxKind::EqualsEqualsToken => MetadataValue::Bool(loose_equals(left, right)),
        SyntaxKind::ExclamationEqualsToken => MetadataValue::Bool(!loose_equals(left, right)),
        SyntaxKind::EqualsEqualsEqualsToken => MetadataValue::Bool(strict_equals(left, right)),
        SyntaxKind::ExclamationEqualsEqualsToken => {
            MetadataValue::Bool(!strict_equals(left, right))
        }
        SyntaxKind::LessThanToken => {
            MetadataValue::Bool(compare(left, right) == Some(Ordering::Less))
        }
        SyntaxKind::GreaterThanToken => {
            MetadataValue::Bool(compare(left, right) == Some(Ordering::Greater))
        }
        SyntaxKind::LessThanEqualsToken => MetadataValue::Bool(matches!(
            compare(left, right),
            Some(Ordering::Less | Ordering::Equal)
        )),
        SyntaxKind::GreaterThanEqualsToken => MetadataValue::Bool(matches!(
            compare(left, right),
            Some(Ordering::Greater | Ordering::Equal)
        )),
        SyntaxKind::LessThanLessThanToken => {
            let shift = to_uint32(to_number(right)) & 31;
            number(f64::from(to_int32(to_number(left)).wrapping_shl(shift)))
        }
        SyntaxKind::GreaterThanGreaterThanToken => {
            let shift = to_uint32(to_number(right)) & 31;
            number(f64::from(to_int32(to_number(left)) >> shift))
        }
        SyntaxKind::GreaterThanGreaterThanGreaterThanToken => {
            let shift = to_uint32(to_number(right)) & 31;
            number(f64::from(to_uint32(to_number(left)) >> shift))
        }
        SyntaxKind::PlusToken => {
            if matches!(left, MetadataValue::String(_)) || matches!(right, MetadataValue::String(_))
            {
                MetadataValue::String(to_js_string(left) + &to_js_string(right))
            } else {
                number(to_number(left) + to_number(right))
            }
        }
        SyntaxKind::MinusToken => number(to_number(left) - to_number(right)),
        SyntaxKind::AsteriskToken => number(to_number(left) * to_number(right)),
        SyntaxKind::SlashToken => number(to_number(left) / to_number(right)),
        SyntaxKind::PercentToken => number(to_number(left) % to_number(right)),
        _ => return None,
    };
    Some(value)
}

/// Fold a prefix operator over a primitive operand.
pub(crate) fn fold_prefix(operator: SyntaxKind, operand: &MetadataValue) -> Option<MetadataValue> {
    let value = match operator {
        SyntaxKind::PlusToken => MetadataValue::Number(to_number(operand)),
        SyntaxKind::MinusToken => MetadataValue::Number(-to_number(operand)),
        SyntaxKind::TildeToken => MetadataValue::Number(f64::from(!to_int32(to_number(operand)))),
        SyntaxKind::ExclamationToken => MetadataValue::Bool(!operand.is_truthy()),
        _ => return None,
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(value: f64) -> MetadataValue {
        MetadataValue::Number(value)
    }

    fn s(value: &str) -> MetadataValue {
        MetadataValue::String(value.to_string())
    }

    #[test]
    fn arithmetic_and_concatenation() {
        assert_eq!(fold_binary(SyntaxKind::PlusToken, &n(1.0), &n(2.0)), Some(n(3.0)));
        assert_eq!(fold_binary(SyntaxKind::PlusToken, &s("a"), &n(1.0)), Some(s("a1")));
        assert_eq!(fold_binary(SyntaxKind::PlusToken, &n(1.5), &s("b")), Some(s("1.5b")));
        assert_eq!(fold_binary(SyntaxKind::PercentToken, &n(-7.0), &n(3.0)), Some(n(-1.0)));
        assert_eq!(fold_binary(SyntaxKind::MinusToken, &s("5"), &n(2.0)), Some(n(3.0)));
    }

    #[test]
    fn bitwise_operators_use_int32() {
        assert_eq!(fold_binary(SyntaxKind::LessThanLessThanToken, &n(1.0), &n(3.0)), Some(n(8.0)));
        assert_eq!(
            fold_binary(SyntaxKind::GreaterThanGreaterThanGreaterThanToken, &n(-1.0), &n(28.0)),
            Some(n(15.0))
        );
        assert_eq!(fold_binary(SyntaxKind::BarToken, &n(5.0), &n(2.0)), Some(n(7.0)));
        assert_eq!(fold_prefix(SyntaxKind::TildeToken, &n(0.0)), Some(n(-1.0)));
    }

    #[test]
    fn equality_and_logic() {
        let t = MetadataValue::Bool(true);
        assert_eq!(fold_binary(SyntaxKind::EqualsEqualsToken, &n(1.0), &s("1")), Some(t.clone()));
        assert_eq!(
            fold_binary(SyntaxKind::EqualsEqualsEqualsToken, &n(1.0), &s("1")),
            Some(MetadataValue::Bool(false))
        );
        assert_eq!(fold_binary(SyntaxKind::EqualsEqualsToken, &t, &n(1.0)), Some(t.clone()));
        assert_eq!(fold_binary(SyntaxKind::BarBarToken, &s(""), &s("x")), Some(s("x")));
        assert_eq!(fold_binary(SyntaxKind::AmpersandAmpersandToken, &n(0.0), &s("x")), Some(n(0.0)));
        assert_eq!(fold_prefix(SyntaxKind::ExclamationToken, &MetadataValue::Null), Some(t));
        assert_eq!(fold_binary(SyntaxKind::QuestionQuestionToken, &n(0.0), &n(1.0)), None);
    }

    #[test]
    fn string_numbers_follow_javascript() {
        assert_eq!(to_number(&s(" 42 ")), 42.0);
        assert_eq!(to_number(&s("")), 0.0);
        assert_eq!(to_number(&s("0x10")), 16.0);
        assert!(to_number(&s("inf")).is_nan());
        assert!(to_number(&s("abc")).is_nan());
    }
}
