//! Tests for the scanner.

use hoist_scanner::{ScannerState, SyntaxKind, TokenFlags};

fn scan_all(source: &str) -> Vec<SyntaxKind> {
    let mut scanner = ScannerState::new(source);
    let mut kinds = Vec::new();
    loop {
        let kind = scanner.scan();
        if kind == SyntaxKind::EndOfFileToken {
            break;
        }
        kinds.push(kind);
    }
    kinds
}

#[test]
fn scans_route_declaration() {
    let kinds = scan_all("export const routes = [{ path: 'a', loadChildren: () => import('./a') }];");
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::ExportKeyword,
            SyntaxKind::ConstKeyword,
            SyntaxKind::Identifier,
            SyntaxKind::EqualsToken,
            SyntaxKind::OpenBracketToken,
            SyntaxKind::OpenBraceToken,
            SyntaxKind::Identifier,
            SyntaxKind::ColonToken,
            SyntaxKind::StringLiteral,
            SyntaxKind::CommaToken,
            SyntaxKind::Identifier,
            SyntaxKind::ColonToken,
            SyntaxKind::OpenParenToken,
            SyntaxKind::CloseParenToken,
            SyntaxKind::EqualsGreaterThanToken,
            SyntaxKind::ImportKeyword,
            SyntaxKind::OpenParenToken,
            SyntaxKind::StringLiteral,
            SyntaxKind::CloseParenToken,
            SyntaxKind::CloseBraceToken,
            SyntaxKind::CloseBracketToken,
            SyntaxKind::SemicolonToken,
        ]
    );
}

#[test]
fn token_positions_exclude_trivia() {
    let mut scanner = ScannerState::new("  /* c */ foo // tail\n bar");
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_token_full_start(), 0);
    assert_eq!(scanner.get_token_start(), 10);
    assert_eq!(scanner.get_token_end(), 13);
    assert!(!scanner.has_preceding_line_break());

    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_token_value(), "bar");
    assert!(scanner.has_preceding_line_break());
}

#[test]
fn cooks_string_escapes() {
    let mut scanner = ScannerState::new(r#"'it\'s\nA\x42\u{1F600}'"#);
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.get_token_value(), "it's\nAB\u{1F600}");
    assert!(!scanner.is_unterminated());
}

#[test]
fn flags_unterminated_strings() {
    let mut scanner = ScannerState::new("'abc\nnext");
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert!(scanner.is_unterminated());
}

#[test]
fn normalizes_numeric_literals() {
    let mut scanner = ScannerState::new("0x1F 1.5e3 .25");
    assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
    assert_eq!(scanner.get_token_value(), "31");
    assert!(scanner.get_token_flags() & TokenFlags::HEX_SPECIFIER != 0);
    assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
    assert_eq!(scanner.get_token_value(), "1.5e3");
    assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
    assert_eq!(scanner.get_token_value(), ".25");
}

#[test]
fn scans_lowered_symbol_identifiers() {
    let mut scanner = ScannerState::new("ɵ12");
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_token_value(), "ɵ12");
    assert_eq!(scanner.get_token_end() as usize, "ɵ12".len());
}

#[test]
fn greater_than_is_rescanned_on_demand() {
    let mut scanner = ScannerState::new("a >>> b >= c");
    scanner.scan();
    assert_eq!(scanner.scan(), SyntaxKind::GreaterThanToken);
    assert_eq!(
        scanner.re_scan_greater_token(),
        SyntaxKind::GreaterThanGreaterThanGreaterThanToken
    );
    scanner.scan();
    assert_eq!(scanner.scan(), SyntaxKind::GreaterThanToken);
    assert_eq!(
        scanner.re_scan_greater_token(),
        SyntaxKind::GreaterThanEqualsToken
    );
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
}

#[test]
fn save_and_restore_rewinds() {
    let mut scanner = ScannerState::new("(a) => a");
    scanner.scan();
    let snapshot = scanner.save_state();
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.scan(), SyntaxKind::CloseParenToken);
    scanner.restore_state(snapshot);
    assert_eq!(scanner.get_token(), SyntaxKind::OpenParenToken);
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
}

#[test]
fn template_literals_record_substitutions() {
    let mut scanner = ScannerState::new("`plain` `a${b}c`");
    assert_eq!(scanner.scan(), SyntaxKind::NoSubstitutionTemplateLiteral);
    assert_eq!(scanner.get_token_value(), "plain");
    assert_eq!(scanner.get_token_flags() & TokenFlags::TEMPLATE_SUBSTITUTIONS, 0);
    assert_eq!(scanner.scan(), SyntaxKind::NoSubstitutionTemplateLiteral);
    assert!(scanner.get_token_flags() & TokenFlags::TEMPLATE_SUBSTITUTIONS != 0);
}

#[test]
fn optional_chain_is_not_confused_with_conditional_decimal() {
    assert_eq!(
        scan_all("a?.b"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::QuestionDotToken,
            SyntaxKind::Identifier
        ]
    );
    assert_eq!(
        scan_all("a?.5:1"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::QuestionToken,
            SyntaxKind::NumericLiteral,
            SyntaxKind::ColonToken,
            SyntaxKind::NumericLiteral
        ]
    );
}
