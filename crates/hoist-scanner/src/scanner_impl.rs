//! Scanner state machine.
//!
//! Produces one token per `scan()` call. Positions are byte offsets into the
//! source text. Trivia (whitespace, comments) is skipped and only recorded as
//! the gap between `full_start` and `token_start`.

use crate::char_codes::{
    is_digit, is_hex_digit, is_identifier_part, is_identifier_start, is_line_break,
    is_white_space_single_line,
};
use crate::syntax_kind::{SyntaxKind, text_to_keyword};

/// Token flag bits.
pub struct TokenFlags;

impl TokenFlags {
    pub const NONE: u32 = 0;
    pub const PRECEDING_LINE_BREAK: u32 = 1 << 0;
    pub const UNTERMINATED: u32 = 1 << 1;
    pub const HEX_SPECIFIER: u32 = 1 << 2;
    /// A template literal containing `${...}` substitutions.
    pub const TEMPLATE_SUBSTITUTIONS: u32 = 1 << 3;
    pub const INVALID_ESCAPE: u32 = 1 << 4;
}

/// Saved scanner position for speculative lookahead.
#[derive(Clone, Debug)]
pub struct ScannerSnapshot {
    pos: usize,
    full_start: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    token_flags: u32,
}

pub struct ScannerState {
    text: String,
    pos: usize,
    full_start: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    token_flags: u32,
}

impl ScannerState {
    pub fn new(text: impl Into<String>) -> ScannerState {
        ScannerState {
            text: text.into(),
            pos: 0,
            full_start: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            token_value: String::new(),
            token_flags: TokenFlags::NONE,
        }
    }

    pub fn get_text(&self) -> &str {
        &self.text
    }

    pub fn get_token(&self) -> SyntaxKind {
        self.token
    }

    pub fn get_token_full_start(&self) -> u32 {
        self.full_start as u32
    }

    pub fn get_token_start(&self) -> u32 {
        self.token_start as u32
    }

    pub fn get_token_end(&self) -> u32 {
        self.pos as u32
    }

    /// Cooked value of the current token: identifier text, unescaped string
    /// contents, or normalized numeric text.
    pub fn get_token_value(&self) -> &str {
        &self.token_value
    }

    pub fn get_token_text(&self) -> &str {
        self.text.get(self.token_start..self.pos).unwrap_or("")
    }

    pub fn get_token_flags(&self) -> u32 {
        self.token_flags
    }

    pub fn has_preceding_line_break(&self) -> bool {
        self.token_flags & TokenFlags::PRECEDING_LINE_BREAK != 0
    }

    pub fn is_unterminated(&self) -> bool {
        self.token_flags & TokenFlags::UNTERMINATED != 0
    }

    pub fn save_state(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            full_start: self.full_start,
            token_start: self.token_start,
            token: self.token,
            token_value: self.token_value.clone(),
            token_flags: self.token_flags,
        }
    }

    pub fn restore_state(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.full_start = snapshot.full_start;
        self.token_start = snapshot.token_start;
        self.token = snapshot.token;
        self.token_value = snapshot.token_value;
        self.token_flags = snapshot.token_flags;
    }

    #[inline]
    fn peek(&self) -> Option<char> {
        self.text.get(self.pos..).and_then(|rest| rest.chars().next())
    }

    #[inline]
    fn peek_at(&self, offset: usize) -> Option<char> {
        self.text
            .get(self.pos..)
            .and_then(|rest| rest.chars().nth(offset))
    }

    #[inline]
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn finish(&mut self, kind: SyntaxKind, len: usize) -> SyntaxKind {
        self.pos += len;
        self.token = kind;
        kind
    }

    /// Scan the next token.
    pub fn scan(&mut self) -> SyntaxKind {
        self.full_start = self.pos;
        self.token_flags = TokenFlags::NONE;
        self.token_value.clear();
        self.skip_trivia();
        self.token_start = self.pos;

        let Some(ch) = self.peek() else {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        };
        let next = self.peek_at(1);
        let next2 = self.peek_at(2);

        match ch {
            '{' => self.finish(SyntaxKind::OpenBraceToken, 1),
            '}' => self.finish(SyntaxKind::CloseBraceToken, 1),
            '(' => self.finish(SyntaxKind::OpenParenToken, 1),
            ')' => self.finish(SyntaxKind::CloseParenToken, 1),
            '[' => self.finish(SyntaxKind::OpenBracketToken, 1),
            ']' => self.finish(SyntaxKind::CloseBracketToken, 1),
            ';' => self.finish(SyntaxKind::SemicolonToken, 1),
            ',' => self.finish(SyntaxKind::CommaToken, 1),
            ':' => self.finish(SyntaxKind::ColonToken, 1),
            '@' => self.finish(SyntaxKind::AtToken, 1),
            '~' => self.finish(SyntaxKind::TildeToken, 1),
            '^' => self.finish(SyntaxKind::CaretToken, 1),
            // `>` is always a single token; the parser rescans it in operator position.
            '>' => self.finish(SyntaxKind::GreaterThanToken, 1),
            '.' => {
                if next.is_some_and(is_digit) {
                    self.scan_number()
                } else if next == Some('.') && next2 == Some('.') {
                    self.finish(SyntaxKind::DotDotDotToken, 3)
                } else {
                    self.finish(SyntaxKind::DotToken, 1)
                }
            }
            '?' => {
                if next == Some('.') && !next2.is_some_and(is_digit) {
                    self.finish(SyntaxKind::QuestionDotToken, 2)
                } else if next == Some('?') {
                    self.finish(SyntaxKind::QuestionQuestionToken, 2)
                } else {
                    self.finish(SyntaxKind::QuestionToken, 1)
                }
            }
            '<' => match next {
                Some('<') => self.finish(SyntaxKind::LessThanLessThanToken, 2),
                Some('=') => self.finish(SyntaxKind::LessThanEqualsToken, 2),
                _ => self.finish(SyntaxKind::LessThanToken, 1),
            },
            '=' => match (next, next2) {
                (Some('='), Some('=')) => self.finish(SyntaxKind::EqualsEqualsEqualsToken, 3),
                (Some('='), _) => self.finish(SyntaxKind::EqualsEqualsToken, 2),
                (Some('>'), _) => self.finish(SyntaxKind::EqualsGreaterThanToken, 2),
                _ => self.finish(SyntaxKind::EqualsToken, 1),
            },
            '!' => match (next, next2) {
                (Some('='), Some('=')) => self.finish(SyntaxKind::ExclamationEqualsEqualsToken, 3),
                (Some('='), _) => self.finish(SyntaxKind::ExclamationEqualsToken, 2),
                _ => self.finish(SyntaxKind::ExclamationToken, 1),
            },
            '+' => match next {
                Some('+') => self.finish(SyntaxKind::PlusPlusToken, 2),
                Some('=') => self.finish(SyntaxKind::PlusEqualsToken, 2),
                _ => self.finish(SyntaxKind::PlusToken, 1),
            },
            '-' => match next {
                Some('-') => self.finish(SyntaxKind::MinusMinusToken, 2),
                Some('=') => self.finish(SyntaxKind::MinusEqualsToken, 2),
                _ => self.finish(SyntaxKind::MinusToken, 1),
            },
            '*' => match next {
                Some('*') => self.finish(SyntaxKind::AsteriskAsteriskToken, 2),
                Some('=') => self.finish(SyntaxKind::AsteriskEqualsToken, 2),
                _ => self.finish(SyntaxKind::AsteriskToken, 1),
            },
            '/' => match next {
                Some('=') => self.finish(SyntaxKind::SlashEqualsToken, 2),
                _ => self.finish(SyntaxKind::SlashToken, 1),
            },
            '%' => self.finish(SyntaxKind::PercentToken, 1),
            '&' => match next {
                Some('&') => self.finish(SyntaxKind::AmpersandAmpersandToken, 2),
                _ => self.finish(SyntaxKind::AmpersandToken, 1),
            },
            '|' => match next {
                Some('|') => self.finish(SyntaxKind::BarBarToken, 2),
                _ => self.finish(SyntaxKind::BarToken, 1),
            },
            '\'' | '"' => self.scan_string(ch),
            '`' => self.scan_template(),
            c if is_digit(c) => self.scan_number(),
            c if is_identifier_start(c) => self.scan_identifier(),
            c => {
                self.pos += c.len_utf8();
                self.token = SyntaxKind::Unknown;
                self.token
            }
        }
    }

    /// Extend a `>` token into `>=`, `>>`, or `>>>` when the parser is in
    /// operator position.
    pub fn re_scan_greater_token(&mut self) -> SyntaxKind {
        if self.token != SyntaxKind::GreaterThanToken {
            return self.token;
        }
        match (self.peek(), self.peek_at(1)) {
            (Some('>'), Some('>')) => {
                self.finish(SyntaxKind::GreaterThanGreaterThanGreaterThanToken, 2)
            }
            (Some('>'), _) => self.finish(SyntaxKind::GreaterThanGreaterThanToken, 1),
            (Some('='), _) => self.finish(SyntaxKind::GreaterThanEqualsToken, 1),
            _ => self.token,
        }
    }

    fn skip_trivia(&mut self) {
        while let Some(ch) = self.peek() {
            if is_line_break(ch) {
                self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                self.advance();
            } else if is_white_space_single_line(ch) {
                self.advance();
            } else if ch == '/' && self.peek_at(1) == Some('/') {
                while let Some(c) = self.peek() {
                    if is_line_break(c) {
                        break;
                    }
                    self.advance();
                }
            } else if ch == '/' && self.peek_at(1) == Some('*') {
                self.pos += 2;
                let mut closed = false;
                while let Some(c) = self.advance() {
                    if is_line_break(c) {
                        self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                    }
                    if c == '*' && self.peek() == Some('/') {
                        self.pos += 1;
                        closed = true;
                        break;
                    }
                }
                if !closed {
                    self.token_flags |= TokenFlags::UNTERMINATED;
                }
            } else {
                break;
            }
        }
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if !is_identifier_part(ch) {
                break;
            }
            self.advance();
        }
        self.token_value.push_str(&self.text[start..self.pos]);
        self.token = text_to_keyword(&self.token_value).unwrap_or(SyntaxKind::Identifier);
        self.token
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;
        if self.peek() == Some('0') && matches!(self.peek_at(1), Some('x' | 'X')) {
            self.pos += 2;
            let digits_start = self.pos;
            while self.peek().is_some_and(is_hex_digit) {
                self.pos += 1;
            }
            let digits = &self.text[digits_start..self.pos];
            self.token_flags |= TokenFlags::HEX_SPECIFIER;
            match u64::from_str_radix(digits, 16) {
                Ok(value) => self.token_value = value.to_string(),
                Err(_) => {
                    self.token_flags |= TokenFlags::UNTERMINATED;
                    self.token_value = "0".to_string();
                }
            }
            self.token = SyntaxKind::NumericLiteral;
            return self.token;
        }

        while self.peek().is_some_and(is_digit) {
            self.pos += 1;
        }
        if self.peek() == Some('.') {
            self.pos += 1;
            while self.peek().is_some_and(is_digit) {
                self.pos += 1;
            }
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            let save = self.pos;
            self.pos += 1;
            if matches!(self.peek(), Some('+' | '-')) {
                self.pos += 1;
            }
            if self.peek().is_some_and(is_digit) {
                while self.peek().is_some_and(is_digit) {
                    self.pos += 1;
                }
            } else {
                self.pos = save;
            }
        }
        self.token_value.push_str(&self.text[start..self.pos]);
        self.token = SyntaxKind::NumericLiteral;
        self.token
    }

    fn scan_string(&mut self, quote: char) -> SyntaxKind {
        self.pos += 1;
        let mut value = String::new();
        loop {
            let Some(ch) = self.peek() else {
                self.token_flags |= TokenFlags::UNTERMINATED;
                break;
            };
            if ch == quote {
                self.pos += 1;
                break;
            }
            if is_line_break(ch) {
                self.token_flags |= TokenFlags::UNTERMINATED;
                break;
            }
            if ch == '\\' {
                self.pos += 1;
                self.scan_escape(&mut value);
                continue;
            }
            value.push(ch);
            self.pos += ch.len_utf8();
        }
        self.token_value = value;
        self.token = SyntaxKind::StringLiteral;
        self.token
    }

    fn scan_template(&mut self) -> SyntaxKind {
        self.pos += 1;
        let mut value = String::new();
        loop {
            let Some(ch) = self.peek() else {
                self.token_flags |= TokenFlags::UNTERMINATED;
                break;
            };
            match ch {
                '`' => {
                    self.pos += 1;
                    break;
                }
                '\\' => {
                    self.pos += 1;
                    self.scan_escape(&mut value);
                }
                '$' if self.peek_at(1) == Some('{') => {
                    self.token_flags |= TokenFlags::TEMPLATE_SUBSTITUTIONS;
                    value.push_str("${");
                    self.pos += 2;
                    let mut depth = 1usize;
                    while let Some(c) = self.advance() {
                        match c {
                            '{' => depth += 1,
                            '}' => {
                                depth -= 1;
                                if depth == 0 {
                                    break;
                                }
                            }
                            _ => {}
                        }
                        value.push(c);
                    }
                    value.push('}');
                }
                '\r' => {
                    // Template literals normalize CRLF and CR to LF.
                    self.pos += 1;
                    if self.peek() == Some('\n') {
                        self.pos += 1;
                    }
                    value.push('\n');
                }
                _ => {
                    value.push(ch);
                    self.pos += ch.len_utf8();
                }
            }
        }
        self.token_value = value;
        self.token = SyntaxKind::NoSubstitutionTemplateLiteral;
        self.token
    }

    /// Scan the escape sequence after a backslash and push its cooked value.
    fn scan_escape(&mut self, value: &mut String) {
        let Some(ch) = self.advance() else {
            self.token_flags |= TokenFlags::UNTERMINATED;
            return;
        };
        match ch {
            'n' => value.push('\n'),
            't' => value.push('\t'),
            'r' => value.push('\r'),
            'b' => value.push('\u{0008}'),
            'f' => value.push('\u{000C}'),
            'v' => value.push('\u{000B}'),
            '0' if !self.peek().is_some_and(is_digit) => value.push('\0'),
            'x' => match self.scan_hex_digits(2) {
                Some(c) => value.push(c),
                None => self.token_flags |= TokenFlags::INVALID_ESCAPE,
            },
            'u' => {
                let decoded = if self.peek() == Some('{') {
                    self.pos += 1;
                    let start = self.pos;
                    while self.peek().is_some_and(is_hex_digit) {
                        self.pos += 1;
                    }
                    let digits = &self.text[start..self.pos];
                    let code = u32::from_str_radix(digits, 16).ok().and_then(char::from_u32);
                    if self.peek() == Some('}') {
                        self.pos += 1;
                        code
                    } else {
                        None
                    }
                } else {
                    self.scan_hex_digits(4)
                };
                match decoded {
                    Some(c) => value.push(c),
                    None => self.token_flags |= TokenFlags::INVALID_ESCAPE,
                }
            }
            '\r' => {
                // Line continuation.
                if self.peek() == Some('\n') {
                    self.pos += 1;
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            other => value.push(other),
        }
    }

    fn scan_hex_digits(&mut self, count: usize) -> Option<char> {
        let start = self.pos;
        for _ in 0..count {
            if !self.peek().is_some_and(is_hex_digit) {
                return None;
            }
            self.pos += 1;
        }
        u32::from_str_radix(&self.text[start..self.pos], 16)
            .ok()
            .and_then(char::from_u32)
    }
}
