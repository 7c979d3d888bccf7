use std::fmt::Write;

use super::Printer;
use hoist_parser::parser::node::Node;

/// Quote `text` as a single-quoted string literal.
pub(crate) fn quote_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    escape_into(&mut out, text, '\'');
    out.push('\'');
    out
}

fn escape_into(out: &mut String, text: &str, quote: char) {
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\u{b}' => out.push_str("\\v"),
            '\0' => out.push_str("\\0"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            c => out.push(c),
        }
    }
}

impl<'a> Printer<'a> {
    // =========================================================================
    // Literals
    // =========================================================================

    pub(super) fn emit_identifier(&mut self, node: &Node) {
        if let Some(ident) = self.arena.get_identifier(node) {
            self.write(&ident.escaped_text);
        }
    }

    pub(super) fn emit_numeric_literal(&mut self, node: &Node) {
        if let Some(lit) = self.arena.get_literal(node) {
            self.write(&lit.text);
        }
    }

    pub(super) fn emit_string_literal(&mut self, node: &Node) {
        if let Some(lit) = self.arena.get_literal(node) {
            let quoted = quote_string(&lit.text);
            self.write(&quoted);
        }
    }

    pub(super) fn emit_template_literal(&mut self, node: &Node) {
        let Some(lit) = self.arena.get_literal(node) else {
            return;
        };
        let mut out = String::with_capacity(lit.text.len() + 2);
        out.push('`');
        let mut chars = lit.text.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '`' => out.push_str("\\`"),
                '\\' => out.push_str("\\\\"),
                '$' if chars.peek() == Some(&'{') => out.push_str("\\$"),
                // Line breaks are kept literally inside templates.
                c => out.push(c),
            }
        }
        out.push('`');
        self.write(&out);
    }
}
