//! Indentation-aware output buffer.

const INDENT_UNIT: &str = "    ";

#[derive(Debug, Default)]
pub struct SourceWriter {
    output: String,
    indent: usize,
    at_line_start: bool,
}

impl SourceWriter {
    pub fn new() -> SourceWriter {
        SourceWriter {
            output: String::new(),
            indent: 0,
            at_line_start: true,
        }
    }

    pub fn write(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.at_line_start {
            for _ in 0..self.indent {
                self.output.push_str(INDENT_UNIT);
            }
            self.at_line_start = false;
        }
        self.output.push_str(text);
    }

    pub fn write_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.write(ch.encode_utf8(&mut buf));
    }

    pub fn write_space(&mut self) {
        self.write(" ");
    }

    pub fn write_line(&mut self) {
        self.output.push('\n');
        self.at_line_start = true;
    }

    pub fn increase_indent(&mut self) {
        self.indent += 1;
    }

    pub fn decrease_indent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    pub fn is_at_line_start(&self) -> bool {
        self.at_line_start
    }

    pub fn get_output(&self) -> &str {
        &self.output
    }

    pub fn into_output(self) -> String {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indents_only_at_line_start() {
        let mut writer = SourceWriter::new();
        writer.write("a {");
        writer.write_line();
        writer.increase_indent();
        writer.write("b;");
        writer.write(" c;");
        writer.write_line();
        writer.decrease_indent();
        writer.write("}");
        assert_eq!(writer.get_output(), "a {\n    b; c;\n}");
    }

    #[test]
    fn empty_writes_do_not_indent() {
        let mut writer = SourceWriter::new();
        writer.increase_indent();
        writer.write("");
        writer.write_line();
        assert_eq!(writer.into_output(), "\n");
    }
}
