//! Line/character positions.
//!
//! Metadata error records carry zero-based `line` and `character` fields, so
//! the collector needs a cheap offset-to-position mapping per source file.

use serde::{Deserialize, Serialize};

/// Zero-based line and character (UTF-16 agnostic: characters are counted in
/// Unicode scalar values).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAndCharacter {
    pub line: u32,
    pub character: u32,
}

/// Byte offsets of every line start in a source text.
#[derive(Clone, Debug, Default)]
pub struct LineMap {
    line_starts: Vec<u32>,
}

impl LineMap {
    /// Build the line map for `text`. `\r\n`, `\n` and lone `\r` all end a line.
    pub fn build(text: &str) -> LineMap {
        let mut line_starts = vec![0];
        let bytes = text.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\r' => {
                    if bytes.get(i + 1) == Some(&b'\n') {
                        i += 1;
                    }
                    line_starts.push((i + 1) as u32);
                }
                b'\n' => line_starts.push((i + 1) as u32),
                _ => {}
            }
            i += 1;
        }
        LineMap { line_starts }
    }

    /// Number of lines in the mapped text.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Convert a byte offset into a line/character pair.
    ///
    /// Offsets past the end of the text clamp to the last line.
    pub fn line_and_character_of(&self, text: &str, offset: u32) -> LineAndCharacter {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next.saturating_sub(1),
        };
        let line_start = self.line_starts[line] as usize;
        let end = (offset as usize).min(text.len());
        let character = text
            .get(line_start..end)
            .map_or(0, |prefix| prefix.chars().count() as u32);
        LineAndCharacter {
            line: line as u32,
            character,
        }
    }
}
