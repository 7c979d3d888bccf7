//! Parsed modules of one compilation.

use hoist_parser::{ParseDiagnostic, SourceFile};
use indexmap::IndexMap;
use tracing::debug;

/// Looks up modules as they were originally parsed.
pub trait ModuleProvider {
    fn get_source_file(&self, file_name: &str) -> Option<&SourceFile>;
}

/// Source files keyed by file name, in the order they were added.
#[derive(Debug, Default)]
pub struct Program {
    files: IndexMap<String, SourceFile>,
}

impl Program {
    pub fn new() -> Program {
        Program::default()
    }

    /// Parse `text` and add it, replacing any module with the same name.
    pub fn add_source(&mut self, file_name: impl Into<String>, text: impl Into<String>) -> &SourceFile {
        let file_name = file_name.into();
        let source_file = SourceFile::parse(file_name.clone(), text);
        debug!(
            file = %file_name,
            diagnostics = source_file.diagnostics.len(),
            "parsed source file"
        );
        let (index, _) = self.files.insert_full(file_name, source_file);
        &self.files[index]
    }

    pub fn get_source_file(&self, file_name: &str) -> Option<&SourceFile> {
        self.files.get(file_name)
    }

    pub fn source_files(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.values()
    }

    /// Parse diagnostics of every module, with the module's file name.
    pub fn diagnostics(&self) -> impl Iterator<Item = (&str, &ParseDiagnostic)> {
        self.files.values().flat_map(|source_file| {
            source_file
                .diagnostics
                .iter()
                .map(move |diagnostic| (source_file.file_name.as_str(), diagnostic))
        })
    }
}

impl ModuleProvider for Program {
    fn get_source_file(&self, file_name: &str) -> Option<&SourceFile> {
        Program::get_source_file(self, file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_modules_in_place() {
        let mut program = Program::new();
        program.add_source("a.ts", "export const a = 1;\n");
        program.add_source("b.ts", "export const b = 2;\n");
        let replaced = program.add_source("a.ts", "export const a = 3;\n");
        assert_eq!(replaced.text, "export const a = 3;\n");

        let names: Vec<&str> = program.source_files().map(|file| file.file_name.as_str()).collect();
        assert_eq!(names, ["a.ts", "b.ts"]);
        assert!(ModuleProvider::get_source_file(&program, "b.ts").is_some());
        assert!(program.get_source_file("c.ts").is_none());
        assert_eq!(program.diagnostics().count(), 0);
    }
}
