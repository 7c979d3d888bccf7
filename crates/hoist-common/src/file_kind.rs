//! File-name classification.
//!
//! Mirrors the file-name tests the compiler host uses to decide whether a file
//! is TypeScript source (and therefore subject to strict metadata checks) and
//! whether it is a declaration-only file.

/// Returns true for `.ts` and `.tsx` file names (case-insensitive).
///
/// Declaration files also match; callers that need to exclude them check
/// [`is_declaration_file_name`] first.
pub fn is_ts_file_name(file_name: &str) -> bool {
    let lower = file_name.to_ascii_lowercase();
    lower.ends_with(".ts") || lower.ends_with(".tsx")
}

/// Returns true for `.d.ts` declaration files.
pub fn is_declaration_file_name(file_name: &str) -> bool {
    file_name.to_ascii_lowercase().ends_with(".d.ts")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_typescript_sources() {
        assert!(is_ts_file_name("app/routes.ts"));
        assert!(is_ts_file_name("Widget.TSX"));
        assert!(is_ts_file_name("lib.d.ts"));
        assert!(!is_ts_file_name("bundle.js"));
        assert!(!is_ts_file_name("routes.ts.map"));
    }

    #[test]
    fn classifies_declaration_files() {
        assert!(is_declaration_file_name("index.d.ts"));
        assert!(is_declaration_file_name("INDEX.D.TS"));
        assert!(!is_declaration_file_name("index.ts"));
    }
}
