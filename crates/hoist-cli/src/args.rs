use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the hoist binary.
#[derive(Parser, Debug, Default)]
#[command(
    name = "hoist",
    version,
    about = "Lower non-serializable metadata expressions into exported bindings"
)]
pub struct CliArgs {
    /// Path to a JSON configuration file.
    #[arg(short = 'p', long = "project")]
    pub project: Option<PathBuf>,

    /// Write lowered modules to this directory instead of stdout.
    #[arg(long = "outDir", alias = "out-dir")]
    pub out_dir: Option<PathBuf>,

    /// Also write `<module>.metadata.json` for every module with metadata.
    #[arg(long)]
    pub metadata: bool,

    /// Fail when collected metadata contains errors.
    #[arg(long = "strictMetadataEmit", alias = "strict-metadata-emit")]
    pub strict_metadata_emit: bool,

    /// Lower values of this object literal field. Replaces the default set.
    #[arg(long = "lowerField", alias = "lower-field")]
    pub lower_field: Vec<String>,

    /// Do not lower the additional Ivy module fields.
    #[arg(long = "noIvy", alias = "no-ivy")]
    pub no_ivy: bool,

    /// JSON file with partially compiled modules.
    #[arg(long = "partialModules", alias = "partial-modules")]
    pub partial_modules: Option<PathBuf>,

    /// Modules to lower.
    pub files: Vec<PathBuf>,
}
