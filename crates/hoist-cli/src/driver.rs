//! Compile driver: parse, collect metadata, lower, print.

use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{debug, info};

use crate::args::CliArgs;
use crate::config::{HoistConfig, ResolvedOptions, load_config, resolve_options};
use hoist_emitter::Printer;
use hoist_lowering::{
    ExpressionLoweringTransform, LowerMetadataTransform, PartialModule,
    PartialModuleMetadataTransformer, Program,
};
use hoist_metadata::{CollectorOptions, MetadataCache, MetadataCollector, MetadataTransformer};

/// One printed module.
#[derive(Debug, Clone)]
pub struct LoweredModule {
    pub file_name: String,
    pub text: String,
    /// Whether any expression was lowered.
    pub changed: bool,
    /// Where the module was written, when an output directory is set.
    pub output_path: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct CompileResult {
    pub modules: Vec<LoweredModule>,
    pub metadata_files: Vec<PathBuf>,
    /// Parse errors as `file:line:character: message`.
    pub diagnostics: Vec<String>,
}

/// Run with command line arguments, reading the configuration file if one
/// was given.
pub fn compile(args: &CliArgs, cwd: &Path) -> Result<CompileResult> {
    let (config, config_dir) = match &args.project {
        Some(project) => {
            let path = cwd.join(project);
            let config = load_config(&path)?;
            let dir = path.parent().map_or_else(|| cwd.to_path_buf(), Path::to_path_buf);
            (config, dir)
        }
        None => (HoistConfig::default(), cwd.to_path_buf()),
    };
    let options = resolve_options(&config, &config_dir, args, cwd);
    run(&options)
}

pub fn run(options: &ResolvedOptions) -> Result<CompileResult> {
    if options.files.is_empty() {
        bail!("no input files");
    }

    let mut program = Program::new();
    for path in &options.files {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        program.add_source(path.display().to_string(), text);
    }

    let mut result = CompileResult::default();
    for source_file in program.source_files() {
        for diagnostic in &source_file.diagnostics {
            let position = source_file.line_and_character_of(diagnostic.start);
            result.diagnostics.push(format!(
                "{}:{}:{}: {}",
                source_file.file_name,
                position.line + 1,
                position.character + 1,
                diagnostic.message
            ));
        }
    }

    let lowering = Rc::new(LowerMetadataTransform::new(
        options.lowerable_field_names.iter().cloned(),
    ));
    let mut transformers: Vec<Rc<dyn MetadataTransformer>> =
        vec![lowering.clone() as Rc<dyn MetadataTransformer>];
    if let Some(path) = &options.partial_modules {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read partial modules {}", path.display()))?;
        let modules = PartialModule::from_json(&text)
            .with_context(|| format!("failed to parse partial modules {}", path.display()))?;
        debug!(count = modules.len(), "loaded partial modules");
        transformers.push(Rc::new(PartialModuleMetadataTransformer::new(modules)));
    }
    let cache = MetadataCache::new(
        Box::new(MetadataCollector::new(CollectorOptions::default())),
        options.strict_metadata_emit,
        transformers,
    );
    let expression_lowering = ExpressionLoweringTransform::new(lowering.as_ref(), &program);
    let root_dir = common_root(&options.files);

    if let Some(out_dir) = &options.out_dir {
        std::fs::create_dir_all(out_dir)
            .with_context(|| format!("failed to create {}", out_dir.display()))?;
    }

    for source_file in program.source_files() {
        let file_name = &source_file.file_name;
        let metadata = cache
            .get_metadata(source_file)
            .with_context(|| format!("failed to collect metadata for {file_name}"))?;

        let mut lowered = source_file.clone();
        let changed = expression_lowering
            .transform(&mut lowered)
            .with_context(|| format!("failed to lower {file_name}"))?;
        let text = Printer::print_source_file(&lowered);
        info!(file = %file_name, changed, "lowered module");

        let source_path = Path::new(file_name);
        let output_path = match &options.out_dir {
            Some(out_dir) => {
                let path = output_path_for(out_dir, &root_dir, source_path);
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("failed to create {}", parent.display()))?;
                }
                std::fs::write(&path, &text)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                Some(path)
            }
            None => None,
        };

        if options.emit_metadata
            && let Some(metadata) = metadata
        {
            let directory = output_path
                .as_deref()
                .unwrap_or(source_path)
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default();
            let path = directory.join(metadata_file_name(file_name));
            let json = serde_json::to_string(metadata.as_ref())
                .with_context(|| format!("failed to serialize metadata for {file_name}"))?;
            std::fs::write(&path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            result.metadata_files.push(path);
        }

        result.modules.push(LoweredModule {
            file_name: file_name.clone(),
            text,
            changed,
            output_path,
        });
    }
    Ok(result)
}

/// Deepest directory containing every input.
fn common_root(files: &[PathBuf]) -> PathBuf {
    let mut directories = files.iter().filter_map(|file| file.parent());
    let Some(first) = directories.next() else {
        return PathBuf::new();
    };
    let mut root = first.to_path_buf();
    for directory in directories {
        while !directory.starts_with(&root) {
            if !root.pop() {
                return PathBuf::new();
            }
        }
    }
    root
}

/// `source` keeps its place below `root_dir` when moved into `out_dir`.
fn output_path_for(out_dir: &Path, root_dir: &Path, source: &Path) -> PathBuf {
    match source.strip_prefix(root_dir) {
        Ok(relative) => out_dir.join(relative),
        Err(_) => out_dir.join(source.file_name().unwrap_or_default()),
    }
}

/// `app.component.ts` becomes `app.component.metadata.json`.
pub fn metadata_file_name(file_name: &str) -> String {
    let base = Path::new(file_name)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(file_name);
    let stem = [".d.ts", ".tsx", ".ts", ".js"]
        .iter()
        .find_map(|extension| base.strip_suffix(extension))
        .unwrap_or(base);
    format!("{stem}.metadata.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_file_names() {
        assert_eq!(metadata_file_name("src/app.component.ts"), "app.component.metadata.json");
        assert_eq!(metadata_file_name("types.d.ts"), "types.metadata.json");
        assert_eq!(metadata_file_name("legacy.js"), "legacy.metadata.json");
        assert_eq!(metadata_file_name("README"), "README.metadata.json");
    }

    #[test]
    fn outputs_keep_their_place_below_the_common_root() {
        let files = [
            PathBuf::from("/work/src/a/index.ts"),
            PathBuf::from("/work/src/b/index.ts"),
            PathBuf::from("/work/src/main.ts"),
        ];
        let root = common_root(&files);
        assert_eq!(root, Path::new("/work/src"));
        assert_eq!(
            output_path_for(Path::new("/dist"), &root, &files[0]),
            Path::new("/dist/a/index.ts")
        );
        assert_eq!(
            output_path_for(Path::new("/dist"), &root, &files[2]),
            Path::new("/dist/main.ts")
        );
        assert_eq!(common_root(&files[2..]), Path::new("/work/src"));
    }
}
