use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

use crate::args::CliArgs;
use hoist_lowering::lowerable_field_names;

/// Boolean options accept strings such as `"true"` as well as booleans.
fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(Error::custom(format!(
                "invalid boolean value: '{s}'. Expected true, false, 'true', or 'false'"
            ))),
        },
    }
}

/// The JSON configuration file.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct HoistConfig {
    #[serde(default)]
    pub files: Option<Vec<String>>,
    #[serde(default)]
    pub out_dir: Option<String>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub strict_metadata_emit: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub enable_ivy: Option<bool>,
    #[serde(default)]
    pub lowerable_field_names: Option<Vec<String>>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub emit_metadata: Option<bool>,
    #[serde(default)]
    pub partial_modules: Option<String>,
}

pub fn parse_config(text: &str) -> Result<HoistConfig> {
    serde_json::from_str(text).context("failed to parse configuration")
}

pub fn load_config(path: &Path) -> Result<HoistConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration {}", path.display()))?;
    parse_config(&text).with_context(|| format!("in {}", path.display()))
}

/// Configuration and arguments merged; paths are absolute.
#[derive(Debug, Clone, Default)]
pub struct ResolvedOptions {
    pub files: Vec<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub strict_metadata_emit: bool,
    pub lowerable_field_names: Vec<String>,
    pub emit_metadata: bool,
    pub partial_modules: Option<PathBuf>,
}

/// Merge `config` with `args`. Arguments win; relative paths in the
/// configuration resolve against `config_dir`, those in arguments against
/// `cwd`.
pub fn resolve_options(
    config: &HoistConfig,
    config_dir: &Path,
    args: &CliArgs,
    cwd: &Path,
) -> ResolvedOptions {
    let files = if args.files.is_empty() {
        config
            .files
            .iter()
            .flatten()
            .map(|file| config_dir.join(file))
            .collect()
    } else {
        args.files.iter().map(|file| cwd.join(file)).collect()
    };

    let out_dir = args
        .out_dir
        .as_ref()
        .map(|dir| cwd.join(dir))
        .or_else(|| config.out_dir.as_ref().map(|dir| config_dir.join(dir)));

    let enable_ivy = !args.no_ivy && config.enable_ivy.unwrap_or(true);
    let lowerable_field_names = if !args.lower_field.is_empty() {
        args.lower_field.clone()
    } else if let Some(names) = &config.lowerable_field_names {
        names.clone()
    } else {
        let mut names: Vec<String> = lowerable_field_names(enable_ivy).into_iter().collect();
        names.sort();
        names
    };

    let partial_modules = args
        .partial_modules
        .as_ref()
        .map(|path| cwd.join(path))
        .or_else(|| {
            config
                .partial_modules
                .as_ref()
                .map(|path| config_dir.join(path))
        });

    ResolvedOptions {
        files,
        out_dir,
        strict_metadata_emit: args.strict_metadata_emit
            || config.strict_metadata_emit.unwrap_or(false),
        lowerable_field_names,
        emit_metadata: args.metadata || config.emit_metadata.unwrap_or(false),
        partial_modules,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booleans_accept_strings() {
        let config = parse_config(
            r#"{ "strictMetadataEmit": "true", "enableIvy": "off", "emitMetadata": true }"#,
        )
        .expect("valid configuration");
        assert_eq!(config.strict_metadata_emit, Some(true));
        assert_eq!(config.enable_ivy, Some(false));
        assert_eq!(config.emit_metadata, Some(true));

        let error = parse_config(r#"{ "enableIvy": "maybe" }"#).expect_err("invalid boolean");
        assert!(format!("{error:#}").contains("invalid boolean value"));
    }

    #[test]
    fn arguments_override_configuration() {
        let config = parse_config(
            r#"{ "files": ["src/a.ts"], "outDir": "dist", "lowerableFieldNames": ["useValue"] }"#,
        )
        .expect("valid configuration");
        let project = Path::new("/project");
        let cwd = Path::new("/work");

        let resolved = resolve_options(&config, project, &CliArgs::default(), cwd);
        assert_eq!(resolved.files, [PathBuf::from("/project/src/a.ts")]);
        assert_eq!(resolved.out_dir, Some(PathBuf::from("/project/dist")));
        assert_eq!(resolved.lowerable_field_names, ["useValue"]);
        assert!(!resolved.strict_metadata_emit);

        let args = CliArgs {
            files: vec![PathBuf::from("b.ts")],
            out_dir: Some(PathBuf::from("out")),
            lower_field: vec!["data".to_string()],
            strict_metadata_emit: true,
            ..CliArgs::default()
        };
        let resolved = resolve_options(&config, project, &args, cwd);
        assert_eq!(resolved.files, [PathBuf::from("/work/b.ts")]);
        assert_eq!(resolved.out_dir, Some(PathBuf::from("/work/out")));
        assert_eq!(resolved.lowerable_field_names, ["data"]);
        assert!(resolved.strict_metadata_emit);
    }

    #[test]
    fn ivy_fields_are_lowered_by_default() {
        let resolved = resolve_options(
            &HoistConfig::default(),
            Path::new("/"),
            &CliArgs::default(),
            Path::new("/"),
        );
        assert!(resolved.lowerable_field_names.iter().any(|name| name == "providers"));

        let args = CliArgs {
            no_ivy: true,
            ..CliArgs::default()
        };
        let resolved = resolve_options(&HoistConfig::default(), Path::new("/"), &args, Path::new("/"));
        assert!(!resolved.lowerable_field_names.iter().any(|name| name == "providers"));
        assert!(resolved.lowerable_field_names.iter().any(|name| name == "loadChildren"));
    }
}
