use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use indexmap::IndexMap;
use log::debug;

use oad_core::config::{self, CONFIG_FILE_NAME, OadConfig};
use oad_core::model::{DocumentModel, Operation};
use oad_core::parse::{self, spec::OpenApiDocument};
use oad_core::{build_with_options, validate};

#[derive(Parser)]
#[command(name = "oad", about = "OpenAPI 3.x document loader and validator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report every problem found in an OpenAPI document
    Validate {
        /// Path to the OpenAPI document (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Print the resolved document model
    Inspect {
        /// Path to the OpenAPI document
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,

        /// Show a single operation
        #[arg(long, conflicts_with = "schema")]
        operation: Option<String>,

        /// Show a single component schema
        #[arg(long)]
        schema: Option<String>,
    },

    /// Print the tag navigation tree
    Nav {
        /// Path to the OpenAPI document
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Initialize a new oad configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { input } => cmd_validate(input),

        Commands::Inspect {
            input,
            format,
            operation,
            schema,
        } => cmd_inspect(input, format, operation, schema),

        Commands::Nav { input } => cmd_nav(input),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "oad", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Load the project config file from the current directory, or defaults.
fn load_project_config() -> Result<OadConfig> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    match config::load_config(&config_path)? {
        Some(cfg) => {
            debug!("using {}", config_path.display());
            Ok(cfg)
        }
        None => Ok(OadConfig::default()),
    }
}

fn read_spec(path: &Path) -> Result<OpenApiDocument> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");

    let parsed = match ext {
        "json" => parse::from_json(&content)?,
        _ => parse::from_yaml(&content)?,
    };
    Ok(parsed)
}

fn load_model(input: Option<PathBuf>, cfg: &OadConfig) -> Result<DocumentModel> {
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let spec = read_spec(&input)?;
    let built = build_with_options(&spec, &cfg.build_options())
        .with_context(|| format!("failed to build {}", input.display()))?;
    Ok(built.model)
}

fn cmd_validate(input: Option<PathBuf>) -> Result<()> {
    let cfg = load_project_config()?;
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let spec = read_spec(&input)?;

    let issues: Vec<_> = validate(&spec)
        .into_iter()
        .filter(|issue| !cfg.validation.suppress.contains(&issue.kind))
        .collect();

    for issue in &issues {
        eprintln!("{}", issue);
    }

    let errors = issues.iter().filter(|i| i.is_fatal()).count();
    let warnings = issues.len() - errors;

    eprintln!(
        "{} (OpenAPI {}): {} operations, {} errors, {} warnings",
        spec.info.title,
        spec.openapi,
        spec.paths.values().map(|p| p.operations().count()).sum::<usize>(),
        errors,
        warnings
    );

    if errors > 0 {
        anyhow::bail!("{} failed validation", input.display());
    }
    if warnings > 0 && cfg.validation.deny_warnings {
        anyhow::bail!(
            "{} has warnings and `deny_warnings` is set",
            input.display()
        );
    }

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(
    input: Option<PathBuf>,
    format: InspectFormat,
    operation: Option<String>,
    schema: Option<String>,
) -> Result<()> {
    let cfg = load_project_config()?;
    let model = load_model(input, &cfg)?;

    let value = if let Some(id) = operation {
        serde_json::to_value(model.get_operation_by_id(&id)?)?
    } else if let Some(name) = schema {
        serde_json::to_value(model.get_schema_by_name(&name)?.as_ref())?
    } else {
        build_inspect_summary(&model)
    };

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&value)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&value)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(model: &DocumentModel) -> serde_json::Value {
    let schemas: Vec<serde_json::Value> = model
        .schemas()
        .iter()
        .map(|(name, s)| {
            serde_json::json!({
                "name": name,
                "type": s.type_label(),
            })
        })
        .collect();

    let operations: Vec<serde_json::Value> = model
        .list_operations()
        .iter()
        .map(|op| {
            serde_json::json!({
                "id": op.id,
                "method": op.method.as_str(),
                "path": op.path,
                "tags": op.tags,
            })
        })
        .collect();

    let groups: IndexMap<String, usize> = model
        .group_operations_by_tag()
        .into_iter()
        .map(|(tag, ops)| (tag, ops.len()))
        .collect();

    serde_json::json!({
        "info": {
            "title": model.info().title,
            "version": model.info().version,
        },
        "schemas": schemas,
        "operations": operations,
        "tags": groups,
    })
}

fn cmd_nav(input: Option<PathBuf>) -> Result<()> {
    let cfg = load_project_config()?;
    let model = load_model(input, &cfg)?;

    for group in model.navigation() {
        let indent = match &group.name {
            Some(name) => {
                println!("{}", name);
                "  "
            }
            None => "",
        };
        for section in &group.sections {
            println!("{}{} ({})", indent, section.tag, section.operations.len());
            for op in &section.operations {
                println!("{}  {}", indent, operation_line(op));
            }
        }
    }
    Ok(())
}

fn operation_line(op: &Operation) -> String {
    let title = op.summary.as_deref().unwrap_or(&op.id);
    format!("{:<7} {}  {}", op.method.as_str(), op.path, title)
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
