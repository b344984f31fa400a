//! cardinal CLI: driving adapter for the cardinality replacers.
//!
//! Subcommands:
//! - `apply <config> <path>...` reduce each path through the pipeline
//! - `check <config>` validate the config builds without errors
//! - `explain <config> <path>` show every stage and every rule tried

use std::process;

use cardinal::{CardinalityConfig, Replacer, Stage};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "apply" => cmd_apply(&args[2..]),
        "check" => cmd_check(&args[2..]),
        "explain" => cmd_explain(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("error: unknown command \"{other}\"");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Logs go to stderr so stdout stays pipeable. `RUST_LOG` overrides the default.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════════════

fn cmd_apply(args: &[String]) -> Result<(), String> {
    let (config_path, paths) = args
        .split_first()
        .ok_or("apply requires a config file path")?;
    if paths.is_empty() {
        return Err("apply requires at least one path".into());
    }

    let pipeline = load_config(config_path)?
        .build()
        .map_err(|e| format!("config invalid: {e}"))?;

    for path in paths {
        println!("{}", pipeline.replace(path));
    }

    Ok(())
}

fn cmd_check(args: &[String]) -> Result<(), String> {
    let config_path = args.first().ok_or("check requires a config file path")?;

    let stages = load_config(config_path)?
        .build_stages()
        .map_err(|e| format!("config invalid: {e}"))?;

    tracing::debug!(stages = stages.len(), "config built");
    println!("Config valid");
    Ok(())
}

fn cmd_explain(args: &[String]) -> Result<(), String> {
    let [config_path, path] = args else {
        return Err("explain requires a config file path and one path".into());
    };

    let stages = load_config(config_path)?
        .build_stages()
        .map_err(|e| format!("config invalid: {e}"))?;

    print!("{}", explain(&stages, path));
    Ok(())
}

/// Render each stage's input and output; rule stages also list every rule tried.
fn explain(stages: &[Stage], path: &str) -> String {
    let mut out = String::new();
    let mut current = path.to_owned();

    for (i, stage) in stages.iter().enumerate() {
        out.push_str(&format!("stage {i} ({}): {current}\n", stage.kind()));

        current = match stage {
            Stage::Auto(auto) => auto.replace(&current),
            Stage::Rules(rules) => {
                let trace = rules.trace(&current);
                for step in &trace.steps {
                    out.push_str(&format!(
                        "  rule {} \"{}\": {}\n",
                        step.index, step.rule, step.outcome
                    ));
                }
                if trace.steps.is_empty() {
                    out.push_str("  (no rules)\n");
                }
                trace.output
            }
        };

        out.push_str(&format!("  => {current}\n"));
    }

    out.push_str(&format!("result: {current}\n"));
    out
}

// ═══════════════════════════════════════════════════════════════════════════════
// Config loading
// ═══════════════════════════════════════════════════════════════════════════════

fn load_config(path: &str) -> Result<CardinalityConfig, String> {
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("failed to read \"{path}\": {e}"))?;

    let is_json = std::path::Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    parse_config(&content, is_json)
}

fn parse_config(content: &str, is_json: bool) -> Result<CardinalityConfig, String> {
    if is_json {
        serde_json::from_str(content).map_err(|e| format!("JSON parse error: {e}"))
    } else {
        // Default to YAML (handles .yaml and .yml)
        serde_yaml::from_str(content).map_err(|e| format!("YAML parse error: {e}"))
    }
}

fn print_usage() {
    eprintln!(
        "Usage: cardinal <command> [options]

Commands:
  apply <config> <path>...   Reduce each path through the pipeline
  check <config>             Validate config
  explain <config> <path>    Show every stage and rule tried for one path
  help                       Show this help

Config files ending in .json are read as JSON, anything else as YAML.
Set RUST_LOG=debug to see replacer construction."
    );
}
