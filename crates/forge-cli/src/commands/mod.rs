//! CLI command implementations

pub mod generate;
pub mod options;
pub mod session;
pub mod status;

use anyhow::{Context, Result};
use clap::ValueEnum;
use forge_gen::clients::create_client;
use forge_gen::{
    CardKind, ConfigFields, ForgeConfig, GenerationClient, GenerationWorkflow, MapKind,
    PngExporter, RenderSettings, TileKind, WorkflowKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AssetKindArg {
    Card,
    Tile,
    Map,
}

/// Kind-specific lines printed for a committed result
pub trait Summary: WorkflowKind {
    fn summary(output: &Self::Output) -> Vec<(&'static str, String)>;
}

impl Summary for CardKind {
    fn summary(output: &Self::Output) -> Vec<(&'static str, String)> {
        vec![
            ("Name", output.generated_text.name.clone()),
            ("Effect", output.generated_text.description.clone()),
            ("Flavor", output.generated_text.flavor_text.clone()),
        ]
    }
}

impl Summary for TileKind {
    fn summary(_output: &Self::Output) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

impl Summary for MapKind {
    fn summary(_output: &Self::Output) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

/// Load layered config, falling back to defaults if it cannot be read
pub fn load_config() -> ForgeConfig {
    let config = ForgeConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: could not load config: {}", e);
        ForgeConfig::default()
    });
    tracing::debug!(
        provider = %config.generation.provider,
        output_dir = %config.export.output_dir.display(),
        "configuration loaded"
    );
    config
}

pub fn make_client(
    provider: Option<&str>,
    config: &ForgeConfig,
) -> Result<Box<dyn GenerationClient>> {
    let name = provider.unwrap_or(&config.generation.provider);
    create_client(name, config).with_context(|| format!("cannot create client '{}'", name))
}

pub fn new_workflow<K: WorkflowKind>(config: &ForgeConfig) -> GenerationWorkflow<K> {
    GenerationWorkflow::with_seed(K::default_config(), config.generation.history_limit)
}

pub fn exporter(config: &ForgeConfig) -> PngExporter {
    PngExporter::new(&config.export.output_dir, config.export.pixel_ratio)
}

pub fn render_settings(config: &ForgeConfig) -> Result<RenderSettings> {
    RenderSettings::default()
        .with_background(&config.export.background)
        .context("invalid [export].background")
}

/// Shorten an artifact URI for terminal output
pub fn abbreviate(uri: &str) -> String {
    if let Some(rest) = uri.strip_prefix("data:") {
        let (meta, payload) = rest.split_once(',').unwrap_or((rest, ""));
        return format!("data:{} ({} bytes base64)", meta, payload.len());
    }
    if uri.chars().count() > 72 {
        let head: String = uri.chars().take(69).collect();
        return format!("{}...", head);
    }
    uri.to_string()
}

/// Print the live fields, committed output and candidates of a workflow
pub fn print_view<K: Summary>(wf: &GenerationWorkflow<K>) {
    let view = wf.view();

    println!("{}:", K::NAME);
    for spec in <K::Config as ConfigFields>::fields() {
        let value = view.config.field(spec.name).unwrap_or_default();
        println!("  {:<14} {}", spec.name, value);
    }

    match view.generated {
        Some(output) => {
            for (label, value) in K::summary(output) {
                println!("  {}: {}", label, value);
            }
            for (i, uri) in view.candidates().iter().enumerate() {
                let marker = if Some(uri.as_str()) == view.artifact_for_display {
                    '*'
                } else {
                    ' '
                };
                println!("  {}[{}] {}", marker, i + 1, abbreviate(uri));
            }
        }
        None => println!("  (nothing generated yet)"),
    }

    println!(
        "  undo: {}  redo: {}{}",
        wf.history().undo_depth(),
        wf.history().redo_depth(),
        if view.is_generating { "  (generating)" } else { "" }
    );
    if let Some(err) = view.last_error {
        println!("  Error: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbreviate_data_uri() {
        assert_eq!(
            abbreviate("data:image/png;base64,AAAABBBB"),
            "data:image/png;base64 (8 bytes base64)"
        );
    }

    #[test]
    fn test_abbreviate_long_path() {
        let long = "x".repeat(100);
        assert_eq!(abbreviate(&long).len(), 72);
        assert_eq!(abbreviate("tile.png"), "tile.png");
    }
}
