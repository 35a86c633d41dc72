//! One-shot generation

use super::{exporter, load_config, make_client, new_workflow, print_view, render_settings, AssetKindArg, Summary};
use anyhow::{bail, Context, Result};
use forge_gen::{CardKind, GenerationWorkflow, MapKind, PngExporter, TileKind};
use std::path::PathBuf;

pub struct GenerateArgs {
    pub kind: AssetKindArg,
    pub sets: Vec<String>,
    pub provider: Option<String>,
    pub select: Option<usize>,
    pub export: bool,
    pub output: Option<PathBuf>,
}

pub fn run(args: GenerateArgs) -> Result<()> {
    match args.kind {
        AssetKindArg::Card => run_kind::<CardKind>(args),
        AssetKindArg::Tile => run_kind::<TileKind>(args),
        AssetKindArg::Map => run_kind::<MapKind>(args),
    }
}

/// Split `field=value`, keeping any further `=` in the value
pub fn parse_assignment(raw: &str) -> Result<(&str, &str)> {
    match raw.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => Ok((field.trim(), value)),
        _ => bail!("expected FIELD=VALUE, got '{}'", raw),
    }
}

fn run_kind<K: Summary>(args: GenerateArgs) -> Result<()> {
    let config = load_config();
    let mut wf: GenerationWorkflow<K> = new_workflow(&config);

    for raw in &args.sets {
        let (field, value) = parse_assignment(raw)?;
        wf.set_field(field, value)
            .with_context(|| format!("cannot set '{}'", field))?;
    }

    let client = make_client(args.provider.as_deref(), &config)?;
    println!("Generating {} via {}...", K::NAME, client.name());
    wf.generate(client.as_ref())?;

    if let Some(index) = args.select {
        let uri = wf
            .view()
            .candidates()
            .get(index.wrapping_sub(1))
            .cloned()
            .with_context(|| format!("no candidate #{}", index))?;
        wf.select_artifact(&uri)?;
    }

    print_view(&wf);

    if args.export {
        let exporter = match args.output {
            Some(dir) => PngExporter::new(dir, config.export.pixel_ratio),
            None => exporter(&config),
        };
        let file = wf.export(&exporter, &render_settings(&config)?)?;
        println!("Exported: {}", file.path.display());
        println!("  Hash: {}", file.hash.to_prefixed_hex());
    }

    Ok(())
}
