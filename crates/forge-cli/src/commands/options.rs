//! Field manifests for each asset kind

use super::AssetKindArg;
use forge_gen::{CardKind, ConfigFields, FieldKind, MapKind, TileKind, WorkflowKind};

pub fn run(kind: AssetKindArg) {
    match kind {
        AssetKindArg::Card => print_fields::<CardKind>(),
        AssetKindArg::Tile => print_fields::<TileKind>(),
        AssetKindArg::Map => print_fields::<MapKind>(),
    }
}

/// Print each field with its label and allowed values
pub fn print_fields<K: WorkflowKind>() {
    let defaults = K::default_config();
    for spec in <K::Config as ConfigFields>::fields() {
        println!("{} ({})", spec.name, spec.label);
        match spec.kind {
            FieldKind::Text => println!("  text"),
            FieldKind::Choice(values) => println!("  {}", values.join(" | ")),
        }
        if let Some(value) = defaults.field(spec.name) {
            println!("  default: {}", value);
        }
    }
}
