//! Configuration and client health report

use super::load_config;
use anyhow::Result;
use forge_gen::clients::{available_clients, create_client};
use forge_gen::ClientStatus;

pub fn run() -> Result<()> {
    let config = load_config();

    println!("Generation:");
    println!("  Provider: {}", config.generation.provider);
    println!("  Text model: {}", config.generation.text_model);
    println!("  Image model: {}", config.generation.image_model);
    println!(
        "  Candidates: {} per card, {} per tile",
        config.generation.card_candidates, config.generation.tile_candidates
    );
    match config.generation.history_limit {
        Some(limit) => println!("  History limit: {}", limit),
        None => println!("  History limit: unbounded"),
    }

    println!("Export:");
    println!("  Output dir: {}", config.export.output_dir.display());
    println!("  Pixel ratio: {}", config.export.pixel_ratio);
    println!("  Background: {}", config.export.background);

    println!("Clients:");
    for name in available_clients() {
        let line = match create_client(name, &config) {
            Ok(client) => match client.health_check() {
                Ok(ClientStatus::Available) => "available".to_string(),
                Ok(ClientStatus::NoApiKey) => "no API key".to_string(),
                Ok(ClientStatus::Unavailable(reason)) => format!("unavailable ({})", reason),
                Err(e) => format!("error ({})", e),
            },
            Err(e) => format!("unavailable ({})", e),
        };
        println!("  {:<8} {}", name, line);
    }
    Ok(())
}
