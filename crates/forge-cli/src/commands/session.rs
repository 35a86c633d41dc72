//! Interactive session: edit, generate, select, undo and redo one asset

use super::generate::parse_assignment;
use super::options::print_fields;
use super::{exporter, load_config, make_client, new_workflow, print_view, render_settings, AssetKindArg, Summary};
use anyhow::{bail, Result};
use forge_gen::{CardKind, ForgeConfig, GenerationClient, GenerationWorkflow, MapKind, TileKind};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

const HELP: &str = "\
Commands:
  set FIELD VALUE   edit a field (also: set FIELD=VALUE)
  select N          pick candidate N (1-based)
  generate          generate from the current fields
  undo / redo       move through history
  reset             drop history and restore defaults
  show              print the current state
  options           list fields and their choices
  export            write the selected candidate as PNG
  help              this text
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Set { field: String, value: String },
    Select(usize),
    Generate,
    Undo,
    Redo,
    Reset,
    Show,
    Options,
    Export,
    Help,
    Quit,
}

impl SessionCommand {
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let cmd = match word.to_lowercase().as_str() {
            "set" => {
                if rest.is_empty() {
                    bail!("usage: set FIELD VALUE");
                }
                let (field, value) = match rest.split_once(char::is_whitespace) {
                    Some((field, value)) if !field.contains('=') => (field, value.trim()),
                    _ => parse_assignment(rest)?,
                };
                SessionCommand::Set {
                    field: field.to_string(),
                    value: value.to_string(),
                }
            }
            "select" => match rest.parse::<usize>() {
                Ok(n) if n > 0 => SessionCommand::Select(n),
                _ => bail!("usage: select N (N starts at 1)"),
            },
            "generate" | "gen" | "g" => SessionCommand::Generate,
            "undo" | "u" => SessionCommand::Undo,
            "redo" | "r" => SessionCommand::Redo,
            "reset" => SessionCommand::Reset,
            "show" | "s" => SessionCommand::Show,
            "options" => SessionCommand::Options,
            "export" => SessionCommand::Export,
            "help" | "?" => SessionCommand::Help,
            "quit" | "exit" | "q" => SessionCommand::Quit,
            other => bail!("unknown command '{}'. Type 'help' for a list", other),
        };
        Ok(Some(cmd))
    }
}

pub fn run(kind: AssetKindArg, provider: Option<&str>, script: Option<&Path>) -> Result<()> {
    let config = load_config();
    let client = make_client(provider, &config)?;

    let interactive = script.is_none();
    let input: Box<dyn BufRead> = match script {
        Some(path) => Box::new(BufReader::new(std::fs::File::open(path)?)),
        None => Box::new(BufReader::new(std::io::stdin())),
    };

    match kind {
        AssetKindArg::Card => drive::<CardKind>(input, client.as_ref(), &config, interactive),
        AssetKindArg::Tile => drive::<TileKind>(input, client.as_ref(), &config, interactive),
        AssetKindArg::Map => drive::<MapKind>(input, client.as_ref(), &config, interactive),
    }
}

fn drive<K: Summary>(
    input: Box<dyn BufRead>,
    client: &dyn GenerationClient,
    config: &ForgeConfig,
    interactive: bool,
) -> Result<()> {
    let mut wf: GenerationWorkflow<K> = new_workflow(config);
    if interactive {
        println!("{} session via {}. Type 'help' for commands.", K::NAME, client.name());
        prompt()?;
    }

    for line in input.lines() {
        let line = line?;
        match SessionCommand::parse(&line) {
            Ok(Some(SessionCommand::Quit)) => break,
            Ok(Some(cmd)) => {
                if let Err(e) = execute(&mut wf, cmd, client, config) {
                    println!("Error: {}", e);
                }
            }
            Ok(None) => {}
            Err(e) => println!("Error: {}", e),
        }
        if interactive {
            prompt()?;
        }
    }
    Ok(())
}

fn prompt() -> Result<()> {
    print!("> ");
    std::io::stdout().flush()?;
    Ok(())
}

/// Apply one command. Errors leave the workflow as it was.
pub fn execute<K: Summary>(
    wf: &mut GenerationWorkflow<K>,
    cmd: SessionCommand,
    client: &dyn GenerationClient,
    config: &ForgeConfig,
) -> Result<()> {
    match cmd {
        SessionCommand::Set { field, value } => {
            wf.set_field(&field, &value)?;
        }
        SessionCommand::Select(n) => {
            let uri = match n.checked_sub(1).and_then(|i| wf.view().candidates().get(i).cloned()) {
                Some(uri) => uri,
                None => bail!("no candidate #{}", n),
            };
            wf.select_artifact(&uri)?;
            println!("Selected candidate #{}", n);
        }
        SessionCommand::Generate => {
            println!("Generating...");
            wf.generate(client)?;
            print_view(wf);
        }
        SessionCommand::Undo => {
            if wf.undo() {
                print_view(wf);
            } else {
                println!("Nothing to undo");
            }
        }
        SessionCommand::Redo => {
            if wf.redo() {
                print_view(wf);
            } else {
                println!("Nothing to redo");
            }
        }
        SessionCommand::Reset => {
            wf.reset();
            println!("History cleared");
        }
        SessionCommand::Show => print_view(wf),
        SessionCommand::Options => print_fields::<K>(),
        SessionCommand::Export => {
            let file = wf.export(&exporter(config), &render_settings(config)?)?;
            println!("Exported: {}", file.path.display());
        }
        SessionCommand::Help => println!("{}", HELP),
        SessionCommand::Quit => {}
    }
    Ok(())
}
