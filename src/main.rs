use std::fs;

use anyhow::Context;
use clap::Parser;
use owo_colors::{OwoColorize, Stream};

use crate::cli::{Cli, Command};

mod cli;
mod item;
mod parser;
mod render;
mod resolver;

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    match args.command {
        Command::Render {
            input,
            output,
            retention,
            default_year,
        } => {
            let text = fs::read_to_string(&input)
                .with_context(|| format!("failed to read bibliography {}", input.display()))?;

            let options = parser::Options {
                retention,
                default_year,
            };
            let entries = render::sort_by_year(parser::parse(&text, &options));
            eprintln!(
                "{} {} entries",
                "Found".if_supports_color(Stream::Stderr, |t| t.green()),
                entries.len()
            );

            let html = render::html(&entries);
            if let Some(path) = output {
                fs::write(&path, &html)
                    .with_context(|| format!("failed to write HTML to {}", path.display()))?;
                eprintln!(
                    "{} bibliography to {}",
                    "Saved".if_supports_color(Stream::Stderr, |t| t.green()),
                    path.display()
                );
            }
            if !html.is_empty() {
                println!("{html}");
            }
        }
    }
    Ok(())
}
