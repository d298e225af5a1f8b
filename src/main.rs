//! BrickStore inventory tool
//!
//! Inspects BrickStoreXML files and rewrites them in canonical form.

use std::path::PathBuf;

use brickstore_xml::{
    BrickStoreReader, BrickStoreWriter, Inventory, ReaderOptions, WriterOptions,
};
use clap::{Parser, Subcommand};

/// Read and rewrite BrickStoreXML inventory files
#[derive(Parser, Debug)]
#[command(name = "brickstore")]
#[command(version, about, long_about = None)]
struct Args {
    /// Build items on all cores while reading
    #[arg(long, global = true, default_value_t = false)]
    parallel: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the items of an inventory file
    Inspect {
        file: PathBuf,

        /// Print the whole inventory as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Read an inventory file and write it back in canonical form
    Rewrite {
        input: PathBuf,
        output: PathBuf,

        /// Spaces per nesting level, 0 for a compact document
        #[arg(long, default_value_t = brickstore_xml::config::DEFAULT_INDENT)]
        indent: usize,
    },
}

fn main() {
    // Set RUST_LOG to control log level, e.g. RUST_LOG=brickstore_xml=debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let reader = BrickStoreReader::new(ReaderOptions::default().parallel(args.parallel));

    if let Err(e) = run(&reader, args.command) {
        log::error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(reader: &BrickStoreReader, command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Inspect { file, json } => {
            let inventory = reader.read_path(&file)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&inventory)?);
            } else {
                print_summary(&inventory);
            }
        }
        Command::Rewrite {
            input,
            output,
            indent,
        } => {
            let inventory = reader.read_path(&input)?;
            let writer = BrickStoreWriter::new(WriterOptions::default().indent(indent));
            writer.write_path(&inventory, &output)?;
            log::info!(
                "Rewrote {} items from {} to {}",
                inventory.items.len(),
                input.display(),
                output.display()
            );
        }
    }
    Ok(())
}

fn print_summary(inventory: &Inventory) {
    println!(
        "{} items, currency {}, changelog {}",
        inventory.items.len(),
        inventory.currency.as_deref().unwrap_or("-"),
        inventory
            .changelog_id
            .map_or_else(|| "-".to_string(), |id| id.to_string())
    );

    for item in &inventory.items {
        let quantity = item.quantity.map_or_else(|| "-".to_string(), |q| q.to_string());
        let price = item
            .price
            .map_or_else(|| "-".to_string(), brickstore_xml::codec::format_price);
        println!(
            "{:<12} {:<12} {:<6} {:<10} {:>6} x {:>12}  {}",
            item.id,
            item.item_type.display_name(),
            item.condition.display_name(),
            item.status.display_name(),
            quantity,
            price,
            item.name
        );
    }
}
