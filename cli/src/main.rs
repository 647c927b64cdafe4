//! undeck CLI - PowerPoint to SVG slide conversion tool
//!
//! A command-line tool for converting PPTX presentations into
//! per-slide SVG images.

mod update;

use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::PathBuf;

/// PowerPoint presentation to SVG slide conversion
#[derive(Parser)]
#[command(
    name = "undeck",
    author = "iyulab",
    version,
    about = "Convert PPTX presentations to SVG slide images",
    long_about = "undeck - High-performance PowerPoint to SVG slide conversion.\n\n\
                  Decodes a PPTX package and renders every slide as a self-contained\n\
                  SVG image; a malformed slide yields a placeholder, never a failed batch."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a presentation to SVG images
    #[command(visible_alias = "c")]
    Convert {
        /// Input file path
        input: PathBuf,

        /// Output directory for slide images
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// File name prefix for slide images
        #[arg(long, default_value = "slide")]
        prefix: String,
    },

    /// Show presentation information
    Info {
        /// Input file path
        input: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Extract media assets from a presentation
    Extract {
        /// Input file path
        input: PathBuf,

        /// Output directory for assets
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Update undeck to the latest version
    Update {
        /// Check only, don't install
        #[arg(long)]
        check: bool,

        /// Force update even if on latest version
        #[arg(long)]
        force: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Convert {
            input,
            output,
            prefix,
        } => {
            let pb = create_spinner("Converting presentation...");

            let conversion = undeck::convert_file(&input)?;

            pb.finish_and_clear();
            fs::create_dir_all(&output)?;

            let bar = ProgressBar::new(conversion.slides.len() as u64);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{bar:30.cyan/blue} {pos}/{len} {msg}")
                    .unwrap(),
            );

            for slide in &conversion.slides {
                let path = output.join(format!("{}-{:03}.svg", prefix, slide.number));
                fs::write(&path, &slide.svg)?;
                bar.inc(1);
            }
            bar.finish_and_clear();

            println!(
                "{} Converted {} slides to {}",
                "✓".green().bold(),
                conversion.slide_count,
                output.display()
            );
        }

        Commands::Info { input, json } => {
            let pb = create_spinner("Analyzing presentation...");

            let data = fs::read(&input)?;
            let file_name = input
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            let format = undeck::detect_format(&file_name, &data)?;
            let converter = undeck::PptxConverter::from_bytes(data)?;

            pb.finish_and_clear();

            if json {
                let info = serde_json::json!({
                    "file": file_name,
                    "format": format.extension(),
                    "slides": converter.slide_count(),
                    "canvasWidthEmu": converter.canvas_size().width_emu,
                    "canvasHeightEmu": converter.canvas_size().height_emu,
                    "mediaAssets": converter.media().len(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{}", "Presentation Information".cyan().bold());
                println!("{}", "─".repeat(40));
                println!("{}: {}", "File".bold(), file_name);
                println!("{}: {}", "Format".bold(), format);
                println!("{}: {}", "Slides".bold(), converter.slide_count());
                println!(
                    "{}: {} x {} EMU",
                    "Document size".bold(),
                    converter.canvas_size().width_emu,
                    converter.canvas_size().height_emu
                );
                println!("{}: {}", "Media assets".bold(), converter.media().len());
            }
        }

        Commands::Extract { input, output } => {
            let pb = create_spinner("Extracting media...");

            let data = fs::read(&input)?;
            let converter = undeck::PptxConverter::from_bytes(data)?;

            fs::create_dir_all(&output)?;

            let mut count = 0;
            for asset in converter.media().iter() {
                let filename = asset
                    .part_path
                    .rsplit('/')
                    .next()
                    .unwrap_or(&asset.part_path);
                fs::write(output.join(filename), &asset.data)?;
                count += 1;
            }

            pb.finish_and_clear();

            if count > 0 {
                println!(
                    "{} Extracted {} assets to {}",
                    "✓".green().bold(),
                    count,
                    output.display()
                );
            } else {
                println!("{} No media assets found in presentation", "!".yellow().bold());
            }
        }

        Commands::Update { check, force } => {
            if let Err(e) = update::run_update(check, force) {
                eprintln!("{}: {}", "Error".red().bold(), e);
                std::process::exit(1);
            }
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

fn print_version() {
    println!("{} {}", "undeck".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("High-performance PowerPoint to SVG slide conversion");
    println!();
    println!("Supported formats: PPTX");
    println!("Repository: https://github.com/iyulab/undeck");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
