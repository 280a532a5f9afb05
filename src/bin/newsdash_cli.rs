//! NewsDash CLI - One-Shot Mockup Generator
//!
//! Renders the dashboard concept and writes a PNG. Exits non-zero on
//! any failure; the only recovery built in is the font fallback chain.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use newsdash_core::{Composer, DashboardData, Theme, DEFAULT_OUTPUT, ENGINE_VERSION};

#[derive(Parser)]
#[command(name = "newsdash-cli")]
#[command(version = ENGINE_VERSION)]
#[command(about = "NewsDash CLI - Dashboard UI Concept Renderer")]
struct Cli {
    /// Where to write the PNG
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Seed for the decorative trending chart (omit for per-run variation)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON theme override (palette and font sizes)
    #[arg(short, long)]
    theme: Option<PathBuf>,

    /// Preferred TTF font, tried before the system fallbacks
    #[arg(short, long)]
    font: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let theme = match &cli.theme {
        Some(path) => match load_theme(path) {
            Ok(t) => t,
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Theme::default(),
    };

    println!("Generating Social Writer Newsjacking Dashboard...");

    let composer = Composer::new(theme, cli.font.as_deref());
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let img = composer.render(&DashboardData::default(), &mut rng);

    let saved = match newsdash_core::save_png(&img, &cli.output) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("Dashboard generated successfully: {}", saved.path.display());
    println!("  {} bytes, sha256 {}", saved.bytes, saved.sha256);
    println!();
    println!("Features included:");
    println!("- Professional header with app branding and user profile");
    println!("- Left sidebar with keyword management and toggle controls");
    println!("- Main content area with real-time newsjacking opportunities");
    println!("- Right sidebar with trending topics and breaking alerts");
    println!("- Modern card-based layout with relevance scoring");
    println!("- Interactive elements like toggles, progress bars, and buttons");
    println!("- Clean, professional design with proper spacing and hierarchy");

    ExitCode::SUCCESS
}

fn load_theme(path: &std::path::Path) -> Result<Theme, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("failed to read theme {}: {e}", path.display()))?;
    serde_json::from_str(&text).map_err(|e| format!("invalid theme {}: {e}", path.display()))
}
