//! tubegen CLI - generate tube meshes from path documents
//!
//! Reads a TOML or JSON tube document and writes OBJ, STL or JSON meshes.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tubegen::{export, TubeDocument, TubePath};

#[derive(Parser, Debug)]
#[command(name = "tubegen")]
#[command(about = "Procedural tube mesh generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a tube mesh from a document
    Generate {
        /// Input document (.toml or .json)
        input: PathBuf,
        /// Output file (format determined by extension: .obj, .stl, .json)
        #[arg(short, long)]
        output: PathBuf,
        /// Override the number of sides around the tube
        #[arg(long)]
        facets: Option<u32>,
        /// Override the number of sections along the tube
        #[arg(long)]
        segments: Option<u32>,
        /// Override the tube radius
        #[arg(long)]
        radius: Option<f64>,
        /// Space sections evenly by arc length
        #[arg(long)]
        uniform: bool,
    },
    /// Display information about a document
    Info {
        /// Input document (.toml or .json)
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate {
            input,
            output,
            facets,
            segments,
            radius,
            uniform,
        } => {
            let mut doc = load(&input)?;
            apply_overrides(&mut doc, facets, segments, radius, uniform);
            generate_file(&doc, &output)?;
        }
        Commands::Info { input } => {
            let doc = load(&input)?;
            show_info(&doc)?;
        }
    }

    Ok(())
}

fn load(input: &Path) -> Result<TubeDocument> {
    TubeDocument::load(input).with_context(|| format!("failed to load {}", input.display()))
}

fn apply_overrides(
    doc: &mut TubeDocument,
    facets: Option<u32>,
    segments: Option<u32>,
    radius: Option<f64>,
    uniform: bool,
) {
    if let Some(facets) = facets {
        doc.tube.facet_count = facets;
    }
    if let Some(segments) = segments {
        doc.tube.segment_count = segments;
    }
    if let Some(radius) = radius {
        doc.tube.radius = radius;
    }
    doc.tube.uniform |= uniform;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Obj,
    Stl,
    Json,
}

fn output_format(output: &Path) -> Result<OutputFormat> {
    let ext = output.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext.to_lowercase().as_str() {
        "obj" => Ok(OutputFormat::Obj),
        "stl" => Ok(OutputFormat::Stl),
        "json" => Ok(OutputFormat::Json),
        _ => anyhow::bail!("Unknown output format: {}", ext),
    }
}

fn generate_file(doc: &TubeDocument, output: &Path) -> Result<()> {
    let format = output_format(output)?;
    let mesh = doc.generate()?;

    match format {
        OutputFormat::Obj => export::write_obj(&mesh, output)?,
        OutputFormat::Stl => export::write_stl(&mesh, output)?,
        OutputFormat::Json => export::write_json(&mesh, output)?,
    }
    log::info!(
        "wrote {} vertices, {} triangles to {}",
        mesh.num_vertices(),
        mesh.num_triangles(),
        output.display()
    );

    Ok(())
}

fn show_info(doc: &TubeDocument) -> Result<()> {
    let path = doc.build_path()?;
    let mesh = doc.generate()?;
    let tube = &doc.tube;

    println!("Facets:    {}", tube.facet_count);
    println!("Segments:  {}", tube.segment_count);
    println!("Radius:    {}", tube.radius);
    println!("Uniform:   {}", tube.uniform);
    println!("Path:      {} samples, length {:.4}", path.samples(), path.length());
    println!("Vertices:  {}", mesh.num_vertices());
    println!("Triangles: {}", mesh.num_triangles());

    Ok(())
}
