use clap::{Parser, Subcommand, ValueEnum};
use midimotif::config::{load_config, GenerateConfig};
use midimotif::{detect_motifs, generate, midi, report, transform_motifs};
use std::fs;
use std::path::PathBuf;

/// MIDI Motif Analysis System
#[derive(Parser)]
#[command(name = "midimotif")]
#[command(about = "Detect and transform the short-short-short-long motif in MIDI files")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print container metadata for a MIDI file
    Analyze {
        /// Input MIDI file
        input: PathBuf,
    },
    /// Extract all notes to a flat text listing
    ExtractNotes {
        /// Input MIDI file
        input: PathBuf,

        /// Output text file (prints to stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Search a MIDI file for motif occurrences
    FindMotifs {
        /// Input MIDI file
        input: PathBuf,

        /// Emit the motif list as JSON instead of the text report
        #[arg(long)]
        json: bool,
    },
    /// Invert detected motifs and write the transformed MIDI file
    Transform {
        /// Input MIDI file
        input: PathBuf,

        /// Output MIDI file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Generate a deterministic composition
    Generate {
        /// Which generator to run
        #[arg(value_enum)]
        generator: Generator,

        /// Output MIDI file
        #[arg(short, long)]
        output: PathBuf,

        /// Custom configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Show default generator configuration
    ShowConfig,
}

#[derive(Clone, Copy, ValueEnum)]
enum Generator {
    Lorenz,
    Sine,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { input } => {
            let bytes = fs::read(&input)?;
            let stream = midi::read_bytes(&bytes)?;
            print!("{}", midi::summarize(&stream, &input.display().to_string()));
        }
        Commands::ExtractNotes { input, output } => {
            let bytes = fs::read(&input)?;
            let stream = midi::read_bytes(&bytes)?;
            let listing = report::render_note_events(&stream, &input.display().to_string());
            match output {
                Some(path) => {
                    fs::write(&path, listing)?;
                    println!("Successfully extracted notes to {}", path.display());
                }
                None => print!("{}", listing),
            }
        }
        Commands::FindMotifs { input, json } => {
            let bytes = fs::read(&input)?;
            let stream = midi::read_bytes(&bytes)?;
            let motifs = detect_motifs(&stream)?;
            if json {
                println!("{}", report::motifs_to_json(&motifs)?);
            } else {
                print!("{}", report::render_motif_report(&motifs));
            }
        }
        Commands::Transform { input, output } => {
            let bytes = fs::read(&input)?;
            let stream = midi::read_bytes(&bytes)?;
            let transformed = transform_motifs(&stream)?;
            midi::write_file(&transformed, &output)?;
            println!(
                "\nSuccessfully created transformed file: {}",
                output.display()
            );
        }
        Commands::Generate {
            generator,
            output,
            config,
        } => {
            let config = match config {
                Some(path) => load_config(path)?,
                None => GenerateConfig::default(),
            };
            let stream = match generator {
                Generator::Lorenz => generate::lorenz_stream(&config),
                Generator::Sine => generate::sine_stream(&config),
            };
            midi::write_file(&stream, &output)?;
            println!("Successfully created {}", output.display());
        }
        Commands::ShowConfig => {
            let config = GenerateConfig::default();
            let json = serde_json::to_string_pretty(&config)?;
            println!("{}", json);
        }
    }

    Ok(())
}
