//! Bithide - Hide secret text in plain sight
//!
//! A CLI for LSB steganography over image and WAV carriers with optional
//! password-based authenticated encryption.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use std::path::PathBuf;

use bithide::crypto::DEFAULT_ITERATIONS;
use bithide::{decode, encode_with_options, Carrier, EncodeOptions};

/// Bithide - Hide secret text in plain sight
///
/// Hides messages in the least significant bits of PNG/BMP images and
/// 16-bit PCM WAV audio. With a password, the message is sealed with
/// authenticated encryption before embedding.
#[derive(Parser)]
#[command(name = "bithide")]
#[command(version)]
#[command(about = "LSB steganography for images and audio, with optional encryption")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hide a message inside a carrier file
    ///
    /// The carrier is read, the message embedded, and the result written to
    /// --output; the original carrier file is never modified. Output must be
    /// a lossless format (.png, .bmp, .wav).
    Hide {
        /// Path to the carrier file (.png, .bmp, or .wav)
        #[arg(short, long)]
        carrier: PathBuf,

        /// Message to hide (reads from stdin if not provided)
        #[arg(short, long)]
        message: Option<String>,

        /// Password for authenticated encryption (omit to embed plaintext)
        #[arg(short, long)]
        password: Option<String>,

        /// PBKDF2 iteration count (values below 100000 are raised to it)
        #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
        iterations: u32,

        /// Where to write the carrier with the embedded message
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Reveal a hidden message from a carrier file
    ///
    /// Exits with an error if the carrier holds a message sealed under a
    /// different password; reports cleanly when nothing is embedded.
    Reveal {
        /// Path to the carrier file (.png, .bmp, or .wav)
        #[arg(short, long)]
        carrier: PathBuf,

        /// Password the message was sealed with (omit for plaintext embeds)
        #[arg(short, long)]
        password: Option<String>,

        /// Write the message to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show how many bytes a carrier can hold
    Capacity {
        /// Path to the carrier file (.png, .bmp, or .wav)
        #[arg(short, long)]
        carrier: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Hide {
            carrier,
            message,
            password,
            iterations,
            output,
        } => hide_cmd(&carrier, message, password.as_deref(), iterations, &output),

        Commands::Reveal {
            carrier,
            password,
            output,
        } => reveal_cmd(&carrier, password.as_deref(), output.as_ref()),

        Commands::Capacity { carrier } => capacity_cmd(&carrier),
    }
}

/// Embeds a message into a carrier and writes the result.
fn hide_cmd(
    carrier_path: &PathBuf,
    message: Option<String>,
    password: Option<&str>,
    iterations: u32,
    output: &PathBuf,
) -> Result<()> {
    let carrier = Carrier::from_file(carrier_path)
        .with_context(|| format!("Failed to load carrier {}", carrier_path.display()))?;

    let message = match message {
        Some(m) => m,
        None => {
            eprintln!("Reading message from stdin (Ctrl+D to finish):");
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read message from stdin")?;
            buffer.trim_end_matches('\n').to_string()
        }
    };

    if message.is_empty() {
        anyhow::bail!("Message cannot be empty");
    }

    let options = EncodeOptions { iterations };
    let stego = encode_with_options(&carrier, &message, password, &options)
        .context("Failed to hide message")?;

    stego
        .save(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    eprintln!(
        "Hidden {} bytes in {} carrier (capacity {} bytes)",
        message.len(),
        carrier.kind(),
        carrier.capacity()
    );
    eprintln!("Saved: {}", output.display());

    Ok(())
}

/// Extracts a hidden message from a carrier.
fn reveal_cmd(
    carrier_path: &PathBuf,
    password: Option<&str>,
    output: Option<&PathBuf>,
) -> Result<()> {
    let carrier = Carrier::from_file(carrier_path)
        .with_context(|| format!("Failed to load carrier {}", carrier_path.display()))?;

    let message = decode(&carrier, password)
        .with_context(|| format!("Failed to reveal message from {}", carrier_path.display()))?;

    match message {
        Some(message) => {
            if let Some(output_path) = output {
                std::fs::write(output_path, message.as_bytes())
                    .with_context(|| format!("Failed to write {}", output_path.display()))?;
                eprintln!("Message written to {}", output_path.display());
            } else {
                println!("{message}");
            }
            Ok(())
        }
        None => anyhow::bail!("No hidden message found in {}", carrier_path.display()),
    }
}

/// Prints carrier details and embedding capacity.
fn capacity_cmd(carrier_path: &PathBuf) -> Result<()> {
    let carrier = Carrier::from_file(carrier_path)
        .with_context(|| format!("Failed to load carrier {}", carrier_path.display()))?;

    println!("Carrier: {}", carrier_path.display());
    println!("  Kind: {}", carrier.kind());

    match &carrier {
        Carrier::Image(img) => {
            use image::GenericImageView;
            let (width, height) = img.image().dimensions();
            println!("  Dimensions: {width}x{height}");
        }
        Carrier::Audio(audio) => {
            let spec = audio.spec();
            println!("  Samples: {}", audio.sample_count());
            println!(
                "  Duration: {:.2}s ({} ch, {} Hz)",
                audio.duration_secs(),
                spec.channels,
                spec.sample_rate
            );
        }
    }

    println!("  Capacity: {} bytes", carrier.capacity());

    Ok(())
}
