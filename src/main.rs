//! # Qrsmith CLI
//!
//! Command-line interface for QR code generation and scanning.
//!
//! ## Usage
//!
//! ```bash
//! # Generate a QR code for a URL
//! qrsmith generate --text "https://example.com"
//!
//! # Styled output with a logo (use -e Q or H with logos)
//! qrsmith generate --text "https://example.com" --fg "#112233" -e H --logo logo.png
//!
//! # vCard contact code
//! qrsmith generate --qr-type vcard --name "John Doe" --phone "+1234567890"
//!
//! # Decode a QR image
//! qrsmith scan photo.png
//!
//! # Run the web UI
//! qrsmith serve --listen 0.0.0.0:8080
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;

use qrsmith::{
    error::QrsmithError,
    generate::generate,
    model::{Color, ErrorLevel, OutputFormat, QrPayload, QrRequest},
    scan,
    server::{self, ServerConfig},
};

/// Qrsmith - QR code generator and scanner
#[derive(Parser, Debug)]
#[command(name = "qrsmith")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum QrTypeArg {
    /// Plain text or a URL
    Text,
    /// Contact card (requires --name and --phone)
    Vcard,
    /// Email address (encoded as mailto:)
    Email,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a QR code and write it to a file
    Generate {
        /// What kind of payload to encode
        #[arg(long, value_enum, default_value = "text")]
        qr_type: QrTypeArg,

        /// Text or URL to encode (text type)
        #[arg(long)]
        text: Option<String>,

        /// Contact name (vcard type)
        #[arg(long)]
        name: Option<String>,

        /// Contact phone, + followed by 10-15 digits (vcard type)
        #[arg(long)]
        phone: Option<String>,

        /// Email address (vcard optional field, or the email type)
        #[arg(long)]
        email: Option<String>,

        /// Foreground color as #RRGGBB
        #[arg(long, default_value = "#000000")]
        fg: String,

        /// Background color as #RRGGBB
        #[arg(long, default_value = "#FFFFFF")]
        bg: String,

        /// Module pixel size (1-10)
        #[arg(long, default_value = "5")]
        scale: u32,

        /// Error correction level: L, M, Q or H (use Q or H with a logo)
        #[arg(short, long, default_value = "M")]
        error_level: String,

        /// Logo image to overlay at the center (PNG/JPG)
        #[arg(long, value_name = "FILE")]
        logo: Option<PathBuf>,

        /// Output format: PNG, JPG, JPEG or SVG
        #[arg(long, default_value = "PNG")]
        format: String,

        /// Output path (defaults to qr_code.<ext>)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Decode the first QR code found in an image
    Scan {
        /// Image file to scan
        image: PathBuf,
    },

    /// Start the web UI server
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8080")]
        listen: String,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), QrsmithError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            qr_type,
            text,
            name,
            phone,
            email,
            fg,
            bg,
            scale,
            error_level,
            logo,
            format,
            output,
        } => {
            let payload = match qr_type {
                QrTypeArg::Text => QrPayload::TextUrl {
                    text: text.unwrap_or_default(),
                },
                QrTypeArg::Vcard => QrPayload::Vcard {
                    name: name.unwrap_or_default(),
                    phone: phone.unwrap_or_default(),
                    email: email.clone().unwrap_or_default(),
                },
                QrTypeArg::Email => QrPayload::Email {
                    address: email.unwrap_or_default(),
                },
            };

            let error_level = ErrorLevel::parse(&error_level).ok_or_else(|| {
                QrsmithError::Validation(format!(
                    "Invalid error correction level '{error_level}' (use L, M, Q or H)."
                ))
            })?;
            let format = OutputFormat::parse(&format).ok_or_else(|| {
                QrsmithError::Validation(format!(
                    "Invalid format '{format}' (use PNG, JPG, JPEG or SVG)."
                ))
            })?;

            let logo = match logo {
                Some(path) => Some(
                    image::open(&path)
                        .map_err(|e| QrsmithError::Image(format!("Failed to open logo: {e}")))?,
                ),
                None => None,
            };

            let request = QrRequest {
                payload,
                foreground: Color::from_hex(&fg)?,
                background: Color::from_hex(&bg)?,
                scale: scale.clamp(1, 10),
                error_level,
                logo,
                format,
            };

            let artifact = generate(&request)?;
            let path = output.unwrap_or_else(|| PathBuf::from(artifact.download_name()));
            fs::write(&path, &artifact.bytes)?;
            println!("Saved {} ({} bytes)", path.display(), artifact.bytes.len());
        }

        Commands::Scan { image } => {
            let img = image::open(&image)
                .map_err(|e| QrsmithError::Image(format!("Failed to open image: {e}")))?;
            println!(
                "Scanning {} ({}x{})...",
                image.display(),
                img.width(),
                img.height()
            );
            let data = scan::decode_first(&img)?;
            println!("Hidden Message: {data}");
        }

        Commands::Serve { listen } => {
            let config = ServerConfig {
                listen_addr: listen,
            };
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(config))?;
        }
    }

    Ok(())
}
