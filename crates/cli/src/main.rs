//! Interactive driver CLI for the downscaler co-simulation.
//!
//! This binary is pure I/O glue around the driver core. It performs:
//! 1. **Run:** Connect, load an image, push `IMAGE_CONFIG`, stream pixels,
//!    then drop into the interactive command loop.
//! 2. **Shell:** Connect only and drop straight into the command loop.
//!
//! `HELP` and `EXIT` are handled here and never reach the core.

use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::{fs, process};

use downlink_core::config::{Mode, defaults};
use downlink_core::link::TcpLink;
use downlink_core::session::Outcome;
use downlink_core::{DriverError, Session, SessionConfig, raster};

#[derive(Parser, Debug)]
#[command(
    name = "dlk",
    author,
    version,
    about = "Driver for the FPGA image-downscaler co-simulation",
    long_about = "Connect to the downscaler device, stream an image, and issue test commands.\n\nExamples:\n  dlk run -i images/input.png --scale 0.5\n  dlk run -i input.png --config session.json -o result.png\n  dlk shell --host 192.168.1.20 --port 2540"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load an image, configure the device, stream pixels, then go interactive.
    Run {
        /// Source image file (any common format; converted to 8-bit grayscale).
        #[arg(short, long)]
        image: PathBuf,

        /// Device host.
        #[arg(long, default_value = defaults::HOST)]
        host: String,

        /// Device TCP port.
        #[arg(long, default_value_t = defaults::PORT)]
        port: u16,

        /// Downscale factor in [0.5, 1.0].
        #[arg(long, default_value_t = defaults::SCALE)]
        scale: f32,

        /// Processing mode.
        #[arg(long, value_enum, default_value_t = CliMode::Sequential)]
        mode: CliMode,

        /// Enable the device debug flag.
        #[arg(long)]
        debug: bool,

        /// SIMD lane count (0-7; only meaningful with --mode simd).
        #[arg(long, default_value_t = 0)]
        simd: u8,

        /// Session configuration as JSON, overriding the flags above.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Where to save the grayscale copy of the input.
        #[arg(long)]
        gray_copy: Option<PathBuf>,

        /// Where to save reconstructed images from READ_IMAGE.
        #[arg(short, long, default_value = "downscaled.png")]
        output: PathBuf,
    },

    /// Connect without loading an image and go straight to the command loop.
    Shell {
        /// Device host.
        #[arg(long, default_value = defaults::HOST)]
        host: String,

        /// Device TCP port.
        #[arg(long, default_value_t = defaults::PORT)]
        port: u16,

        /// Where to save reconstructed images from READ_IMAGE.
        #[arg(short, long, default_value = "downscaled.png")]
        output: PathBuf,
    },
}

/// Processing mode as exposed on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliMode {
    /// One pixel at a time.
    Sequential,
    /// Lane-parallel processing.
    Simd,
}

impl From<CliMode> for Mode {
    fn from(mode: CliMode) -> Self {
        match mode {
            CliMode::Sequential => Mode::Sequential,
            CliMode::Simd => Mode::Simd,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            image,
            host,
            port,
            scale,
            mode,
            debug,
            simd,
            config,
            gray_copy,
            output,
        } => {
            let mut session = connect(&host, port);

            println!("[*] Loading image: {}", image.display());
            let buffer =
                raster::load_gray(&image, gray_copy.as_deref()).unwrap_or_else(|e| {
                    eprintln!("[!] Cannot load {}: {}", image.display(), e);
                    process::exit(1);
                });

            let session_config = match config {
                Some(path) => load_config_file(&path),
                None => SessionConfig {
                    width: buffer.width as u16,
                    height: buffer.height as u16,
                    scale,
                    mode: mode.into(),
                    debug,
                    simd_lanes: simd,
                },
            };

            session.load_image(buffer);

            match session.configure(session_config) {
                Ok(response) => println!("[*] IMAGE_CONFIG acknowledged: {response}"),
                Err(e) => fatal(&e),
            }
            match session.write_pixels() {
                Ok(words) => println!("[*] Streamed {words} pixel words"),
                Err(e) => fatal(&e),
            }

            command_loop(&mut session, &output);
        }
        Commands::Shell { host, port, output } => {
            let mut session = connect(&host, port);
            command_loop(&mut session, &output);
        }
    }
}

/// Connects to the device or exits with a message.
fn connect(host: &str, port: u16) -> Session<TcpLink> {
    println!("[*] Connecting to {host}:{port}");
    Session::connect(host, port).unwrap_or_else(|e| {
        eprintln!("[!] Connection failed: {e}");
        process::exit(1);
    })
}

/// Reads a JSON session configuration or exits with a message.
fn load_config_file(path: &PathBuf) -> SessionConfig {
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("[!] Cannot read {}: {}", path.display(), e);
        process::exit(1);
    });
    serde_json::from_str(&text).unwrap_or_else(|e| {
        eprintln!("[!] Bad config {}: {}", path.display(), e);
        process::exit(1);
    })
}

/// The manual command loop: one line in, one outcome printed.
///
/// Transport failures are fatal; every other error is reported and the loop
/// continues. Reconstructed images are saved to `output`.
fn command_loop<T: downlink_core::link::Transport>(session: &mut Session<T>, output: &PathBuf) {
    let stdin = io::stdin();
    loop {
        print!("downlink> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line.to_ascii_uppercase().as_str() {
            "EXIT" => break,
            "HELP" => {
                print_help();
                continue;
            }
            _ => {}
        }

        match session.execute(line) {
            Ok(Outcome::Response(response)) => println!("{response}"),
            Ok(Outcome::Streamed(words)) => println!("[*] Streamed {words} pixel words"),
            Ok(Outcome::Raster(buffer)) => {
                if buffer.is_empty() {
                    println!("[*] Nothing to read (0 expected pixels)");
                } else if let Err(e) = raster::save_gray(&buffer, output) {
                    eprintln!("[!] Cannot save {}: {}", output.display(), e);
                } else {
                    println!(
                        "[*] Saved {}x{} image to {}",
                        buffer.width,
                        buffer.height,
                        output.display()
                    );
                }
            }
            Err(e @ DriverError::Transport(_)) => fatal(&e),
            Err(e) => eprintln!("[!] {e}"),
        }
    }
}

/// Reports a fatal error and terminates; the session cannot continue.
fn fatal(error: &DriverError) -> ! {
    eprintln!("[!] FATAL: {error}");
    process::exit(1);
}

fn print_help() {
    println!(
        "Available commands:
  START                                                          Begin processing the streamed image.
  STEP                                                           Advance one step (debug mode).
  IMAGE_CONFIG <width> <height> <scale> <mode> <debug> <simd>    Configure image parameters.
  WRITE_PIXELS                                                   Stream the loaded image data.
  READ_REG <reg_name/reg_address>                                Read one device register.
  READ_IMAGE                                                     Read back the downscaled image.
  HELP                                                           Show this help.
  EXIT                                                           Leave the session."
    );
}
