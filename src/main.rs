// Command line front end: reads OCR text produced by an external engine,
// prints the extracted identity and, when a claim is given, the verification

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Parser;
use idscan::{ClaimedIdentity, ExtractionOptions, IdScanError, IdentityExtractor, IdentityVerifier};
use log::info;

#[derive(Parser, Debug)]
#[command(name = "idscan", about = "Extract and verify identity card fields from OCR text")]
struct Args {
    /// OCR text file, or `-` for stdin
    input: PathBuf,

    /// JSON file with extraction options
    #[arg(long)]
    options: Option<PathBuf>,

    /// Also extract the date of birth
    #[arg(long)]
    date_of_birth: bool,

    #[arg(long)]
    first_name: Option<String>,

    #[arg(long)]
    last_name: Option<String>,

    #[arg(long)]
    id_number: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn read_input(input: &Path) -> Result<Vec<u8>, IdScanError> {
    let mut raw = Vec::new();
    if input.as_os_str() == "-" {
        std::io::stdin().read_to_end(&mut raw)?;
    } else {
        raw = std::fs::read(input)?;
    }
    Ok(raw)
}

fn run(args: Args) -> Result<(), IdScanError> {
    let mut options = match &args.options {
        Some(path) => ExtractionOptions::from_json_file(path)?,
        None => ExtractionOptions::default(),
    };
    if args.date_of_birth {
        options.extract_date_of_birth = true;
    }

    let raw = read_input(&args.input)?;
    info!("read {} bytes of OCR text from {:?}", raw.len(), args.input);

    let output = match (&args.first_name, &args.last_name, &args.id_number) {
        (Some(first), Some(last), Some(id)) => {
            let claim = ClaimedIdentity::new(first, last, id);
            let verification = IdentityVerifier::with_options(options).verify_bytes(&raw, &claim)?;
            to_json(&verification, args.pretty)?
        }
        _ => {
            let identity = IdentityExtractor::with_options(options).extract_bytes(&raw)?;
            to_json(&identity, args.pretty)?
        }
    };

    println!("{}", output);
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String, IdScanError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn main() {
    env_logger::init();

    if let Err(err) = run(Args::parse()) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
