//! File sniffing example.
//!
//! Detects the media type of a file with a small built-in signature set, or
//! with signatures loaded from a JSON array of signature descriptions.
//!
//! Run with:
//!     cargo run --example sniff_file -- <path> [signatures.json]
//!
//! Set `RUST_LOG=sniffrs=trace` to watch each signature being tried.

use std::fs::File;
use std::io::BufReader;

use sniffrs::{
    CompositeDetector, DeclaredTypeDetector, Detector, Metadata, SeekRewind, SignatureConfig,
};
use tracing_subscriber::EnvFilter;

const BUILTIN: &str = r#"[
    { "media-type": "application/pdf", "pattern": "%PDF" },
    { "media-type": "image/png", "pattern": "89504e470d0a1a0a", "encoding": "hex" },
    { "media-type": "image/jpeg", "pattern": "ffd8ff", "encoding": "hex" },
    { "media-type": "image/gif", "pattern": "GIF8[79]a", "match-mode": "regex" },
    { "media-type": "image/bmp", "pattern": "BM" },
    { "media-type": "application/zip", "pattern": "PK\u0003\u0004" },
    { "media-type": "application/x-tar", "pattern": "ustar", "offset": "257" },
    { "media-type": "application/x-iso9660-image", "pattern": "CD001", "offset": "32769:34817" }
]"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .ok_or("usage: sniff_file <path> [signatures.json]")?;

    let signatures: Vec<SignatureConfig> = match args.next() {
        Some(config_path) => serde_json::from_reader(BufReader::new(File::open(config_path)?))?,
        None => serde_json::from_str(BUILTIN)?,
    };

    let mut detector = CompositeDetector::new();
    for signature in &signatures {
        let magic = signature.build()?;
        println!("loaded {magic}");
        detector.push(magic);
    }
    detector.push(DeclaredTypeDetector);

    let mut metadata = Metadata::new();
    metadata.set(Metadata::RESOURCE_NAME, path.as_str());

    let mut stream = SeekRewind::new(BufReader::new(File::open(&path)?));
    let found = detector.detect(Some(&mut stream), &metadata)?;

    println!("\n{path}: {found}");

    Ok(())
}
