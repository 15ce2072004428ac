use dotenv::dotenv;
use std::env;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use toml::Value;

struct AppMetadata {
    file: std::fs::File,
}

impl AppMetadata {
    pub fn new() -> io::Result<Self> {
        let out_dir = env::var("OUT_DIR").map_err(io::Error::other)?;
        let dest_path = Path::new(&out_dir).join("app_metadata.rs");
        let file = File::create(&dest_path)?;
        Ok(Self { file })
    }

    pub fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
        write!(
            self.file,
            "#[allow(unused)]\npub const APP_METADATA_{}: &str = \"{}\";\n",
            &key.to_uppercase(),
            &value
        )
    }

    pub fn write_bytes(&mut self, key: &str, value: &[u8]) -> io::Result<()> {
        write!(
            self.file,
            "#[allow(unused)]\npub const APP_METADATA_{}: &[u8; {}] = &[",
            &key.to_uppercase(),
            value.len()
        )?;

        for (i, byte) in value.iter().enumerate() {
            if i > 0 {
                write!(self.file, ", ")?;
            }
            write!(self.file, "{}", byte)?;
        }

        writeln!(self.file, "];")
    }
}

/// Pads or truncates `seed` to exactly `len` bytes.
fn fit_key(seed: String, len: usize) -> Vec<u8> {
    let mut key = seed.into_bytes();
    key.truncate(len);
    key.resize(len, b'!');
    key
}

fn main() -> io::Result<()> {
    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-env-changed=TASKDESK_ENCRYPTION_KEY");
    println!("cargo:rerun-if-env-changed=TASKDESK_ENCRYPTION_IV");

    // Load .env file if it exists
    let _ = dotenv();

    let cargo_toml = fs::read_to_string("Cargo.toml")?;
    let cargo_toml: Value = toml::from_str(&cargo_toml).map_err(io::Error::other)?;

    let mut app_metadata = AppMetadata::new()?;
    let package_name = env::var("CARGO_PKG_NAME").unwrap_or_else(|_| "taskdesk".to_string());
    app_metadata.write("NAME", &package_name)?;
    app_metadata.write("VERSION", &env::var("CARGO_PKG_VERSION").unwrap_or_default())?;

    if let Some(metadata) = cargo_toml.get("package").and_then(|pkg| pkg.get("metadata")).and_then(|meta| meta.as_table()) {
        for (key, value) in metadata {
            if let Some(value) = value.as_str() {
                app_metadata.write(key, value)?;
            }
        }
    }

    // Keys for the API key secret file
    let (encryption_key, encryption_iv) = match (env::var("TASKDESK_ENCRYPTION_KEY"), env::var("TASKDESK_ENCRYPTION_IV")) {
        (Ok(key), Ok(iv)) => {
            if key.len() != 32 {
                println!("cargo:warning=TASKDESK_ENCRYPTION_KEY must be 32 bytes, got {}; it will be padded or truncated", key.len());
            }
            if iv.len() != 16 {
                println!("cargo:warning=TASKDESK_ENCRYPTION_IV must be 16 bytes, got {}; it will be padded or truncated", iv.len());
            }
            (fit_key(key, 32), fit_key(iv, 16))
        }
        _ => {
            println!("cargo:warning=TASKDESK_ENCRYPTION_KEY or TASKDESK_ENCRYPTION_IV not set, using package defaults.");
            (
                fit_key(format!("{}_default_encryption_key_32b", package_name), 32),
                fit_key(format!("{}_iv_16b", package_name), 16),
            )
        }
    };

    app_metadata.write_bytes("ENCRYPTION_KEY", &encryption_key)?;
    app_metadata.write_bytes("ENCRYPTION_IV", &encryption_iv)?;

    Ok(())
}
