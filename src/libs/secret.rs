//! Encrypted on-disk storage for a single secret (the AI API key).
//!
//! The value is AES-256-CBC encrypted with the key/IV baked in by `build.rs`
//! and stored base64-encoded in the data directory.

use super::data_storage::DataStorage;
use aes::Aes256;
use anyhow::{anyhow, Result};
use base64::prelude::*;
use block_modes::block_padding::Pkcs7;
use block_modes::{BlockMode, Cbc};
use dialoguer::{theme::ColorfulTheme, Password};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

include!(concat!(env!("OUT_DIR"), "/app_metadata.rs"));

type Aes256Cbc = Cbc<Aes256, Pkcs7>;

pub const AI_SECRET_FILE_NAME: &str = ".ai_secret";

#[derive(Clone, Debug)]
pub struct Secret {
    prompt: String,
    secret_file_path: PathBuf,
    key: Vec<u8>,
    iv: Vec<u8>,
}

impl Secret {
    pub fn new(secret_name: &str, prompt: &str) -> Self {
        let secret_file_path = DataStorage::new().get_path(secret_name).unwrap_or_else(|_| PathBuf::from(secret_name));
        Self::at(secret_file_path, prompt)
    }

    /// Secret stored at an explicit path.
    pub fn at(path: impl Into<PathBuf>, prompt: &str) -> Self {
        Self {
            prompt: prompt.to_owned(),
            secret_file_path: path.into(),
            key: APP_METADATA_ENCRYPTION_KEY.to_vec(),
            iv: APP_METADATA_ENCRYPTION_IV.to_vec(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.secret_file_path
    }

    /// Stored value, if the secret file exists and decrypts cleanly.
    pub fn get(&self) -> Option<String> {
        if !self.secret_file_path.exists() {
            return None;
        }
        self.decrypt().ok()
    }

    pub fn get_or_prompt(&self) -> Result<String> {
        match self.get() {
            Some(value) => Ok(value),
            None => self.prompt(),
        }
    }

    pub fn prompt(&self) -> Result<String> {
        let value = Password::with_theme(&ColorfulTheme::default()).with_prompt(&self.prompt).interact()?;
        self.store(&value)?;
        Ok(value)
    }

    pub fn store(&self, value: &str) -> Result<()> {
        let cipher = Aes256Cbc::new_from_slices(&self.key, &self.iv).map_err(|e| anyhow!(e.to_string()))?;
        let ciphertext = cipher.encrypt_vec(value.as_bytes());
        let encoded = BASE64_STANDARD.encode(ciphertext);

        if let Some(parent) = self.secret_file_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = File::create(&self.secret_file_path)?;
        file.write_all(encoded.as_bytes())?;
        Ok(())
    }

    fn decrypt(&self) -> Result<String> {
        let mut file = File::open(&self.secret_file_path)?;
        let mut encoded = String::new();
        file.read_to_string(&mut encoded)?;
        let ciphertext = BASE64_STANDARD.decode(encoded.trim())?;
        let cipher = Aes256Cbc::new_from_slices(&self.key, &self.iv).map_err(|e| anyhow!(e.to_string()))?;
        let decrypted = cipher.decrypt_vec(&ciphertext).map_err(|e| anyhow!(e.to_string()))?;
        Ok(String::from_utf8(decrypted)?)
    }
}
