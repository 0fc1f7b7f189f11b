use super::data_storage::DataStorage;
use aes::Aes256;
use anyhow::Result;
use base64::prelude::*;
use block_modes::block_padding::Pkcs7;
use block_modes::{BlockMode, Cbc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

// Encryption key and IV embedded at build time
include!(concat!(env!("OUT_DIR"), "/app_metadata.rs"));

type Aes256Cbc = Cbc<Aes256, Pkcs7>;

/// File name of the persisted auth session.
pub const SESSION_FILE: &str = ".session";

/// Encrypted on-disk slot for one serializable value.
///
/// The value is serialized to JSON, AES-256-CBC encrypted with the build-time
/// key and stored base64 encoded. Used to keep the auth session between runs.
#[derive(Clone, Debug)]
pub struct SessionCache {
    file_path: PathBuf,
    key: Vec<u8>,
    iv: Vec<u8>,
}

impl SessionCache {
    /// Cache stored as `file_name` in the application data directory.
    pub fn new(file_name: &str) -> Self {
        let file_path = DataStorage::new().get_path(file_name).unwrap_or_else(|_| PathBuf::from(file_name));
        Self::at(file_path)
    }

    pub fn at(file_path: PathBuf) -> Self {
        Self {
            file_path,
            key: APP_METADATA_ENCRYPTION_KEY.to_vec(),
            iv: APP_METADATA_ENCRYPTION_IV.to_vec(),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.file_path
    }

    /// Returns the stored value, `None` when nothing has been saved yet.
    pub fn load<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        if !self.file_path.exists() {
            return Ok(None);
        }
        let encoded = fs::read_to_string(&self.file_path)?;
        let plaintext = self.decrypt(encoded.trim())?;
        Ok(Some(serde_json::from_slice(&plaintext)?))
    }

    pub fn save<T: Serialize>(&self, value: &T) -> Result<()> {
        let plaintext = serde_json::to_vec(value)?;
        let encoded = self.encrypt(&plaintext)?;

        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = File::create(&self.file_path)?;
        file.write_all(encoded.as_bytes())?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.file_path, fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    /// Deletes the stored value. Missing files are not an error.
    pub fn clear(&self) -> Result<()> {
        if self.file_path.exists() {
            fs::remove_file(&self.file_path)?;
        }
        Ok(())
    }

    fn encrypt(&self, plaintext: &[u8]) -> Result<String> {
        let cipher = Aes256Cbc::new_from_slices(&self.key, &self.iv)?;
        Ok(BASE64_STANDARD.encode(cipher.encrypt_vec(plaintext)))
    }

    fn decrypt(&self, encoded: &str) -> Result<Vec<u8>> {
        let ciphertext = BASE64_STANDARD.decode(encoded)?;
        let cipher = Aes256Cbc::new_from_slices(&self.key, &self.iv)?;
        Ok(cipher.decrypt_vec(&ciphertext)?)
    }
}
