use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::engine::{CancellationToken, Engine};
use crate::media::payload::PayloadEntry;
use crate::media::Carrier;
use crate::InvisioError;

use super::Password;

/// used whenever a hidden name has no usable file name component
const FALLBACK_FILE_NAME: &str = "unnamed";

pub fn prepare() -> UnveilApi {
    UnveilApi::default()
}

#[derive(Default, Debug)]
pub struct UnveilApi {
    secret_media: Option<PathBuf>,
    output_folder: Option<PathBuf>,
    password: Password,
    cancellation: CancellationToken,
}

impl UnveilApi {
    /// This is the secret image that contains the data to be unveiled
    pub fn from_secret_file(mut self, secret_image: impl AsRef<Path>) -> Self {
        self.secret_media = Some(secret_image.as_ref().to_path_buf());
        self
    }

    /// This is the folder where the data will be saved to
    pub fn into_output_folder(mut self, output_folder: impl AsRef<Path>) -> Self {
        self.output_folder = Some(output_folder.as_ref().to_path_buf());
        self
    }

    /// Set the password used for decrypting all data
    /// If `None` is passed, the hidden data is expected to be unencrypted
    pub fn using_password<P: Into<Password>>(mut self, password: P) -> Self {
        self.password = password.into();
        self
    }

    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    /// Recovers all hidden files in memory, nothing is written
    pub fn extract(self) -> Result<Vec<PayloadEntry>, InvisioError> {
        let Some(secret_media) = self.secret_media else {
            return Err(InvisioError::CarrierNotSet);
        };

        let carrier = Carrier::from_secret_file(&secret_media)?;
        Engine::default()
            .with_cancellation(self.cancellation)
            .extract(carrier.image(), self.password.as_deref())
    }

    /// Execute the unveil process and blocks until it is finished.
    ///
    /// Existing files in the output folder are never overwritten, a clashing
    /// `name.ext` is written as `name_1.ext`, `name_2.ext` and so on.
    pub fn execute(mut self) -> Result<Vec<PathBuf>, InvisioError> {
        let Some(output_folder) = self.output_folder.take() else {
            return Err(InvisioError::TargetNotSet);
        };

        let entries = self.extract()?;
        let mut written = Vec::with_capacity(entries.len());
        for entry in entries {
            let (name, content) = entry.into_parts();
            written.push(write_unique(&output_folder, &name, &content)?);
        }

        Ok(written)
    }
}

/// reduces a hidden name to its last path component
pub fn sanitize_file_name(name: &str) -> String {
    let name = name.replace('\\', "/");
    Path::new(&name)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .unwrap_or(FALLBACK_FILE_NAME)
        .to_string()
}

fn write_unique(folder: &Path, name: &str, content: &[u8]) -> Result<PathBuf, InvisioError> {
    let name = sanitize_file_name(name);
    let stem = Path::new(&name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(FALLBACK_FILE_NAME)
        .to_string();
    let extension = Path::new(&name).extension().and_then(|e| e.to_str());

    let mut target = folder.join(&name);
    let mut attempt = 0;
    let mut file = loop {
        match create_new(&target) {
            Ok(file) => break file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                attempt += 1;
                let candidate = match extension {
                    Some(ext) => format!("{stem}_{attempt}.{ext}"),
                    None => format!("{stem}_{attempt}"),
                };
                target = folder.join(candidate);
            }
            Err(source) => return Err(InvisioError::WriteError { source }),
        }
    };

    file.write_all(content)
        .map_err(|source| InvisioError::WriteError { source })?;
    log::debug!("unveiled {} bytes into {target:?}", content.len());

    Ok(target)
}

fn create_new(path: &Path) -> io::Result<File> {
    OpenOptions::new().write(true).create_new(true).open(path)
}
