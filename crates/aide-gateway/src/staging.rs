// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Upload staging on the local filesystem.
//!
//! Uploaded bytes arrive base64-encoded (optionally as a `data:` URL), are
//! written to a kept temporary file, and referenced by path until the
//! assistant releases them.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use tracing::debug;

use aide_core::{AideError, Attachment, AttachmentStaging, Collaborator, CollaboratorKind};

/// One uploaded file as sent by a client.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    /// Base64 payload, with or without a `data:<type>;base64,` prefix.
    pub data: String,
    #[serde(rename = "type", default)]
    pub media_type: Option<String>,
}

/// Stages uploads as files under one directory.
#[derive(Debug, Clone)]
pub struct TempDirStaging {
    dir: PathBuf,
}

impl TempDirStaging {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Uses `dir` when given, otherwise the system temp directory.
    pub fn from_config(dir: Option<&str>) -> Result<Self, AideError> {
        let dir = dir.map(PathBuf::from).unwrap_or_else(std::env::temp_dir);
        std::fs::create_dir_all(&dir).map_err(|e| {
            AideError::Config(format!("cannot create staging dir {}: {e}", dir.display()))
        })?;
        Ok(Self::new(dir))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Decodes and writes one upload.
    pub fn stage(&self, upload: &UploadedFile) -> Result<Attachment, AideError> {
        let name = sanitize_name(&upload.name);
        let bytes = decode_payload(&upload.data).map_err(|e| {
            AideError::ValidationFailed(format!("Attachment '{name}' is not valid base64: {e}"))
        })?;

        let mut file = tempfile::Builder::new()
            .prefix("aide-")
            .suffix(&format!("_{name}"))
            .tempfile_in(&self.dir)
            .map_err(|e| AideError::Internal(format!("cannot create staged file: {e}")))?;
        file.write_all(&bytes)
            .map_err(|e| AideError::Internal(format!("cannot write staged file: {e}")))?;
        let (_, path) = file
            .keep()
            .map_err(|e| AideError::Internal(format!("cannot keep staged file: {e}")))?;

        debug!(name = %name, bytes = bytes.len(), path = %path.display(), "upload staged");
        Ok(Attachment {
            name,
            media_type: upload
                .media_type
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "application/octet-stream".to_string()),
            size_bytes: bytes.len() as u64,
            storage_ref: path.to_string_lossy().into_owned(),
        })
    }

    /// Stages every upload, releasing the ones already written if any fails.
    pub async fn stage_all(&self, uploads: &[UploadedFile]) -> Result<Vec<Attachment>, AideError> {
        let mut staged = Vec::with_capacity(uploads.len());
        for upload in uploads {
            match self.stage(upload) {
                Ok(attachment) => staged.push(attachment),
                Err(e) => {
                    for attachment in &staged {
                        let _ = self.release(attachment).await;
                    }
                    return Err(e);
                }
            }
        }
        Ok(staged)
    }
}

fn decode_payload(data: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let payload = match data.strip_prefix("data:") {
        Some(rest) => rest.split_once(',').map_or(rest, |(_, b64)| b64),
        None => data,
    };
    STANDARD.decode(payload.trim())
}

/// Keeps only the final path component so names cannot escape the staging dir.
fn sanitize_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name).trim();
    if base.is_empty() || base == "." || base == ".." {
        "upload".to_string()
    } else {
        base.to_string()
    }
}

#[async_trait]
impl Collaborator for TempDirStaging {
    fn name(&self) -> &str {
        "tempdir-staging"
    }

    fn kind(&self) -> CollaboratorKind {
        CollaboratorKind::Staging
    }
}

#[async_trait]
impl AttachmentStaging for TempDirStaging {
    async fn release(&self, attachment: &Attachment) -> Result<(), AideError> {
        match tokio::fs::remove_file(&attachment.storage_ref).await {
            Ok(()) => {
                debug!(path = %attachment.storage_ref, "staged file released");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AideError::Internal(format!(
                "cannot remove {}: {e}",
                attachment.storage_ref
            ))),
        }
    }
}
