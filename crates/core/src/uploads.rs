//! Upload policies and stored-file naming.
//!
//! Stored names follow `<KIND>_<alumniId>_<token><ext>` so files written by
//! earlier deployments stay addressable.

use crate::error::CoreError;
use crate::types::DbId;

/// 1 MiB.
pub const MAX_PHOTO_BYTES: usize = 1024 * 1024;

/// 2 MiB.
pub const MAX_CERTIFICATE_BYTES: usize = 2 * 1024 * 1024;

pub const PHOTO_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png"];

pub const CERTIFICATE_CONTENT_TYPES: &[&str] = &["application/pdf"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Photo,
    Certificate,
}

impl UploadKind {
    /// File-name prefix.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Photo => "FOTO",
            Self::Certificate => "SERTIF",
        }
    }

    /// Sub-directory under the upload root.
    pub fn directory(self) -> &'static str {
        match self {
            Self::Photo => "foto",
            Self::Certificate => "sertifikat",
        }
    }

    pub fn max_bytes(self) -> usize {
        match self {
            Self::Photo => MAX_PHOTO_BYTES,
            Self::Certificate => MAX_CERTIFICATE_BYTES,
        }
    }

    pub fn allowed_content_types(self) -> &'static [&'static str] {
        match self {
            Self::Photo => PHOTO_CONTENT_TYPES,
            Self::Certificate => CERTIFICATE_CONTENT_TYPES,
        }
    }

    /// Check an incoming file against this kind's limits.
    ///
    /// Photos are checked for size first, certificates for type first.
    pub fn validate(self, size: usize, content_type: &str) -> Result<(), CoreError> {
        match self {
            Self::Photo => {
                self.check_size(size)?;
                self.check_type(content_type)
            }
            Self::Certificate => {
                self.check_type(content_type)?;
                self.check_size(size)
            }
        }
    }

    fn check_size(self, size: usize) -> Result<(), CoreError> {
        if size > self.max_bytes() {
            return Err(CoreError::Validation(format!(
                "File size exceeds the {} MB limit",
                self.max_bytes() / (1024 * 1024)
            )));
        }
        Ok(())
    }

    fn check_type(self, content_type: &str) -> Result<(), CoreError> {
        let allowed = self.allowed_content_types();
        if !allowed.contains(&content_type) {
            let message = match self {
                Self::Photo => "Only JPEG and PNG images are allowed",
                Self::Certificate => "Only PDF files are allowed",
            };
            return Err(CoreError::Validation(message.into()));
        }
        Ok(())
    }
}

/// Everything from the last dot of the final path element, dot included.
/// Dotfiles keep their whole name (`.bashrc`); no dot gives an empty string.
pub fn extension_of(original_name: &str) -> String {
    let base = original_name.rsplit('/').next().unwrap_or(original_name);
    base.rfind('.')
        .map(|dot| base[dot..].to_string())
        .unwrap_or_default()
}

/// Build the stored file name `<KIND>_<alumniId>_<token><ext>`.
pub fn stored_file_name(
    kind: UploadKind,
    alumni_id: DbId,
    token: &str,
    original_name: &str,
) -> String {
    format!(
        "{}_{}_{}{}",
        kind.prefix(),
        alumni_id,
        token,
        extension_of(original_name)
    )
}
