use thiserror::Error;

/// Failures raised while decoding an archive or any of its lumps.
///
/// `Format` is fatal to the operation that detected it and always
/// propagated. `Lookup` is fatal to the single resolution that needed
/// the lump. The texture directory decoder is the one place either is
/// caught instead of propagated: a bad texture record is recorded and
/// skipped so the rest of the lump still decodes.
#[derive(Debug, Clone, Error)]
pub enum WadError {
    /// Malformed bytes: bad magic, truncated header or directory, an
    /// offset/size outside the buffer, a picture column with no end
    /// marker, an undersized palette.
    #[error("bad WAD data: {0}")]
    Format(String),
    /// A required named lump is not present.
    #[error("no lump named {0}")]
    Lookup(String),
}

pub type Result<T> = std::result::Result<T, WadError>;
