use thiserror::Error;

/// Everything the simulator can report to a caller. Any condition not listed
/// here is absorbed internally: absent numeric fields default to zero,
/// unmatched ingredient sets fall back to the failure recipe, and caps clamp
/// silently.
#[derive(Debug, Error)]
pub enum Error {
    /// The ingredient list had zero entries.
    #[error("material list is empty")]
    EmptyMaterialList,

    /// An ingredient display name is not in the locale index.
    #[error("unknown material: {0}")]
    InvalidMaterial(String),

    /// A catalog table is missing or failed to parse.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
}

pub type Result<T> = std::result::Result<T, Error>;
