use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum BinderError {
    #[error("Binder not found: {0}")]
    BinderNotFound(Uuid),

    #[error("Card not found: {0}")]
    CardNotFound(Uuid),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),

    #[error("Precondition violated: {0}")]
    Precondition(String),

    #[error("Invalid binder geometry: {rows}x{columns}, {pages} page(s)")]
    InvalidGeometry {
        rows: usize,
        columns: usize,
        pages: usize,
    },

    #[error("Slot {index} is outside the binder (0..{total_slots})")]
    SlotOutOfRange { index: usize, total_slots: usize },

    #[error("Slot {0} is already occupied")]
    SlotOccupied(usize),

    #[error("Page {page} does not exist (binder has {total_pages} page(s))")]
    PageOutOfRange { page: usize, total_pages: usize },

    #[error("Multi-page moves are not supported: {0}")]
    MultiPageMove(String),

    #[error("Batch write failed for binder {binder} ({failed} update(s) rejected): {reason}")]
    BatchWrite {
        binder: Uuid,
        failed: usize,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, BinderError>;
