//! Report archive backed by Apache OpenDAL.
//!
//! Finished PDFs can be kept on:
//! - S3-compatible storage: Cloudflare R2, Supabase Storage, AWS S3, MinIO
//! - Local filesystem
//!
//! ```text
//! store("rapport.pdf")
//!   write  .tmp/<uuid>-rapport.pdf
//!   rename .tmp/<uuid>-rapport.pdf -> reports/rapport.pdf
//! ```

mod error;
mod service;

pub use error::StorageError;
pub use service::{DocumentStore, StoredDocument, sanitize_filename};
