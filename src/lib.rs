//! Galerie Core Library
//!
//! This crate provides the core media-library logic for Galerie, a gallery
//! admin backend. It is designed to be frontend-agnostic: the picker
//! controllers hold all selection and filtering state, and the host UI
//! (web admin, desktop shell) only renders and forwards user intent.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Data structures (Media, Artist, queries, patches)
//! - `api`: Backend abstraction (MediaBackend trait), HTTP client, test backend
//! - `picker`: Media picker domain (catalog, filters, selection, ordering, sessions)
//! - `utils`: Error handling
//!
//! # Example
//!
//! ```no_run
//! use galerie_core::{AuthContext, HttpBackend, MultiMediaPicker, PickerOptions};
//!
//! # async fn run() -> galerie_core::AppResult<()> {
//! let backend = HttpBackend::new("https://galerie.example.com");
//! let auth = AuthContext::with_token("jwt-token");
//! let mut picker = MultiMediaPicker::new(backend, auth, PickerOptions::default());
//!
//! // Open a session seeded with the host field's current value
//! picker.open(&["media-12".to_string()]).await?;
//! picker.toggle("media-34");
//!
//! // Only commit hands a value back to the host
//! let commit = picker.commit();
//! println!("selected {} items", commit.ids.len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod models;
pub mod picker;
pub mod utils;

// Re-export commonly used types
pub use api::{AuthContext, HttpBackend, MediaBackend};
pub use models::{
    Artist, ArtistQuery, FieldPatch, Media, MediaPatch, MediaQuery, UploadRequest,
};
pub use picker::{
    Catalog, CatalogSnapshot, DateFilter, DragReorder, FilterState, GridState, MediaBinding,
    MediaPicker, MediaSort, MultiCommit, MultiMediaPicker, MultiSelection, PickerOptions,
    SelectOutcome, SingleCommit, SingleSelection, ToggleResult, UploadBatchResult, UploadFailure,
};
pub use utils::{AppError, AppResult};
