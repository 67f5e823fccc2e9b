//! On-device persistence for FOLIO_OS content.
//!
//! Raw key-value storage sits behind [`store::KeyValueStore`]; content code
//! only ever sees typed [`repository::Repository`] values, which fall back
//! to defaults instead of failing when stored data is missing or corrupt.

pub mod records;
pub mod repository;
pub mod store;

pub use records::{Certification, CertificationRepository, NewCertification, ProfileImageRepository};
pub use repository::{JsonRepository, Repository};
pub use store::{FileStore, KeyValueStore, MemoryStore};
