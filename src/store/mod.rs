//! Object store access.
//!
//! The relay only ever needs one capability from storage: read a whole object
//! by key and report its declared content type. [`ObjectStore`] captures that
//! capability so the request pipeline can be exercised without S3.

mod object_store;
mod s3_store;

pub use object_store::{FetchedObject, ObjectStore};
pub use s3_store::{create_s3_client, S3ObjectStore};
