//! Remote store boundary.
//!
//! The codec never talks to the network. Whatever moves records to and from
//! the remote store implements [`RecordTransport`]; its failures pass through
//! as an opaque [`TransportError`].

pub mod memory;

pub use memory::*;

use thiserror::Error;

use crate::record::{RecordId, RemoteRecord};

/// Opaque transport failure, not interpreted by the codec.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct TransportError(#[from] anyhow::Error);

impl TransportError {
    pub fn msg(message: impl std::fmt::Display + std::fmt::Debug + Send + Sync + 'static) -> Self {
        Self(anyhow::Error::msg(message))
    }

    pub fn into_inner(self) -> anyhow::Error {
        self.0
    }
}

pub trait RecordTransport {
    /// Insert or update a record; returns the store's authoritative copy.
    fn submit(&self, record: RemoteRecord) -> Result<RemoteRecord, TransportError>;

    /// Fetch the current copy of a record.
    fn fetch(&self, id: &RecordId) -> Result<RemoteRecord, TransportError>;
}

impl<T: RecordTransport + ?Sized> RecordTransport for &T {
    fn submit(&self, record: RemoteRecord) -> Result<RemoteRecord, TransportError> {
        (**self).submit(record)
    }

    fn fetch(&self, id: &RecordId) -> Result<RemoteRecord, TransportError> {
        (**self).fetch(id)
    }
}
