use std::future::Future;

use thiserror::Error;
use uuid::Uuid;

use crate::core::{Dfd, DfdStatus, Material, Responsible};

/// Errors reported by a [`Store`].
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// Network or HTTP transport error.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with an error status.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The backend answered with something that could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    #[error("DFD {0} not found")]
    NotFound(Uuid),

    /// The store refused the write.
    #[error("rejected: {0}")]
    Rejected(String),
}

impl From<StoreError> for crate::core::PcaError {
    fn from(e: StoreError) -> Self {
        Self::Store(e.to_string())
    }
}

/// Row identity assigned when a DFD is inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertedDfd {
    pub id: Uuid,
    /// Display number, when the backend assigns one.
    pub number: Option<String>,
}

/// Persistence port for DFDs and their child rows.
///
/// Implementations insert each batch as a whole. No transaction spans
/// several calls; [`submit`](super::submit) compensates for that.
pub trait Store: Send + Sync {
    /// Insert the DFD header (materials and responsibles are ignored).
    fn insert_dfd(
        &self,
        dfd: &Dfd,
        user_id: Uuid,
    ) -> impl Future<Output = Result<InsertedDfd, StoreError>> + Send;

    /// Insert material rows under `dfd_id`, returning their ids in order.
    fn insert_materials(
        &self,
        dfd_id: Uuid,
        materials: &[Material],
    ) -> impl Future<Output = Result<Vec<Uuid>, StoreError>> + Send;

    /// Insert responsible rows under `dfd_id`, returning their ids in order.
    fn insert_responsibles(
        &self,
        dfd_id: Uuid,
        responsibles: &[Responsible],
    ) -> impl Future<Output = Result<Vec<Uuid>, StoreError>> + Send;

    /// Delete a DFD together with its child rows.
    fn delete_dfd(&self, dfd_id: Uuid) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn update_status(
        &self,
        dfd_id: Uuid,
        status: DfdStatus,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Load a DFD with its materials and responsibles.
    fn fetch_dfd(
        &self,
        dfd_id: Uuid,
    ) -> impl Future<Output = Result<Option<Dfd>, StoreError>> + Send;
}
