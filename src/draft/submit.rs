use thiserror::Error;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::DraftDfd;
use super::store::{Store, StoreError};
use crate::core::{Dfd, DfdStatus, ValidationError, join_errors};

/// Why a draft could not be saved or sent.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubmitError {
    /// The draft failed validation; nothing was written.
    #[error("invalid DFD: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),

    /// The DFD header could not be inserted; nothing was written.
    #[error("failed to save DFD: {0}")]
    Parent(#[source] StoreError),

    /// Child rows failed and the DFD header was deleted again.
    #[error("failed to save items, DFD {dfd_id} was rolled back: {source}")]
    ChildrenRolledBack {
        dfd_id: Uuid,
        #[source]
        source: StoreError,
    },

    /// Child rows failed and the DFD header could not be deleted: an
    /// orphaned DFD remains in the store.
    #[error("failed to save items and to roll back DFD {dfd_id}: {source}; rollback: {rollback}")]
    RollbackFailed {
        dfd_id: Uuid,
        #[source]
        source: StoreError,
        rollback: StoreError,
    },

    #[error("DFD {0} not found")]
    NotFound(Uuid),

    /// Only drafts can be sent.
    #[error("DFD {dfd_id} is {} and cannot be sent", .status.label())]
    NotDraft { dfd_id: Uuid, status: DfdStatus },

    #[error(transparent)]
    Store(#[from] StoreError),
}

async fn insert_children<S: Store>(
    store: &S,
    dfd_id: Uuid,
    dfd: &mut Dfd,
) -> Result<(), StoreError> {
    if !dfd.materials.is_empty() {
        let ids = store.insert_materials(dfd_id, &dfd.materials).await?;
        for (m, id) in dfd.materials.iter_mut().zip(ids) {
            m.id = Some(id);
        }
    }
    if !dfd.responsibles.is_empty() {
        let ids = store.insert_responsibles(dfd_id, &dfd.responsibles).await?;
        for (r, id) in dfd.responsibles.iter_mut().zip(ids) {
            r.id = Some(id);
        }
    }
    Ok(())
}

/// Persist a draft: the DFD header first, then its materials and
/// responsibles.
///
/// If a child batch fails the header is deleted again and
/// [`SubmitError::ChildrenRolledBack`] is returned. If that delete fails
/// too the result is [`SubmitError::RollbackFailed`]. Nothing is retried.
pub async fn submit<S: Store>(
    draft: &DraftDfd,
    store: &S,
    user_id: Uuid,
) -> Result<Dfd, SubmitError> {
    let mut dfd = draft.to_dfd().map_err(SubmitError::Invalid)?;

    debug!(
        uasg = %dfd.uasg_number,
        materials = dfd.materials.len(),
        responsibles = dfd.responsibles.len(),
        "saving DFD draft"
    );

    let inserted = store
        .insert_dfd(&dfd, user_id)
        .await
        .map_err(SubmitError::Parent)?;
    dfd.id = Some(inserted.id);
    dfd.number = inserted.number;

    if let Err(source) = insert_children(store, inserted.id, &mut dfd).await {
        warn!(dfd_id = %inserted.id, error = %source, "saving DFD items failed, rolling back");
        return match store.delete_dfd(inserted.id).await {
            Ok(()) => Err(SubmitError::ChildrenRolledBack {
                dfd_id: inserted.id,
                source,
            }),
            Err(rollback) => {
                error!(
                    dfd_id = %inserted.id,
                    error = %rollback,
                    "rollback failed, DFD left without items"
                );
                Err(SubmitError::RollbackFailed {
                    dfd_id: inserted.id,
                    source,
                    rollback,
                })
            }
        };
    }

    info!(
        dfd_id = %inserted.id,
        number = dfd.number.as_deref().unwrap_or(""),
        total = %dfd.total(),
        "DFD saved"
    );
    Ok(dfd)
}

/// Send a saved DFD for analysis.
pub async fn send<S: Store>(store: &S, dfd_id: Uuid) -> Result<(), SubmitError> {
    let dfd = store
        .fetch_dfd(dfd_id)
        .await?
        .ok_or(SubmitError::NotFound(dfd_id))?;
    if dfd.status != DfdStatus::Draft {
        return Err(SubmitError::NotDraft {
            dfd_id,
            status: dfd.status,
        });
    }
    store.update_status(dfd_id, DfdStatus::Sent).await?;
    info!(dfd_id = %dfd_id, "DFD sent for analysis");
    Ok(())
}
