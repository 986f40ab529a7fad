use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use uuid::Uuid;

use super::store::{InsertedDfd, Store, StoreError};
use crate::core::{Dfd, DfdNumberSequence, DfdStatus, Material, Responsible};

/// Store operations, for failure injection and call inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    InsertDfd,
    InsertMaterials,
    InsertResponsibles,
    DeleteDfd,
    UpdateStatus,
    FetchDfd,
}

#[derive(Debug)]
struct State {
    dfds: HashMap<Uuid, (Dfd, Uuid)>,
    numbers: DfdNumberSequence,
    failing: HashSet<Operation>,
    calls: Vec<Operation>,
}

/// In-process [`Store`] keeping rows in memory.
///
/// Operations can be made to fail with [`fail_on`](Self::fail_on), which
/// is how submission rollback paths are exercised in tests.
#[derive(Debug)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    /// Empty store numbering DFDs `1/{year}`, `2/{year}`, ...
    pub fn new(year: i32) -> Self {
        Self::with_sequence(DfdNumberSequence::new(year))
    }

    pub fn with_sequence(numbers: DfdNumberSequence) -> Self {
        Self {
            state: Mutex::new(State {
                dfds: HashMap::new(),
                numbers,
                failing: HashSet::new(),
                calls: Vec::new(),
            }),
        }
    }

    /// Make every later call of `op` fail with [`StoreError::Rejected`].
    pub fn fail_on(&self, op: Operation) {
        if let Ok(mut s) = self.state.lock() {
            s.failing.insert(op);
        }
    }

    pub fn clear_failures(&self) {
        if let Ok(mut s) = self.state.lock() {
            s.failing.clear();
        }
    }

    /// Operations attempted so far, in order (failed ones included).
    pub fn calls(&self) -> Vec<Operation> {
        self.state.lock().map(|s| s.calls.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.state.lock().map(|s| s.dfds.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Owner recorded for a stored DFD.
    pub fn owner_of(&self, dfd_id: Uuid) -> Option<Uuid> {
        self.state
            .lock()
            .ok()
            .and_then(|s| s.dfds.get(&dfd_id).map(|(_, user)| *user))
    }

    fn begin(&self, op: Operation) -> Result<MutexGuard<'_, State>, StoreError> {
        let mut s = self
            .state
            .lock()
            .map_err(|_| StoreError::Rejected("store lock poisoned".into()))?;
        s.calls.push(op);
        if s.failing.contains(&op) {
            return Err(StoreError::Rejected(format!("{op:?} failed")));
        }
        Ok(s)
    }
}

impl Store for MemoryStore {
    async fn insert_dfd(&self, dfd: &Dfd, user_id: Uuid) -> Result<InsertedDfd, StoreError> {
        let mut s = self.begin(Operation::InsertDfd)?;
        let id = Uuid::new_v4();
        let number = s.numbers.next_number();
        let row = Dfd {
            id: Some(id),
            number: Some(number.clone()),
            materials: Vec::new(),
            responsibles: Vec::new(),
            attachments: Vec::new(),
            ..dfd.clone()
        };
        s.dfds.insert(id, (row, user_id));
        Ok(InsertedDfd {
            id,
            number: Some(number),
        })
    }

    async fn insert_materials(
        &self,
        dfd_id: Uuid,
        materials: &[Material],
    ) -> Result<Vec<Uuid>, StoreError> {
        let mut s = self.begin(Operation::InsertMaterials)?;
        let (dfd, _) = s.dfds.get_mut(&dfd_id).ok_or(StoreError::NotFound(dfd_id))?;
        let mut ids = Vec::with_capacity(materials.len());
        for m in materials {
            let id = Uuid::new_v4();
            dfd.materials.push(Material {
                id: Some(id),
                ..m.clone()
            });
            ids.push(id);
        }
        Ok(ids)
    }

    async fn insert_responsibles(
        &self,
        dfd_id: Uuid,
        responsibles: &[Responsible],
    ) -> Result<Vec<Uuid>, StoreError> {
        let mut s = self.begin(Operation::InsertResponsibles)?;
        let (dfd, _) = s.dfds.get_mut(&dfd_id).ok_or(StoreError::NotFound(dfd_id))?;
        let mut ids = Vec::with_capacity(responsibles.len());
        for r in responsibles {
            let id = Uuid::new_v4();
            dfd.responsibles.push(Responsible {
                id: Some(id),
                ..r.clone()
            });
            ids.push(id);
        }
        Ok(ids)
    }

    async fn delete_dfd(&self, dfd_id: Uuid) -> Result<(), StoreError> {
        let mut s = self.begin(Operation::DeleteDfd)?;
        s.dfds
            .remove(&dfd_id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(dfd_id))
    }

    async fn update_status(&self, dfd_id: Uuid, status: DfdStatus) -> Result<(), StoreError> {
        let mut s = self.begin(Operation::UpdateStatus)?;
        let (dfd, _) = s.dfds.get_mut(&dfd_id).ok_or(StoreError::NotFound(dfd_id))?;
        dfd.status = status;
        Ok(())
    }

    async fn fetch_dfd(&self, dfd_id: Uuid) -> Result<Option<Dfd>, StoreError> {
        let s = self.begin(Operation::FetchDfd)?;
        Ok(s.dfds.get(&dfd_id).map(|(dfd, _)| dfd.clone()))
    }
}
