//! Local-first DFD drafts.
//!
//! A [`DraftDfd`] keeps materials and responsible parties in memory under
//! temporary ids (`temp-1`, `temp-2`, ...) while the user edits the form.
//! Nothing touches the backend until [`submit`] inserts the DFD, then its
//! children, deleting the DFD again if the children cannot be saved.
//!
//! ```
//! use contrata::core::*;
//! use contrata::draft::*;
//! use rust_decimal_macros::dec;
//! use uuid::Uuid;
//!
//! let mut draft = DraftDfd::new("200999", Uuid::new_v4());
//! draft.description = "Material de expediente".into();
//! draft.justification = "Reposição do estoque".into();
//!
//! let papel = MaterialBuilder::new("Papel A4", dec!(10), "RESMA", dec!(25)).build();
//! let added = draft.add_material(papel, &[], false).unwrap();
//! assert!(matches!(added, MaterialAdded::Added(_)));
//! assert_eq!(draft.total(), dec!(250.00));
//! ```

mod memory;
mod store;
mod submit;

pub use memory::*;
pub use store::*;
pub use submit::*;

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::core::{
    CatalogItem, Dfd, DfdStatus, Material, MaterialBuilder, Priority, Responsible,
    ValidationError, find_similar, is_duplicate, is_in_materials, is_valid_cpf, validate_dfd,
    validate_material,
};

/// Temporary id of a row that exists only in the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TempId(u64);

impl TempId {
    /// The sequence number behind the id.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TempId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "temp-{}", self.0)
    }
}

/// Material row held by a draft.
#[derive(Debug, Clone)]
pub struct DraftMaterial {
    pub temp_id: TempId,
    pub material: Material,
}

/// Responsible row held by a draft.
#[derive(Debug, Clone)]
pub struct DraftResponsible {
    pub temp_id: TempId,
    pub responsible: Responsible,
}

/// Outcome of [`DraftDfd::add_material`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaterialAdded {
    /// The material was added under this id.
    Added(TempId),
    /// Not added: the catalog already has an equal or very similar item.
    /// Repeat with `force` to add it anyway.
    SimilarInCatalog { item_id: Uuid, description: String },
}

/// Result of [`DraftDfd::add_from_catalog`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogImport {
    pub added: Vec<TempId>,
    /// Items already present in the draft by code or description, or of a
    /// kind a DFD line cannot carry.
    pub skipped: usize,
}

/// Errors from editing a draft.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DraftError {
    #[error("item already added to the DFD: {0}")]
    Duplicate(String),

    #[error("invalid CPF: {0}")]
    InvalidCpf(String),

    #[error("no draft row with id {0}")]
    NotFound(TempId),

    #[error("invalid row: {}", crate::core::join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

/// DFD being edited before it is first saved.
#[derive(Debug, Clone)]
pub struct DraftDfd {
    pub uasg_number: String,
    pub area_id: Uuid,
    pub description: String,
    pub justification: String,
    pub conclusion_date: Option<NaiveDate>,
    pub priority: Priority,
    pub priority_justification: Option<String>,
    materials: Vec<DraftMaterial>,
    responsibles: Vec<DraftResponsible>,
    last_temp: u64,
}

impl DraftDfd {
    pub fn new(uasg_number: impl Into<String>, area_id: Uuid) -> Self {
        Self {
            uasg_number: uasg_number.into(),
            area_id,
            description: String::new(),
            justification: String::new(),
            conclusion_date: None,
            priority: Priority::default(),
            priority_justification: None,
            materials: Vec::new(),
            responsibles: Vec::new(),
            last_temp: 0,
        }
    }

    fn next_temp_id(&mut self) -> TempId {
        self.last_temp += 1;
        TempId(self.last_temp)
    }

    pub fn materials(&self) -> &[DraftMaterial] {
        &self.materials
    }

    pub fn responsibles(&self) -> &[DraftResponsible] {
        &self.responsibles
    }

    fn plain_materials(&self) -> Vec<Material> {
        self.materials.iter().map(|m| m.material.clone()).collect()
    }

    fn check_material(material: &Material) -> Result<(), DraftError> {
        let mut errors = Vec::new();
        validate_material(material, 0, &mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(DraftError::Invalid(errors))
        }
    }

    /// Add a material line.
    ///
    /// Lines whose description is already in the draft are rejected. A
    /// line typed by hand (no catalog code) is held back when the catalog
    /// has an equal or very similar item, unless `force` is set.
    pub fn add_material(
        &mut self,
        material: Material,
        catalog: &[CatalogItem],
        force: bool,
    ) -> Result<MaterialAdded, DraftError> {
        Self::check_material(&material)?;
        if is_duplicate(&material.description, &self.plain_materials(), None) {
            return Err(DraftError::Duplicate(material.description));
        }
        if !force && material.code.is_none() {
            if let Some(item) = find_similar(&material.description, catalog) {
                return Ok(MaterialAdded::SimilarInCatalog {
                    item_id: item.id,
                    description: item.description.clone(),
                });
            }
        }
        let temp_id = self.next_temp_id();
        self.materials.push(DraftMaterial { temp_id, material });
        Ok(MaterialAdded::Added(temp_id))
    }

    /// Replace the material stored under `id`.
    pub fn update_material(&mut self, id: TempId, material: Material) -> Result<(), DraftError> {
        let index = self
            .materials
            .iter()
            .position(|m| m.temp_id == id)
            .ok_or(DraftError::NotFound(id))?;
        Self::check_material(&material)?;
        if is_duplicate(&material.description, &self.plain_materials(), Some(index)) {
            return Err(DraftError::Duplicate(material.description));
        }
        self.materials[index].material = material;
        Ok(())
    }

    pub fn remove_material(&mut self, id: TempId) -> Result<Material, DraftError> {
        let index = self
            .materials
            .iter()
            .position(|m| m.temp_id == id)
            .ok_or(DraftError::NotFound(id))?;
        Ok(self.materials.remove(index).material)
    }

    /// Add one line per catalog item with quantity 1 and the reference price,
    /// skipping items already present and works or engineering services.
    pub fn add_from_catalog(&mut self, items: &[CatalogItem]) -> CatalogImport {
        let mut import = CatalogImport::default();
        for item in items {
            if !item.kind.is_dfd_line() || is_in_materials(item, &self.plain_materials()) {
                import.skipped += 1;
                continue;
            }
            let material = MaterialBuilder::from_catalog(item, Decimal::ONE).build();
            let temp_id = self.next_temp_id();
            self.materials.push(DraftMaterial { temp_id, material });
            import.added.push(temp_id);
        }
        import
    }

    /// Add a responsible party. The CPF must pass the check-digit test.
    pub fn add_responsible(&mut self, responsible: Responsible) -> Result<TempId, DraftError> {
        if !is_valid_cpf(&responsible.cpf) {
            return Err(DraftError::InvalidCpf(responsible.cpf));
        }
        let temp_id = self.next_temp_id();
        self.responsibles.push(DraftResponsible {
            temp_id,
            responsible,
        });
        Ok(temp_id)
    }

    pub fn remove_responsible(&mut self, id: TempId) -> Result<Responsible, DraftError> {
        let index = self
            .responsibles
            .iter()
            .position(|r| r.temp_id == id)
            .ok_or(DraftError::NotFound(id))?;
        Ok(self.responsibles.remove(index).responsible)
    }

    /// Sum of the material totals.
    pub fn total(&self) -> Decimal {
        self.materials.iter().map(|m| m.material.total()).sum()
    }

    /// The DFD this draft would persist, if it passes validation.
    pub fn to_dfd(&self) -> Result<Dfd, Vec<ValidationError>> {
        let dfd = Dfd {
            id: None,
            number: None,
            uasg_number: self.uasg_number.clone(),
            area_id: self.area_id,
            description: self.description.clone(),
            justification: self.justification.clone(),
            conclusion_date: self.conclusion_date,
            priority: self.priority,
            priority_justification: self.priority_justification.clone(),
            status: DfdStatus::Draft,
            materials: self.plain_materials(),
            responsibles: self
                .responsibles
                .iter()
                .map(|r| r.responsible.clone())
                .collect(),
            attachments: Vec::new(),
        };
        let errors = validate_dfd(&dfd);
        if errors.is_empty() { Ok(dfd) } else { Err(errors) }
    }
}
