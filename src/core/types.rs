use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::money::round_money;

/// UASG: managing unit owning requesting areas and a budget ceiling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagingUnit {
    pub id: Uuid,
    /// UASG number (e.g. "200999").
    pub uasg_number: String,
    pub name: String,
    /// Budget availability (disponibilidade orçamentária).
    pub budget: Decimal,
    /// Budget units served, free text.
    pub budget_units: Option<String>,
    /// Budget line items (rubricas), free text.
    pub budget_lines: Option<String>,
    /// Public agent acting as expense officer (ordenador de despesa).
    pub expense_officer_id: Option<Uuid>,
}

/// Sub-unit under a managing unit that originates purchase demands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestingArea {
    pub id: Uuid,
    pub unit_id: Option<Uuid>,
    /// UASG number of the owning unit.
    pub uasg_number: String,
    /// Sequential number within the unit.
    pub number: u32,
    pub name: String,
    pub budget: Decimal,
}

/// Position (cargo) held by a public agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub active: bool,
}

/// Function (função) a responsible party performs on a DFD.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponsibleFunction {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub active: bool,
}

/// Registered public agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicAgent {
    pub id: Uuid,
    pub name: String,
    /// CPF digits.
    pub cpf: String,
    pub email: Option<String>,
    pub corporate_email: Option<String>,
    /// Phone digits.
    pub phone: Option<String>,
    pub position_id: Option<Uuid>,
    pub active: bool,
}

/// Kind of purchasable item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    #[serde(rename = "Material")]
    Material,
    #[serde(rename = "Serviço")]
    Service,
    #[serde(rename = "Obra")]
    Works,
    #[serde(rename = "Serviço de Engenharia")]
    EngineeringService,
}

impl ItemKind {
    /// Label stored by the backend.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Material => "Material",
            Self::Service => "Serviço",
            Self::Works => "Obra",
            Self::EngineeringService => "Serviço de Engenharia",
        }
    }

    /// DFD lines are stored as material or service only. Works and
    /// engineering services appear on plan request items.
    pub fn is_dfd_line(&self) -> bool {
        matches!(self, Self::Material | Self::Service)
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Material" => Some(Self::Material),
            "Serviço" => Some(Self::Service),
            "Obra" => Some(Self::Works),
            "Serviço de Engenharia" => Some(Self::EngineeringService),
            _ => None,
        }
    }
}

/// Demand priority.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Priority {
    #[default]
    #[serde(rename = "Baixa")]
    Low,
    #[serde(rename = "Média")]
    Medium,
    #[serde(rename = "Alta")]
    High,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Baixa",
            Self::Medium => "Média",
            Self::High => "Alta",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Baixa" => Some(Self::Low),
            "Média" => Some(Self::Medium),
            "Alta" => Some(Self::High),
            _ => None,
        }
    }
}

/// Lifecycle state of a DFD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DfdStatus {
    /// Saved but not yet sent for analysis.
    #[default]
    #[serde(rename = "Rascunho")]
    Draft,
    /// Sent for analysis.
    #[serde(rename = "Enviado")]
    Sent,
    /// Linked into the annual plan.
    #[serde(rename = "Vinculado")]
    Linked,
}

impl DfdStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Draft => "Rascunho",
            Self::Sent => "Enviado",
            Self::Linked => "Vinculado",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Rascunho" => Some(Self::Draft),
            "Enviado" => Some(Self::Sent),
            "Vinculado" => Some(Self::Linked),
            _ => None,
        }
    }
}

/// Function of a responsible party on a DFD.
///
/// Functions are user-managed on the backend, so names outside the
/// built-in four are kept as [`ResponsibleRole::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResponsibleRole {
    Requester,
    Technical,
    Manager,
    Inspector,
    Other(String),
}

impl ResponsibleRole {
    pub fn label(&self) -> &str {
        match self {
            Self::Requester => "Requisitante",
            Self::Technical => "Técnico",
            Self::Manager => "Gerente",
            Self::Inspector => "Fiscal",
            Self::Other(name) => name,
        }
    }

    /// Built-in function for `label`, if any.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Requisitante" => Some(Self::Requester),
            "Técnico" => Some(Self::Technical),
            "Gerente" => Some(Self::Manager),
            "Fiscal" => Some(Self::Inspector),
            _ => None,
        }
    }
}

impl From<String> for ResponsibleRole {
    fn from(name: String) -> Self {
        Self::from_label(name.trim()).unwrap_or(Self::Other(name))
    }
}

impl From<ResponsibleRole> for String {
    fn from(role: ResponsibleRole) -> Self {
        match role {
            ResponsibleRole::Other(name) => name,
            builtin => builtin.label().to_string(),
        }
    }
}

/// Entry of the purchasable item catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: Uuid,
    /// Catalog code (CATMAT/CATSER), if assigned.
    pub code: Option<String>,
    pub kind: ItemKind,
    pub description: String,
    /// Unit of supply (e.g. "UN", "CX", "H").
    pub unit: String,
    pub reference_price: Option<Decimal>,
    pub specifications: Option<String>,
    /// Inactive items are soft-deleted and hidden from searches.
    pub active: bool,
}

/// Material or service line of a DFD.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    /// Assigned by the store on insert.
    pub id: Option<Uuid>,
    pub kind: ItemKind,
    /// Catalog code when picked from the catalog.
    pub code: Option<String>,
    pub description: String,
    pub quantity: Decimal,
    pub unit: String,
    pub unit_price: Decimal,
    pub justification: Option<String>,
}

impl Material {
    /// Quantity × unit price, rounded to cents.
    pub fn total(&self) -> Decimal {
        round_money(self.quantity * self.unit_price)
    }
}

/// Person responsible for a DFD.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Responsible {
    pub id: Option<Uuid>,
    pub name: String,
    /// CPF digits.
    pub cpf: String,
    pub role: ResponsibleRole,
    pub function_id: Option<Uuid>,
    pub position: Option<String>,
    pub position_id: Option<Uuid>,
    pub email: Option<String>,
    /// Phone digits.
    pub phone: Option<String>,
}

/// File attached to a DFD. The bytes live in external storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub id: Uuid,
    pub file_name: String,
    pub size_bytes: u64,
    pub mime_type: Option<String>,
    pub storage_path: String,
    pub uploaded_on: NaiveDate,
}

/// DFD: Demand Formalization Document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dfd {
    /// Assigned by the store on insert.
    pub id: Option<Uuid>,
    /// Display number, e.g. "124/2022".
    pub number: Option<String>,
    pub uasg_number: String,
    pub area_id: Uuid,
    /// Short description of the object (≤ 200 characters).
    pub description: String,
    /// Justification of the need.
    pub justification: String,
    /// Intended conclusion date of the contracting.
    pub conclusion_date: Option<NaiveDate>,
    pub priority: Priority,
    pub priority_justification: Option<String>,
    pub status: DfdStatus,
    pub materials: Vec<Material>,
    pub responsibles: Vec<Responsible>,
    pub attachments: Vec<Attachment>,
}

impl Dfd {
    /// Sum of the material totals.
    pub fn total(&self) -> Decimal {
        self.materials.iter().map(Material::total).sum()
    }
}

/// Requester block of the simplified annual plan request form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Requester {
    pub unit_id: Option<Uuid>,
    pub unit_name: String,
    pub area_id: Option<Uuid>,
    pub area_name: String,
    pub responsible: String,
    pub position: String,
    pub email: String,
    pub phone: String,
}

/// Item of the simplified annual plan request form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PcaItem {
    pub kind: ItemKind,
    pub description: String,
    pub unit: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub priority: Priority,
    pub target_date: Option<NaiveDate>,
    pub justification: String,
}

impl PcaItem {
    /// Empty item with the form defaults (one unit, medium priority).
    pub fn empty() -> Self {
        Self {
            kind: ItemKind::Material,
            description: String::new(),
            unit: "UN".into(),
            quantity: Decimal::ONE,
            unit_price: Decimal::ZERO,
            priority: Priority::Medium,
            target_date: None,
            justification: String::new(),
        }
    }

    pub fn total(&self) -> Decimal {
        round_money(self.quantity * self.unit_price)
    }
}

/// Simplified annual plan request: one requester and its items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PcaRequest {
    pub requester: Requester,
    pub items: Vec<PcaItem>,
}

impl PcaRequest {
    pub fn total(&self) -> Decimal {
        self.items.iter().map(PcaItem::total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn labels_round_trip() {
        for k in [
            ItemKind::Material,
            ItemKind::Service,
            ItemKind::Works,
            ItemKind::EngineeringService,
        ] {
            assert_eq!(ItemKind::from_label(k.label()), Some(k));
        }
        for p in [Priority::Low, Priority::Medium, Priority::High] {
            assert_eq!(Priority::from_label(p.label()), Some(p));
        }
        for s in [DfdStatus::Draft, DfdStatus::Sent, DfdStatus::Linked] {
            assert_eq!(DfdStatus::from_label(s.label()), Some(s));
        }
        assert_eq!(ResponsibleRole::from_label("Técnico"), Some(ResponsibleRole::Technical));
        assert_eq!(ResponsibleRole::from_label("Tecnico"), None);
        assert_eq!(
            ResponsibleRole::from("Ordenador de Despesa".to_string()),
            ResponsibleRole::Other("Ordenador de Despesa".into())
        );
        assert_eq!(ResponsibleRole::from("Fiscal".to_string()), ResponsibleRole::Inspector);
    }

    #[test]
    fn serde_uses_backend_labels() {
        assert_eq!(serde_json::to_string(&ItemKind::Service).unwrap(), "\"Serviço\"");
        assert_eq!(serde_json::to_string(&Priority::Medium).unwrap(), "\"Média\"");
        let s: DfdStatus = serde_json::from_str("\"Enviado\"").unwrap();
        assert_eq!(s, DfdStatus::Sent);
    }

    #[test]
    fn material_total_rounds_to_cents() {
        let m = Material {
            id: None,
            kind: ItemKind::Material,
            code: None,
            description: "Papel A4".into(),
            quantity: dec!(3),
            unit: "CX".into(),
            unit_price: dec!(10.333),
            justification: None,
        };
        assert_eq!(m.total(), dec!(31.00));
    }

    #[test]
    fn pca_item_defaults() {
        let item = PcaItem::empty();
        assert_eq!(item.unit, "UN");
        assert_eq!(item.quantity, dec!(1));
        assert_eq!(item.priority, Priority::Medium);
        assert_eq!(item.total(), dec!(0));
    }
}
