use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::error::{PcaError, join_errors};
use super::types::*;
use super::validation::{self, MAX_DESCRIPTION_CHARS};

/// Upper bound on material lines per DFD.
pub const MAX_MATERIALS: usize = 10_000;

/// Builder for constructing valid DFDs.
///
/// ```
/// use contrata::core::*;
/// use rust_decimal_macros::dec;
/// use uuid::Uuid;
///
/// let dfd = DfdBuilder::new("200999", Uuid::new_v4())
///     .description("Aquisição de material de expediente")
///     .justification("Reposição do estoque anual das escolas municipais")
///     .priority(Priority::High)
///     .add_material(MaterialBuilder::new("Papel A4 75g", dec!(100), "RESMA", dec!(24.90)).build())
///     .add_responsible(
///         ResponsibleBuilder::new("Maria Souza", "529.982.247-25", ResponsibleRole::Requester)
///             .email("maria@camocim.ce.gov.br")
///             .build(),
///     )
///     .build()
///     .unwrap();
///
/// assert_eq!(dfd.total(), dec!(2490.00));
/// ```
pub struct DfdBuilder {
    uasg_number: String,
    area_id: Uuid,
    number: Option<String>,
    description: String,
    justification: String,
    conclusion_date: Option<NaiveDate>,
    priority: Priority,
    priority_justification: Option<String>,
    status: DfdStatus,
    materials: Vec<Material>,
    responsibles: Vec<Responsible>,
    attachments: Vec<Attachment>,
}

impl DfdBuilder {
    pub fn new(uasg_number: impl Into<String>, area_id: Uuid) -> Self {
        Self {
            uasg_number: uasg_number.into(),
            area_id,
            number: None,
            description: String::new(),
            justification: String::new(),
            conclusion_date: None,
            priority: Priority::default(),
            priority_justification: None,
            status: DfdStatus::Draft,
            materials: Vec::new(),
            responsibles: Vec::new(),
            attachments: Vec::new(),
        }
    }

    pub fn number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn justification(mut self, justification: impl Into<String>) -> Self {
        self.justification = justification.into();
        self
    }

    pub fn conclusion_date(mut self, date: NaiveDate) -> Self {
        self.conclusion_date = Some(date);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn priority_justification(mut self, text: impl Into<String>) -> Self {
        self.priority_justification = Some(text.into());
        self
    }

    pub fn status(mut self, status: DfdStatus) -> Self {
        self.status = status;
        self
    }

    pub fn add_material(mut self, material: Material) -> Self {
        self.materials.push(material);
        self
    }

    pub fn add_responsible(mut self, responsible: Responsible) -> Self {
        self.responsibles.push(responsible);
        self
    }

    pub fn add_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Build the DFD and run validation.
    /// Returns all validation errors (not just the first).
    pub fn build(self) -> Result<Dfd, PcaError> {
        // Input limits to prevent abuse
        if self.materials.len() > MAX_MATERIALS {
            return Err(PcaError::Builder(
                "DFD cannot have more than 10,000 materials".into(),
            ));
        }
        if self.description.chars().count() > MAX_DESCRIPTION_CHARS {
            return Err(PcaError::Builder(format!(
                "description cannot exceed {MAX_DESCRIPTION_CHARS} characters"
            )));
        }

        let dfd = self.assemble();

        let errors = validation::validate_dfd(&dfd);
        if !errors.is_empty() {
            return Err(PcaError::Validation(join_errors(&errors)));
        }

        Ok(dfd)
    }

    /// Build without validation, for tests and for rows loaded from storage.
    pub fn build_unchecked(self) -> Dfd {
        self.assemble()
    }

    fn assemble(self) -> Dfd {
        Dfd {
            id: None,
            number: self.number,
            uasg_number: self.uasg_number,
            area_id: self.area_id,
            description: self.description,
            justification: self.justification,
            conclusion_date: self.conclusion_date,
            priority: self.priority,
            priority_justification: self.priority_justification,
            status: self.status,
            materials: self.materials,
            responsibles: self.responsibles,
            attachments: self.attachments,
        }
    }
}

/// Builder for a DFD material line.
pub struct MaterialBuilder {
    kind: ItemKind,
    code: Option<String>,
    description: String,
    quantity: Decimal,
    unit: String,
    unit_price: Decimal,
    justification: Option<String>,
}

impl MaterialBuilder {
    pub fn new(
        description: impl Into<String>,
        quantity: Decimal,
        unit: impl Into<String>,
        unit_price: Decimal,
    ) -> Self {
        Self {
            kind: ItemKind::Material,
            code: None,
            description: description.into(),
            quantity,
            unit: unit.into(),
            unit_price,
            justification: None,
        }
    }

    /// Start from a catalog entry, taking its code, kind, unit and
    /// reference price (zero when the catalog has none).
    pub fn from_catalog(item: &CatalogItem, quantity: Decimal) -> Self {
        Self {
            kind: item.kind,
            code: item.code.clone(),
            description: item.description.clone(),
            quantity,
            unit: item.unit.clone(),
            unit_price: item.reference_price.unwrap_or(Decimal::ZERO),
            justification: None,
        }
    }

    pub fn kind(mut self, kind: ItemKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn justification(mut self, text: impl Into<String>) -> Self {
        self.justification = Some(text.into());
        self
    }

    pub fn build(self) -> Material {
        Material {
            id: None,
            kind: self.kind,
            code: self.code,
            description: self.description,
            quantity: self.quantity,
            unit: self.unit,
            unit_price: self.unit_price,
            justification: self.justification,
        }
    }
}

/// Builder for a DFD responsible party.
pub struct ResponsibleBuilder {
    name: String,
    cpf: String,
    role: ResponsibleRole,
    function_id: Option<Uuid>,
    position: Option<String>,
    position_id: Option<Uuid>,
    email: Option<String>,
    phone: Option<String>,
}

impl ResponsibleBuilder {
    /// `cpf` may be masked; only its digits are kept.
    pub fn new(name: impl Into<String>, cpf: &str, role: ResponsibleRole) -> Self {
        Self {
            name: name.into(),
            cpf: super::fiscal::sanitize(cpf),
            role,
            function_id: None,
            position: None,
            position_id: None,
            email: None,
            phone: None,
        }
    }

    pub fn function_id(mut self, id: Uuid) -> Self {
        self.function_id = Some(id);
        self
    }

    pub fn position(mut self, name: impl Into<String>, id: Option<Uuid>) -> Self {
        self.position = Some(name.into());
        self.position_id = id;
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Phone may be masked; only its digits are kept.
    pub fn phone(mut self, phone: &str) -> Self {
        self.phone = Some(super::fiscal::sanitize(phone));
        self
    }

    pub fn build(self) -> Responsible {
        Responsible {
            id: None,
            name: self.name,
            cpf: self.cpf,
            role: self.role,
            function_id: self.function_id,
            position: self.position,
            position_id: self.position_id,
            email: self.email,
            phone: self.phone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn base() -> DfdBuilder {
        DfdBuilder::new("200999", Uuid::from_u128(7))
            .description("Serviço de manutenção predial")
            .justification("Conservação dos prédios escolares")
    }

    #[test]
    fn builds_valid_dfd() {
        let dfd = base()
            .add_material(MaterialBuilder::new("Pintura", dec!(10), "M2", dec!(35.5)).build())
            .build()
            .unwrap();
        assert_eq!(dfd.status, DfdStatus::Draft);
        assert_eq!(dfd.total(), dec!(355.00));
    }

    #[test]
    fn collects_all_errors() {
        let err = DfdBuilder::new("", Uuid::from_u128(7))
            .add_material(MaterialBuilder::new("", dec!(0), "", dec!(1)).build())
            .build()
            .unwrap_err();
        let msg = err.to_string();
        for rule in ["DFD-01", "DFD-02", "DFD-04", "DFD-05", "DFD-06", "DFD-07"] {
            assert!(msg.contains(rule), "missing {rule} in {msg}");
        }
    }

    #[test]
    fn description_limit_is_a_builder_error() {
        let err = base().description("x".repeat(201)).build().unwrap_err();
        assert!(matches!(err, PcaError::Builder(_)));
    }

    #[test]
    fn unchecked_skips_validation() {
        let dfd = DfdBuilder::new("", Uuid::nil()).build_unchecked();
        assert!(dfd.description.is_empty());
    }

    #[test]
    fn responsible_strips_masks() {
        let r = ResponsibleBuilder::new("Ana", "529.982.247-25", ResponsibleRole::Manager)
            .phone("(88) 99999-9999")
            .build();
        assert_eq!(r.cpf, "52998224725");
        assert_eq!(r.phone.as_deref(), Some("88999999999"));
    }

    #[test]
    fn material_from_catalog() {
        let item = CatalogItem {
            id: Uuid::nil(),
            code: Some("CATMAT-150".into()),
            kind: ItemKind::Service,
            description: "Limpeza".into(),
            unit: "H".into(),
            reference_price: None,
            specifications: None,
            active: true,
        };
        let m = MaterialBuilder::from_catalog(&item, dec!(8)).build();
        assert_eq!(m.kind, ItemKind::Service);
        assert_eq!(m.code.as_deref(), Some("CATMAT-150"));
        assert_eq!(m.unit_price, dec!(0));
    }
}
