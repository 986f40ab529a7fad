use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::catalog::normalize_description;
use super::contact::{is_valid_email, is_valid_phone};
use super::error::{PcaError, ValidationError};
use super::fiscal::is_valid_cpf;
use super::money::format_amount;
use super::types::*;

/// Maximum length of a DFD short description, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 200;

/// Validate a DFD before it is persisted.
/// Returns all validation errors found (not just the first).
pub fn validate_dfd(dfd: &Dfd) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if dfd.uasg_number.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "uasg_number",
            "Selecione a unidade gestora e a área requisitante",
            "DFD-01",
        ));
    } else if dfd.area_id.is_nil() {
        errors.push(ValidationError::with_rule(
            "area_id",
            "Selecione a unidade gestora e a área requisitante",
            "DFD-01",
        ));
    }

    if dfd.description.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "description",
            "Descrição sucinta do objeto é obrigatória",
            "DFD-02",
        ));
    } else if dfd.description.chars().count() > MAX_DESCRIPTION_CHARS {
        errors.push(ValidationError::with_rule(
            "description",
            format!("Descrição sucinta deve ter no máximo {MAX_DESCRIPTION_CHARS} caracteres"),
            "DFD-03",
        ));
    }

    if dfd.justification.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "justification",
            "Justificativa de necessidade é obrigatória",
            "DFD-04",
        ));
    }

    for (i, m) in dfd.materials.iter().enumerate() {
        validate_material(m, i, &mut errors);
    }

    // DFD-09: no two lines with the same description
    let mut seen: Vec<String> = Vec::with_capacity(dfd.materials.len());
    for (i, m) in dfd.materials.iter().enumerate() {
        let key = normalize_description(&m.description);
        if key.is_empty() {
            continue;
        }
        if seen.contains(&key) {
            errors.push(ValidationError::with_rule(
                format!("materials[{i}].description"),
                "Este item já foi adicionado ao DFD",
                "DFD-09",
            ));
        } else {
            seen.push(key);
        }
    }

    for (i, r) in dfd.responsibles.iter().enumerate() {
        validate_responsible(r, i, &mut errors);
    }

    errors
}

/// Validate a single DFD material line at position `index`.
pub fn validate_material(m: &Material, index: usize, errors: &mut Vec<ValidationError>) {
    let prefix = format!("materials[{index}]");

    if m.description.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.description"),
            "Descrição é obrigatória",
            "DFD-05",
        ));
    }
    if !m.kind.is_dfd_line() {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.kind"),
            format!("Tipo \"{}\" não é aceito em itens do DFD", m.kind.label()),
            "DFD-14",
        ));
    }
    if m.quantity <= Decimal::ZERO {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.quantity"),
            "Quantidade deve ser maior que zero",
            "DFD-06",
        ));
    }
    if m.unit.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.unit"),
            "Unidade de medida é obrigatória",
            "DFD-07",
        ));
    }
    if m.unit_price < Decimal::ZERO {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.unit_price"),
            "Valor unitário não pode ser negativo",
            "DFD-08",
        ));
    }
}

/// Validate a responsible party at position `index`.
pub fn validate_responsible(r: &Responsible, index: usize, errors: &mut Vec<ValidationError>) {
    let prefix = format!("responsibles[{index}]");

    if r.name.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.name"),
            "Nome é obrigatório",
            "DFD-10",
        ));
    }
    if !is_valid_cpf(&r.cpf) {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.cpf"),
            "CPF inválido",
            "DFD-11",
        ));
    }
    if let Some(email) = r.email.as_deref().filter(|e| !e.trim().is_empty()) {
        if !is_valid_email(email) {
            errors.push(ValidationError::with_rule(
                format!("{prefix}.email"),
                "E-mail inválido",
                "DFD-12",
            ));
        }
    }
    if let Some(phone) = r.phone.as_deref().filter(|p| !p.trim().is_empty()) {
        if !is_valid_phone(phone) {
            errors.push(ValidationError::with_rule(
                format!("{prefix}.phone"),
                "Telefone inválido",
                "DFD-13",
            ));
        }
    }
}

/// Limits applied by the simplified annual plan request form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PcaFormRules {
    /// Target dates must fall inside this year.
    pub exercise_year: i32,
    pub max_items: usize,
    pub min_description_len: usize,
    pub min_justification_len: usize,
}

impl Default for PcaFormRules {
    fn default() -> Self {
        Self {
            exercise_year: 2025,
            max_items: 50,
            min_description_len: 10,
            min_justification_len: 50,
        }
    }
}

/// Validate a simplified annual plan request.
/// Returns all validation errors found (not just the first).
pub fn validate_pca_request(req: &PcaRequest, rules: &PcaFormRules) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let r = &req.requester;

    if r.unit_id.is_none() {
        errors.push(ValidationError::with_rule(
            "requester.unit_id",
            "Selecione uma unidade gestora",
            "PCA-01",
        ));
    }
    if r.area_id.is_none() {
        errors.push(ValidationError::with_rule(
            "requester.area_id",
            "Selecione uma área requisitante",
            "PCA-02",
        ));
    }
    if r.responsible.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "requester.responsible",
            "Nome do responsável é obrigatório",
            "PCA-03",
        ));
    }
    if r.position.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "requester.position",
            "Cargo/função é obrigatório",
            "PCA-04",
        ));
    }
    if r.email.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "requester.email",
            "E-mail é obrigatório",
            "PCA-05",
        ));
    } else if !is_valid_email(r.email.trim()) {
        errors.push(ValidationError::with_rule(
            "requester.email",
            "E-mail inválido",
            "PCA-05",
        ));
    }
    if r.phone.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "requester.phone",
            "Telefone é obrigatório",
            "PCA-06",
        ));
    } else if !is_valid_phone(&r.phone) {
        errors.push(ValidationError::with_rule(
            "requester.phone",
            "Telefone inválido",
            "PCA-06",
        ));
    }

    if req.items.is_empty() {
        errors.push(ValidationError::with_rule(
            "items",
            "Adicione pelo menos 1 item para contratar",
            "PCA-07",
        ));
    } else if req.items.len() > rules.max_items {
        errors.push(ValidationError::with_rule(
            "items",
            format!("Máximo de {} itens por requisição", rules.max_items),
            "PCA-07",
        ));
    }

    for (i, item) in req.items.iter().enumerate() {
        validate_pca_item(item, i, rules, &mut errors);
    }

    errors
}

fn validate_pca_item(
    item: &PcaItem,
    index: usize,
    rules: &PcaFormRules,
    errors: &mut Vec<ValidationError>,
) {
    let prefix = format!("items[{index}]");
    let n = index + 1;

    if item.description.trim().chars().count() < rules.min_description_len {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.description"),
            format!(
                "Item {n}: Descrição deve ter no mínimo {} caracteres",
                rules.min_description_len
            ),
            "PCA-08",
        ));
    }
    if item.quantity <= Decimal::ZERO {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.quantity"),
            format!("Item {n}: Quantidade deve ser maior que zero"),
            "PCA-09",
        ));
    }
    if item.unit_price <= Decimal::ZERO {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.unit_price"),
            format!("Item {n}: Valor unitário deve ser maior que zero"),
            "PCA-10",
        ));
    }
    if item.justification.trim().chars().count() < rules.min_justification_len {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.justification"),
            format!(
                "Item {n}: Justificativa deve ter no mínimo {} caracteres (Lei 14.133/2021)",
                rules.min_justification_len
            ),
            "PCA-11",
        ));
    }
    match item.target_date {
        None => errors.push(ValidationError::with_rule(
            format!("{prefix}.target_date"),
            format!("Item {n}: Data pretendida é obrigatória"),
            "PCA-12",
        )),
        Some(d) if d.year() != rules.exercise_year => errors.push(ValidationError::with_rule(
            format!("{prefix}.target_date"),
            format!(
                "Item {n}: Data pretendida deve estar dentro do exercício de {}",
                rules.exercise_year
            ),
            "PCA-12",
        )),
        Some(_) => {}
    }
}

/// Budget already allocated to the unit's requesting areas.
///
/// `excluding` skips one area, for edits.
pub fn allocated_budget(
    unit: &ManagingUnit,
    areas: &[RequestingArea],
    excluding: Option<Uuid>,
) -> Decimal {
    areas
        .iter()
        .filter(|a| a.unit_id == Some(unit.id))
        .filter(|a| Some(a.id) != excluding)
        .map(|a| a.budget)
        .sum()
}

/// Check that giving an area `requested` budget keeps the unit's areas
/// within the unit's own budget.
pub fn check_area_budget(
    unit: &ManagingUnit,
    areas: &[RequestingArea],
    requested: Decimal,
    editing: Option<Uuid>,
) -> Result<(), PcaError> {
    if requested < Decimal::ZERO {
        return Err(PcaError::Budget(format!(
            "requested budget {} must not be negative",
            format_amount(requested)
        )));
    }
    let allocated = allocated_budget(unit, areas, editing);
    let available = unit.budget - allocated;
    if requested > available {
        return Err(PcaError::Budget(format!(
            "requested budget {} exceeds the availability of UASG {} ({})",
            format_amount(requested),
            unit.uasg_number,
            format_amount(available)
        )));
    }
    Ok(())
}
