//! Table rows as the backend stores them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{
    Dfd, DfdStatus, ItemKind, Material, Priority, Responsible, ResponsibleRole,
};

pub(crate) const DFDS: &str = "dfds";
pub(crate) const MATERIALS: &str = "materiais_servicos";
pub(crate) const RESPONSIBLES: &str = "responsaveis";

#[derive(Debug, Serialize)]
pub(crate) struct NewDfdRow<'a> {
    pub user_id: Uuid,
    pub numero_uasg: &'a str,
    pub area_requisitante_id: Uuid,
    pub descricao_sucinta: &'a str,
    pub justificativa_necessidade: &'a str,
    pub data_conclusao: Option<NaiveDate>,
    pub prioridade: Priority,
    pub situacao: DfdStatus,
    pub valor_total: Decimal,
}

impl<'a> NewDfdRow<'a> {
    pub fn new(dfd: &'a Dfd, user_id: Uuid) -> Self {
        Self {
            user_id,
            numero_uasg: &dfd.uasg_number,
            area_requisitante_id: dfd.area_id,
            descricao_sucinta: &dfd.description,
            justificativa_necessidade: &dfd.justification,
            data_conclusao: dfd.conclusion_date,
            prioridade: dfd.priority,
            situacao: dfd.status,
            valor_total: dfd.total(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct NewMaterialRow<'a> {
    pub dfd_id: Uuid,
    pub tipo: ItemKind,
    pub codigo_item: Option<&'a str>,
    pub descricao: &'a str,
    pub quantidade: Decimal,
    pub unidade_medida: &'a str,
    pub valor_unitario: Decimal,
    pub valor_total: Decimal,
    pub justificativa: Option<&'a str>,
}

impl<'a> NewMaterialRow<'a> {
    pub fn new(dfd_id: Uuid, m: &'a Material) -> Self {
        Self {
            dfd_id,
            tipo: m.kind,
            codigo_item: m.code.as_deref(),
            descricao: &m.description,
            quantidade: m.quantity,
            unidade_medida: &m.unit,
            valor_unitario: m.unit_price,
            valor_total: m.total(),
            justificativa: m.justification.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct NewResponsibleRow<'a> {
    pub dfd_id: Uuid,
    pub funcao: &'a ResponsibleRole,
    pub funcao_id: Option<Uuid>,
    pub cargo: Option<&'a str>,
    pub cargo_id: Option<Uuid>,
    pub nome: &'a str,
    pub cpf: &'a str,
    pub email: Option<&'a str>,
    pub telefone: Option<&'a str>,
}

impl<'a> NewResponsibleRow<'a> {
    pub fn new(dfd_id: Uuid, r: &'a Responsible) -> Self {
        Self {
            dfd_id,
            funcao: &r.role,
            funcao_id: r.function_id,
            cargo: r.position.as_deref(),
            cargo_id: r.position_id,
            nome: &r.name,
            cpf: &r.cpf,
            email: r.email.as_deref(),
            telefone: r.phone.as_deref(),
        }
    }
}

/// Only the id of an inserted row.
#[derive(Debug, Deserialize)]
pub(crate) struct IdRow {
    pub id: Uuid,
}

/// Inserted DFD header: id plus the serial number the backend assigns.
#[derive(Debug, Deserialize)]
pub(crate) struct InsertedDfdRow {
    pub id: Uuid,
    pub numero: Option<u64>,
    pub created_at: Option<String>,
}

impl InsertedDfdRow {
    /// `{numero}/{year}` with the year taken from `created_at`.
    pub fn display_number(&self) -> Option<String> {
        display_number(self.numero, self.created_at.as_deref())
    }
}

fn display_number(numero: Option<u64>, created_at: Option<&str>) -> Option<String> {
    let numero = numero?;
    let year = created_at
        .and_then(|c| c.get(..4))
        .and_then(|y| y.parse::<i32>().ok());
    Some(match year {
        Some(y) => format!("{numero}/{y}"),
        None => numero.to_string(),
    })
}

#[derive(Debug, Deserialize)]
pub(crate) struct MaterialRow {
    pub id: Uuid,
    pub tipo: ItemKind,
    pub codigo_item: Option<String>,
    pub descricao: String,
    pub quantidade: Decimal,
    pub unidade_medida: String,
    pub valor_unitario: Decimal,
    pub justificativa: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponsibleRow {
    pub id: Uuid,
    pub funcao: Option<ResponsibleRole>,
    pub funcao_id: Option<Uuid>,
    pub cargo: Option<String>,
    pub cargo_id: Option<Uuid>,
    pub nome: String,
    pub cpf: String,
    pub email: Option<String>,
    pub telefone: Option<String>,
}

/// DFD header with embedded child rows (`select=*,materiais_servicos(*),responsaveis(*)`).
#[derive(Debug, Deserialize)]
pub(crate) struct DfdRow {
    pub id: Uuid,
    pub numero: Option<u64>,
    pub created_at: Option<String>,
    pub numero_uasg: String,
    pub area_requisitante_id: Option<Uuid>,
    pub descricao_sucinta: Option<String>,
    pub justificativa_necessidade: Option<String>,
    pub data_conclusao: Option<NaiveDate>,
    pub prioridade: Option<Priority>,
    pub situacao: Option<DfdStatus>,
    #[serde(default)]
    pub materiais_servicos: Vec<MaterialRow>,
    #[serde(default)]
    pub responsaveis: Vec<ResponsibleRow>,
}

impl From<DfdRow> for Dfd {
    fn from(row: DfdRow) -> Self {
        let number = display_number(row.numero, row.created_at.as_deref());
        Dfd {
            id: Some(row.id),
            number,
            uasg_number: row.numero_uasg,
            area_id: row.area_requisitante_id.unwrap_or(Uuid::nil()),
            description: row.descricao_sucinta.unwrap_or_default(),
            justification: row.justificativa_necessidade.unwrap_or_default(),
            conclusion_date: row.data_conclusao,
            priority: row.prioridade.unwrap_or_default(),
            priority_justification: None,
            status: row.situacao.unwrap_or_default(),
            materials: row
                .materiais_servicos
                .into_iter()
                .map(|m| Material {
                    id: Some(m.id),
                    kind: m.tipo,
                    code: m.codigo_item,
                    description: m.descricao,
                    quantity: m.quantidade,
                    unit: m.unidade_medida,
                    unit_price: m.valor_unitario,
                    justification: m.justificativa,
                })
                .collect(),
            responsibles: row
                .responsaveis
                .into_iter()
                .map(|r| Responsible {
                    id: Some(r.id),
                    name: r.nome,
                    cpf: r.cpf,
                    role: r.funcao.unwrap_or(ResponsibleRole::Requester),
                    function_id: r.funcao_id,
                    position: r.cargo,
                    position_id: r.cargo_id,
                    email: r.email,
                    phone: r.telefone,
                })
                .collect(),
            attachments: Vec::new(),
        }
    }
}
