//! DFD report export.
//!
//! Produces the printable DFD document as plain text, laid out in the
//! sections of the official form, plus `materiais.csv` and
//! `responsaveis.csv` for spreadsheets.
//!
//! # Example
//!
//! ```ignore
//! use contrata::report::*;
//!
//! let report = DfdReport {
//!     dfd,
//!     area_name: "Almoxarifado Central".into(),
//!     generated_on: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
//! };
//! let export = export_dfd(&report, &ReportConfig::default())?;
//! // export.text: the document
//! // export.files: vec of (filename, csv_content) pairs
//! ```

mod csv_export;

pub use csv_export::{MATERIALS_FILE, RESPONSIBLES_FILE, materials_csv, responsibles_csv};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{
    Attachment, Dfd, Material, PcaError, Responsible, format_amount, format_cpf,
    format_decimal_br, format_phone,
};

/// Material descriptions longer than this are cut in the text table.
const DESCRIPTION_WIDTH: usize = 40;

/// Header settings for the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Issuing body, printed above the title when not empty.
    pub organization: String,
    pub title: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            organization: String::new(),
            title: "Documento de Formalização de Demanda (DFD)".into(),
        }
    }
}

/// A saved DFD and the context needed to print it.
#[derive(Debug, Clone)]
pub struct DfdReport {
    pub dfd: Dfd,
    pub area_name: String,
    pub generated_on: NaiveDate,
}

/// Result of a DFD export.
#[derive(Debug, Clone)]
pub struct DfdExport {
    /// Base file name, `DFD_{number}_{uasg}` with `/` replaced by `-`.
    pub file_stem: String,
    pub text: String,
    /// Data files: Vec of (filename, content) pairs.
    pub files: Vec<(String, String)>,
}

/// Export a saved DFD. Unsaved DFDs (no number yet) are rejected.
pub fn export_dfd(report: &DfdReport, config: &ReportConfig) -> Result<DfdExport, PcaError> {
    let dfd = &report.dfd;
    let number = dfd
        .number
        .as_deref()
        .ok_or_else(|| PcaError::Builder("DFD must be saved before it is exported".into()))?;

    Ok(DfdExport {
        file_stem: format!("DFD_{}_{}", number.replace('/', "-"), dfd.uasg_number),
        text: render_text(report, config, number),
        files: vec![
            (MATERIALS_FILE.into(), materials_csv(&dfd.materials)),
            (RESPONSIBLES_FILE.into(), responsibles_csv(&dfd.responsibles)),
        ],
    })
}

fn render_text(report: &DfdReport, config: &ReportConfig, number: &str) -> String {
    let dfd = &report.dfd;
    let mut out = String::new();

    if !config.organization.trim().is_empty() {
        line(&mut out, config.organization.trim());
    }
    line(&mut out, &config.title);
    out.push('\n');

    out.push_str("1. Informações Gerais\n");
    line(&mut out, &format!("Número DFD: {number}"));
    line(&mut out, &format!("Número UNIDADE GESTORA: {}", dfd.uasg_number));
    line(&mut out, &format!("Área Requisitante: {}", report.area_name));
    line(&mut out, &format!("Prioridade: {}", dfd.priority.label()));
    line(&mut out, &format!("Valor Total: {}", format_amount(dfd.total())));

    if !dfd.description.trim().is_empty() {
        out.push('\n');
        out.push_str("Descrição Sucinta:\n");
        line(&mut out, dfd.description.trim());
    }
    if !dfd.justification.trim().is_empty() {
        out.push('\n');
        out.push_str("Justificativa da Necessidade:\n");
        line(&mut out, dfd.justification.trim());
    }

    out.push('\n');
    out.push_str("2. Materiais e Serviços\n");
    render_materials(&mut out, &dfd.materials);

    out.push('\n');
    out.push_str("3. Responsáveis\n");
    render_responsibles(&mut out, &dfd.responsibles);

    out.push('\n');
    out.push_str("4. Anexos\n");
    render_attachments(&mut out, &dfd.attachments);

    out.push('\n');
    line(&mut out, &format!("Gerado em: {}", report.generated_on.format("%d/%m/%Y")));
    out
}

fn line(out: &mut String, text: &str) {
    out.push_str(text);
    out.push('\n');
}

fn row(out: &mut String, cells: &[&str]) {
    out.push_str(&cells.join(" | "));
    out.push('\n');
}

fn shorten(s: &str) -> String {
    if s.chars().count() > DESCRIPTION_WIDTH {
        let cut: String = s.chars().take(DESCRIPTION_WIDTH).collect();
        format!("{cut}...")
    } else {
        s.to_string()
    }
}

fn render_materials(out: &mut String, materials: &[Material]) {
    if materials.is_empty() {
        out.push_str("Nenhum material ou serviço cadastrado.\n");
        return;
    }
    row(
        out,
        &["Código", "Tipo", "Descrição", "Qtd", "Un.", "Vlr. Unit.", "Vlr. Total"],
    );
    for m in materials {
        let quantity = format_quantity(m.quantity);
        let unit_price = format_amount(m.unit_price);
        let total = format_amount(m.total());
        let description = shorten(&m.description);
        row(
            out,
            &[
                m.code.as_deref().unwrap_or("-"),
                m.kind.label(),
                description.as_str(),
                quantity.as_str(),
                m.unit.as_str(),
                unit_price.as_str(),
                total.as_str(),
            ],
        );
    }
    let total: Decimal = materials.iter().map(Material::total).sum();
    line(out, &format!("Total: {}", format_amount(total)));
}

fn render_responsibles(out: &mut String, responsibles: &[Responsible]) {
    if responsibles.is_empty() {
        out.push_str("Nenhum responsável cadastrado.\n");
        return;
    }
    row(out, &["Nome", "CPF", "Função", "Cargo", "E-mail", "Telefone"]);
    for r in responsibles {
        let cpf = format_cpf(&r.cpf);
        let phone = r.phone.as_deref().map(format_phone);
        row(
            out,
            &[
                r.name.as_str(),
                cpf.as_str(),
                r.role.label(),
                r.position.as_deref().unwrap_or("-"),
                r.email.as_deref().unwrap_or("-"),
                phone.as_deref().unwrap_or("-"),
            ],
        );
    }
}

fn render_attachments(out: &mut String, attachments: &[Attachment]) {
    if attachments.is_empty() {
        out.push_str("Nenhum anexo incluído.\n");
        return;
    }
    row(out, &["#", "Nome do Arquivo", "Tamanho", "Data de Upload"]);
    for (i, a) in attachments.iter().enumerate() {
        let index = (i + 1).to_string();
        let size = format!(
            "{} KB",
            format_decimal_br(Decimal::from(a.size_bytes) / Decimal::from(1024))
        );
        let date = a.uploaded_on.format("%d/%m/%Y").to_string();
        row(
            out,
            &[index.as_str(), a.file_name.as_str(), size.as_str(), date.as_str()],
        );
    }
}

/// Quantity in pt-BR notation without trailing zeros: `2.50` → `2,5`.
fn format_quantity(d: Decimal) -> String {
    d.normalize().to_string().replace('.', ",")
}
