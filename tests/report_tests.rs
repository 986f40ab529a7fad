#![cfg(feature = "report")]

use chrono::NaiveDate;
use contrata::core::*;
use contrata::report::*;
use rust_decimal_macros::dec;
use uuid::Uuid;

fn saved_dfd() -> Dfd {
    let mut dfd = DfdBuilder::new("200999", Uuid::from_u128(7))
        .number("124/2022")
        .description("Aquisição de impressoras")
        .justification("Substituição de equipamentos obsoletos")
        .priority(Priority::High)
        .add_material(
            MaterialBuilder::new(
                "Impressora multifuncional laser monocromática A4 com duplex",
                dec!(3),
                "UN",
                dec!(1899.00),
            )
            .code("CATMAT-451234")
            .build(),
        )
        .add_material(
            MaterialBuilder::new("Instalação e configuração", dec!(1), "SV", dec!(350.5))
                .kind(ItemKind::Service)
                .build(),
        )
        .add_responsible(
            ResponsibleBuilder::new("Maria Souza", "529.982.247-25", ResponsibleRole::Requester)
                .position("Coordenadora", None)
                .email("maria@camocim.ce.gov.br")
                .phone("(88) 99999-9999")
                .build(),
        )
        .add_responsible(
            ResponsibleBuilder::new("João Lima", "111.444.777-35", ResponsibleRole::Technical)
                .build(),
        )
        .add_attachment(Attachment {
            id: Uuid::from_u128(100),
            file_name: "termo_referencia.pdf".into(),
            size_bytes: 153_600,
            mime_type: Some("application/pdf".into()),
            storage_path: "dfds/124-2022/termo_referencia.pdf".into(),
            uploaded_on: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
        })
        .build()
        .unwrap();
    dfd.id = Some(Uuid::from_u128(1));
    dfd
}

fn report() -> DfdReport {
    DfdReport {
        dfd: saved_dfd(),
        area_name: "Almoxarifado Central".into(),
        generated_on: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
    }
}

fn config() -> ReportConfig {
    ReportConfig {
        organization: "Prefeitura Municipal de Camocim".into(),
        ..ReportConfig::default()
    }
}

// --- Text ---

#[test]
fn report_text_layout() {
    let export = export_dfd(&report(), &config()).unwrap();
    insta::assert_snapshot!("dfd_report_text", export.text);
}

#[test]
fn file_stem_from_number_and_uasg() {
    let export = export_dfd(&report(), &config()).unwrap();
    assert_eq!(export.file_stem, "DFD_124-2022_200999");
}

#[test]
fn organization_line_is_optional() {
    let export = export_dfd(&report(), &ReportConfig::default()).unwrap();
    assert!(
        export
            .text
            .starts_with("Documento de Formalização de Demanda (DFD)\n\n1. Informações Gerais\n")
    );
}

#[test]
fn empty_texts_are_left_out() {
    let mut r = report();
    r.dfd.justification = "  ".into();
    let export = export_dfd(&r, &config()).unwrap();
    assert!(export.text.contains("Descrição Sucinta:"));
    assert!(!export.text.contains("Justificativa da Necessidade:"));
}

#[test]
fn unsaved_dfd_cannot_be_exported() {
    let mut r = report();
    r.dfd.number = None;
    assert!(matches!(
        export_dfd(&r, &config()),
        Err(PcaError::Builder(_))
    ));
}

// --- CSV ---

#[test]
fn csv_files_attached() {
    let export = export_dfd(&report(), &config()).unwrap();
    let names: Vec<&str> = export.files.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec![MATERIALS_FILE, RESPONSIBLES_FILE]);

    let materials = &export.files[0].1;
    let rows: Vec<&str> = materials.split("\r\n").filter(|l| !l.is_empty()).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2], "\"\";\"Serviço\";\"Instalação e configuração\";1;\"SV\";350,50;350,50");
    // no digit grouping in data files
    assert!(rows[1].ends_with(";1899,00;5697,00"));
}

#[test]
fn responsibles_csv_rows() {
    let csv = responsibles_csv(&saved_dfd().responsibles);
    let rows: Vec<&str> = csv.split("\r\n").collect();
    assert_eq!(rows[0], "\"Nome\";\"CPF\";\"Função\";\"Cargo\";\"E-mail\";\"Telefone\"");
    assert_eq!(rows[2], "\"João Lima\";\"111.444.777-35\";\"Técnico\";\"\";\"\";\"\"");
    assert_eq!(rows[3], "");
}

#[test]
fn empty_lists_give_header_only() {
    assert_eq!(materials_csv(&[]).lines().count(), 1);
    assert_eq!(responsibles_csv(&[]).lines().count(), 1);
}
