use chrono::NaiveDate;
use contrata::core::*;
use contrata::report::*;
use rust_decimal_macros::dec;
use uuid::Uuid;

fn main() {
    let dfd = DfdBuilder::new("200999", Uuid::new_v4())
        .number("124/2022")
        .description("Aquisição de impressoras")
        .justification("Substituição de equipamentos obsoletos")
        .add_material(
            MaterialBuilder::new("Impressora multifuncional laser", dec!(3), "UN", dec!(1899))
                .code("CATMAT-451234")
                .build(),
        )
        .build()
        .expect("DFD should be valid");

    let report = DfdReport {
        dfd,
        area_name: "Almoxarifado Central".into(),
        generated_on: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
    };
    let config = ReportConfig {
        organization: "Prefeitura Municipal de Camocim".into(),
        ..ReportConfig::default()
    };
    let export = export_dfd(&report, &config).expect("saved DFD");

    println!("=== {}.txt ===", export.file_stem);
    println!("{}", export.text);
    for (name, content) in &export.files {
        println!("=== {name} ===");
        println!("{content}");
    }
}
