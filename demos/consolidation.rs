use contrata::consolidation::*;
use contrata::core::{Priority, format_amount};
use rust_decimal_macros::dec;

fn main() {
    let entry = |class: &str, dfd: &str, area: &str, description: &str, value| ConsolidationEntry {
        class: class.into(),
        dfd_number: dfd.into(),
        uasg_number: "200999".into(),
        area_name: area.into(),
        description: description.into(),
        conclusion_date: None,
        estimated_value: value,
        priority: Priority::Medium,
    };
    const FURNITURE: &str = "7110-Mobiliário para escritório";
    const PRINTING: &str = "3610-Equipamento para impressão, duplicação e encadernação";
    let entries = vec![
        entry(FURNITURE, "12/2025", "Educação", "Cadeira giratória", dec!(12000)),
        entry(PRINTING, "3/2025", "Saúde", "Impressora laser", dec!(5697)),
        entry(PRINTING, "9/2025", "Educação", "Impressora de etiquetas", dec!(1500.50)),
    ];

    let summary = consolidate(&entries);
    for class in &summary {
        println!(
            "{:<60} {:>3} DFD(s) {:>16}",
            class.class,
            class.dfd_count,
            format_amount(class.estimated_total)
        );
    }
    println!("Total: {}", format_amount(grand_total(&summary)));

    let filter = ConsolidationFilter {
        area_name: Some("Educação".into()),
        term: None,
    };
    let education = consolidate_filtered(&entries, &filter);
    println!("Educação: {}", format_amount(grand_total(&education)));
}
