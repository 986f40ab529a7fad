use chrono::NaiveDate;
use contrata::core::*;
use rust_decimal_macros::dec;
use uuid::Uuid;

fn main() {
    // Fiscal documents
    for doc in ["529.982.247-25", "11.444.777/0001-61", "123.456.789-00"] {
        println!("{:<20} valid: {}", doc, is_valid_document(doc));
    }
    println!("{}", format_document("11444777000161"));
    println!();

    let dfd = DfdBuilder::new("200999", Uuid::new_v4())
        .description("Aquisição de mobiliário escolar")
        .justification("Ampliação da rede municipal de ensino fundamental")
        .conclusion_date(NaiveDate::from_ymd_opt(2025, 8, 1).unwrap())
        .priority(Priority::High)
        .add_material(
            MaterialBuilder::new("Cadeira escolar empilhável", dec!(40), "UN", dec!(189.90))
                .code("CATMAT-150632")
                .build(),
        )
        .add_material(
            MaterialBuilder::new("Mesa do professor", dec!(2), "UN", dec!(450))
                .justification("Uma mesa por sala nova")
                .build(),
        )
        .add_responsible(
            ResponsibleBuilder::new("Maria Souza", "529.982.247-25", ResponsibleRole::Requester)
                .position("Coordenadora pedagógica", None)
                .email("maria@camocim.ce.gov.br")
                .phone("(88) 99999-9999")
                .build(),
        )
        .build()
        .expect("DFD should be valid");

    println!("UASG:       {}", dfd.uasg_number);
    println!("Priority:   {}", dfd.priority.label());
    println!("---");
    for m in &dfd.materials {
        println!(
            "  {} {} {} @ {} = {}",
            m.quantity,
            m.unit,
            m.description,
            format_amount(m.unit_price),
            format_amount(m.total())
        );
    }
    println!("---");
    println!("Total:      {}", format_amount(dfd.total()));
    if let Some(words) = amount_in_words(dfd.total()) {
        println!("Por extenso: {words}");
    }

    let mut numbers = DfdNumberSequence::starting_at(2025, 41);
    println!("Next number: {}", numbers.next_number());
}
