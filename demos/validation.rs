use contrata::core::*;
use rust_decimal_macros::dec;
use uuid::Uuid;

fn main() {
    // ── 1. DFD with every header field missing ────────────────────────
    println!("=== Builder ===");
    match DfdBuilder::new("", Uuid::nil()).build() {
        Ok(_) => println!("  unexpectedly valid"),
        Err(e) => println!("  Build failed: {e}"),
    }

    // ── 2. Line and responsible errors, listed one by one ─────────────
    println!("\n=== validate_dfd ===");
    let dfd = DfdBuilder::new("200999", Uuid::new_v4())
        .description("Material de limpeza")
        .justification("Reposição trimestral")
        .add_material(MaterialBuilder::new("Detergente neutro", dec!(0), "L", dec!(4.5)).build())
        .add_material(MaterialBuilder::new("detergente NEUTRO", dec!(10), "L", dec!(4.5)).build())
        .add_responsible(
            ResponsibleBuilder::new("João Lima", "111.111.111-11", ResponsibleRole::Inspector)
                .email("joao.camocim")
                .build(),
        )
        .build_unchecked();
    let errors = validate_dfd(&dfd);
    println!("  Found {} validation errors:", errors.len());
    for e in &errors {
        println!("  - {e}");
    }

    // ── 3. Simplified plan request form ───────────────────────────────
    println!("\n=== validate_pca_request ===");
    let request = PcaRequest {
        requester: Requester::default(),
        items: vec![PcaItem::empty()],
    };
    for e in validate_pca_request(&request, &PcaFormRules::default()) {
        println!("  - {}", e.message);
    }

    // ── 4. Per-field form errors ──────────────────────────────────────
    println!("\n=== FieldErrors ===");
    let mut form = FieldErrors::new();
    form.check_cnpj("fornecedor", "11.444.777/0001-60");
    form.check_monetary("valor", dec!(150), "cento e quarenta reais");
    for (field, message) in form.iter() {
        println!("  {field}: {message}");
    }
}
