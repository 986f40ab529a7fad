use contrata::core::*;
use contrata::draft::*;
use rust_decimal_macros::dec;
use uuid::Uuid;

#[tokio::main]
async fn main() {
    let catalog = vec![CatalogItem {
        id: Uuid::new_v4(),
        code: Some("CATMAT-232145".into()),
        kind: ItemKind::Material,
        description: "Papel sulfite A4 75g resma".into(),
        unit: "RESMA".into(),
        reference_price: Some(dec!(27.90)),
        specifications: None,
        active: true,
    }];

    let mut draft = DraftDfd::new("200999", Uuid::new_v4());
    draft.description = "Material de expediente".into();
    draft.justification = "Reposição do estoque do almoxarifado".into();

    let typed =
        MaterialBuilder::new("papel sulfite A4 75g resma", dec!(50), "RESMA", dec!(25)).build();
    match draft.add_material(typed, &catalog, false).expect("valid line") {
        MaterialAdded::Added(id) => println!("added {id}"),
        MaterialAdded::SimilarInCatalog { description, .. } => {
            println!("catalog already has \"{description}\", importing it instead");
            let import = draft.add_from_catalog(&catalog);
            println!("imported {} item(s)", import.added.len());
        }
    }
    draft
        .add_responsible(
            ResponsibleBuilder::new("Maria Souza", "529.982.247-25", ResponsibleRole::Requester)
                .build(),
        )
        .expect("valid CPF");

    let store = MemoryStore::new(2025);
    let dfd = submit(&draft, &store, Uuid::new_v4())
        .await
        .expect("draft should be saved");
    println!(
        "saved DFD {} with {} item(s), total {}",
        dfd.number.as_deref().unwrap_or("-"),
        dfd.materials.len(),
        format_amount(dfd.total())
    );

    // A failing child insert rolls the DFD back
    store.fail_on(Operation::InsertResponsibles);
    match submit(&draft, &store, Uuid::new_v4()).await {
        Ok(_) => println!("unexpectedly saved"),
        Err(e) => println!("second save failed: {e}"),
    }
    println!("DFDs in store: {}", store.len());
}
