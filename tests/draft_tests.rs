#![cfg(feature = "draft")]

use contrata::core::*;
use contrata::draft::*;
use rust_decimal_macros::dec;
use uuid::Uuid;

fn user() -> Uuid {
    Uuid::from_u128(42)
}

fn draft() -> DraftDfd {
    let mut d = DraftDfd::new("200999", Uuid::from_u128(7));
    d.description = "Aquisição de mobiliário escolar".into();
    d.justification = "Ampliação da rede municipal de ensino".into();
    d.priority = Priority::High;
    d.add_material(
        MaterialBuilder::new("Cadeira escolar empilhável", dec!(40), "UN", dec!(189.90)).build(),
        &[],
        false,
    )
    .unwrap();
    d.add_material(
        MaterialBuilder::new("Mesa do professor", dec!(2), "UN", dec!(450)).build(),
        &[],
        false,
    )
    .unwrap();
    d.add_responsible(
        ResponsibleBuilder::new("Maria Souza", "529.982.247-25", ResponsibleRole::Requester)
            .email("maria@camocim.ce.gov.br")
            .build(),
    )
    .unwrap();
    d
}

// --- Draft editing ---

#[test]
fn temp_ids_are_sequential() {
    let d = draft();
    let ids: Vec<String> = d.materials().iter().map(|m| m.temp_id.to_string()).collect();
    assert_eq!(ids, vec!["temp-1", "temp-2"]);
    assert_eq!(d.responsibles()[0].temp_id.to_string(), "temp-3");
    assert_eq!(d.total(), dec!(8496.00));
}

#[test]
fn removed_ids_are_not_reused() {
    let mut d = draft();
    let first = d.materials()[0].temp_id;
    d.remove_material(first).unwrap();
    let added = d
        .add_material(
            MaterialBuilder::new("Armário de aço", dec!(1), "UN", dec!(900)).build(),
            &[],
            false,
        )
        .unwrap();
    assert_eq!(added, MaterialAdded::Added(d.materials()[1].temp_id));
    assert_eq!(d.materials()[1].temp_id.get(), 4);
    assert!(matches!(d.remove_material(first), Err(DraftError::NotFound(_))));
}

#[test]
fn duplicate_description_rejected() {
    let mut d = draft();
    let err = d
        .add_material(
            MaterialBuilder::new("MESA DO PROFESSOR", dec!(1), "UN", dec!(1)).build(),
            &[],
            true,
        )
        .unwrap_err();
    assert!(matches!(err, DraftError::Duplicate(_)));
    assert_eq!(d.materials().len(), 2);
}

#[test]
fn update_may_keep_own_description() {
    let mut d = draft();
    let id = d.materials()[1].temp_id;
    let resized = MaterialBuilder::new("Mesa do professor", dec!(3), "UN", dec!(450)).build();
    d.update_material(id, resized).unwrap();
    assert_eq!(d.total(), dec!(8946.00));

    let clash = MaterialBuilder::new("Cadeira escolar empilhável", dec!(1), "UN", dec!(1)).build();
    let err = d.update_material(id, clash).unwrap_err();
    assert!(matches!(err, DraftError::Duplicate(_)));
}

#[test]
fn invalid_line_rejected() {
    let mut d = draft();
    let err = d
        .add_material(MaterialBuilder::new("Lousa", dec!(0), "UN", dec!(300)).build(), &[], false)
        .unwrap_err();
    match err {
        DraftError::Invalid(errors) => assert_eq!(errors[0].rule.as_deref(), Some("DFD-06")),
        other => panic!("expected invalid row, got {other:?}"),
    }
}

#[test]
fn similar_catalog_item_holds_back_typed_line() {
    let catalog = vec![CatalogItem {
        id: Uuid::from_u128(9),
        code: Some("CATMAT-150".into()),
        kind: ItemKind::Material,
        description: "Quadro branco magnético 120x90".into(),
        unit: "UN".into(),
        reference_price: Some(dec!(320)),
        specifications: None,
        active: true,
    }];
    let mut d = draft();
    let typed =
        MaterialBuilder::new("quadro branco magnético 120X90", dec!(5), "UN", dec!(300)).build();

    let outcome = d.add_material(typed.clone(), &catalog, false).unwrap();
    assert_eq!(
        outcome,
        MaterialAdded::SimilarInCatalog {
            item_id: Uuid::from_u128(9),
            description: "Quadro branco magnético 120x90".into(),
        }
    );
    assert_eq!(d.materials().len(), 2);

    assert!(matches!(d.add_material(typed, &catalog, true).unwrap(), MaterialAdded::Added(_)));
    assert_eq!(d.materials().len(), 3);
}

#[test]
fn catalog_import_skips_present_items() {
    let item = |n: u128, desc: &str| CatalogItem {
        id: Uuid::from_u128(n),
        code: Some(format!("CATMAT-{n}")),
        kind: ItemKind::Material,
        description: desc.into(),
        unit: "UN".into(),
        reference_price: Some(dec!(10)),
        specifications: None,
        active: true,
    };
    let mut d = draft();
    let import = d.add_from_catalog(&[item(1, "Mesa do professor"), item(2, "Apagador")]);
    assert_eq!(import.skipped, 1);
    assert_eq!(import.added.len(), 1);
    let added = d.materials().last().unwrap();
    assert_eq!(added.material.quantity, dec!(1));
    assert_eq!(added.material.unit_price, dec!(10));
}

#[test]
fn responsible_cpf_checked_on_add() {
    let mut d = draft();
    let bad = ResponsibleBuilder::new("João", "123.456.789-00", ResponsibleRole::Technical).build();
    assert!(matches!(d.add_responsible(bad), Err(DraftError::InvalidCpf(_))));
    assert_eq!(d.responsibles().len(), 1);
}

// --- Submit ---

#[tokio::test]
async fn submit_saves_dfd_and_children() {
    let store = MemoryStore::new(2025);
    let dfd = submit(&draft(), &store, user()).await.unwrap();

    let id = dfd.id.unwrap();
    assert_eq!(dfd.number.as_deref(), Some("1/2025"));
    assert_eq!(dfd.status, DfdStatus::Draft);
    assert!(dfd.materials.iter().all(|m| m.id.is_some()));
    assert!(dfd.responsibles.iter().all(|r| r.id.is_some()));
    assert_eq!(store.owner_of(id), Some(user()));
    assert_eq!(
        store.calls(),
        vec![
            Operation::InsertDfd,
            Operation::InsertMaterials,
            Operation::InsertResponsibles
        ]
    );

    let stored = store.fetch_dfd(id).await.unwrap().unwrap();
    assert_eq!(stored.materials.len(), 2);
    assert_eq!(stored.total(), dec!(8496.00));
}

#[tokio::test]
async fn submit_numbers_consecutively() {
    let store = MemoryStore::with_sequence(DfdNumberSequence::starting_at(2022, 124));
    let a = submit(&draft(), &store, user()).await.unwrap();
    let b = submit(&draft(), &store, user()).await.unwrap();
    assert_eq!(a.number.as_deref(), Some("124/2022"));
    assert_eq!(b.number.as_deref(), Some("125/2022"));
}

#[tokio::test]
async fn invalid_draft_writes_nothing() {
    let store = MemoryStore::new(2025);
    let mut d = draft();
    d.justification.clear();
    let err = submit(&d, &store, user()).await.unwrap_err();
    assert!(matches!(err, SubmitError::Invalid(_)));
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn children_are_optional() {
    let store = MemoryStore::new(2025);
    let mut d = DraftDfd::new("200999", Uuid::from_u128(7));
    d.description = "Serviço de dedetização".into();
    d.justification = "Controle de pragas nas escolas".into();
    let dfd = submit(&d, &store, user()).await.unwrap();
    assert!(dfd.materials.is_empty());
    assert_eq!(store.calls(), vec![Operation::InsertDfd]);
}

#[tokio::test]
async fn parent_failure_stops_early() {
    let store = MemoryStore::new(2025);
    store.fail_on(Operation::InsertDfd);
    let err = submit(&draft(), &store, user()).await.unwrap_err();
    assert!(matches!(err, SubmitError::Parent(_)));
    assert_eq!(store.calls(), vec![Operation::InsertDfd]);
    assert!(store.is_empty());
}

#[tokio::test]
async fn material_failure_rolls_back() {
    let store = MemoryStore::new(2025);
    store.fail_on(Operation::InsertMaterials);
    let err = submit(&draft(), &store, user()).await.unwrap_err();
    assert!(matches!(err, SubmitError::ChildrenRolledBack { .. }));
    assert!(store.is_empty());
    assert_eq!(
        store.calls(),
        vec![
            Operation::InsertDfd,
            Operation::InsertMaterials,
            Operation::DeleteDfd
        ]
    );
}

#[tokio::test]
async fn responsible_failure_rolls_back() {
    let store = MemoryStore::new(2025);
    store.fail_on(Operation::InsertResponsibles);
    let err = submit(&draft(), &store, user()).await.unwrap_err();
    match err {
        SubmitError::ChildrenRolledBack { source, .. } => {
            assert!(source.to_string().contains("InsertResponsibles"));
        }
        other => panic!("expected rollback, got {other:?}"),
    }
    assert!(store.is_empty());
}

#[tokio::test]
async fn failed_rollback_is_reported_and_not_retried() {
    let store = MemoryStore::new(2025);
    store.fail_on(Operation::InsertMaterials);
    store.fail_on(Operation::DeleteDfd);
    let err = submit(&draft(), &store, user()).await.unwrap_err();

    let dfd_id = match err {
        SubmitError::RollbackFailed { dfd_id, .. } => dfd_id,
        other => panic!("expected failed rollback, got {other:?}"),
    };
    assert_eq!(store.len(), 1);
    assert_eq!(store.owner_of(dfd_id), Some(user()));
    let deletes = store
        .calls()
        .into_iter()
        .filter(|op| *op == Operation::DeleteDfd)
        .count();
    assert_eq!(deletes, 1);
}

// --- Send ---

#[tokio::test]
async fn send_moves_draft_to_sent() {
    let store = MemoryStore::new(2025);
    let id = submit(&draft(), &store, user()).await.unwrap().id.unwrap();

    send(&store, id).await.unwrap();
    let stored = store.fetch_dfd(id).await.unwrap().unwrap();
    assert_eq!(stored.status, DfdStatus::Sent);

    let err = send(&store, id).await.unwrap_err();
    assert!(matches!(
        err,
        SubmitError::NotDraft {
            status: DfdStatus::Sent,
            ..
        }
    ));
    assert!(err.to_string().contains("cannot be sent"));
}

#[tokio::test]
async fn send_unknown_dfd() {
    let store = MemoryStore::new(2025);
    let id = Uuid::from_u128(1);
    assert!(matches!(send(&store, id).await, Err(SubmitError::NotFound(_))));
}

#[tokio::test]
async fn send_store_failure_surfaces() {
    let store = MemoryStore::new(2025);
    let id = submit(&draft(), &store, user()).await.unwrap().id.unwrap();
    store.fail_on(Operation::UpdateStatus);
    assert!(matches!(send(&store, id).await, Err(SubmitError::Store(_))));
    store.clear_failures();
    assert!(send(&store, id).await.is_ok());
}
