use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_decimal_macros::dec;
use uuid::Uuid;

use contrata::core::*;

fn build_dfd(lines: usize) -> Dfd {
    let mut builder = DfdBuilder::new("200999", Uuid::from_u128(1))
        .description("Aquisição de mobiliário escolar")
        .justification("Ampliação da rede municipal de ensino")
        .add_responsible(
            ResponsibleBuilder::new("Maria Souza", "529.982.247-25", ResponsibleRole::Requester)
                .email("maria@camocim.ce.gov.br")
                .phone("(88) 99999-9999")
                .build(),
        );
    for i in 1..=lines {
        builder = builder.add_material(
            MaterialBuilder::new(format!("Item {i}"), dec!(3), "UN", dec!(149.90)).build(),
        );
    }
    builder.build_unchecked()
}

fn bench_fiscal(c: &mut Criterion) {
    c.bench_function("is_valid_cpf", |b| {
        b.iter(|| black_box(is_valid_cpf(black_box("529.982.247-25"))));
    });
    c.bench_function("is_valid_cnpj", |b| {
        b.iter(|| black_box(is_valid_cnpj(black_box("11.444.777/0001-61"))));
    });
    c.bench_function("format_document", |b| {
        b.iter(|| black_box(format_document(black_box("11444777000161"))));
    });
}

fn bench_money(c: &mut Criterion) {
    c.bench_function("format_amount", |b| {
        b.iter(|| black_box(format_amount(black_box(dec!(1234567.89)))));
    });
    c.bench_function("parse_amount", |b| {
        b.iter(|| black_box(parse_amount(black_box("R$ 1.234.567,89"))));
    });
    c.bench_function("amount_in_words", |b| {
        b.iter(|| black_box(amount_in_words(black_box(dec!(1234567.89)))));
    });
}

fn bench_validate_dfd(c: &mut Criterion) {
    let small = build_dfd(10);
    c.bench_function("validate_dfd_10_materials", |b| {
        b.iter(|| black_box(validate_dfd(black_box(&small))));
    });

    // duplicate detection is quadratic in the number of lines
    let large = build_dfd(1000);
    c.bench_function("validate_dfd_1000_materials", |b| {
        b.iter(|| black_box(validate_dfd(black_box(&large))));
    });
}

fn bench_catalog(c: &mut Criterion) {
    let catalog: Vec<CatalogItem> = (1..=500)
        .map(|i| CatalogItem {
            id: Uuid::nil(),
            code: Some(format!("CATMAT-{i}")),
            kind: ItemKind::Material,
            description: format!("cadeira escolar modelo {i} com prancheta"),
            unit: "UN".into(),
            reference_price: Some(dec!(189.90)),
            specifications: None,
            active: true,
        })
        .collect();
    c.bench_function("find_similar_500_items", |b| {
        b.iter(|| {
            black_box(find_similar(
                black_box("mesa de professor em madeira"),
                black_box(&catalog),
            ))
        });
    });
}

criterion_group!(
    benches,
    bench_fiscal,
    bench_money,
    bench_validate_dfd,
    bench_catalog
);
criterion_main!(benches);
