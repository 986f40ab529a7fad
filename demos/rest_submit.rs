//! Saves a DFD through a PostgREST backend.
//!
//! Requires `CONTRATA_API_URL` and `CONTRATA_API_KEY`.

use contrata::core::*;
use contrata::draft::*;
use contrata::rest::*;
use rust_decimal_macros::dec;
use uuid::Uuid;

#[tokio::main]
async fn main() {
    let config = match RestConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    let store = RestStore::new(config).expect("HTTP client");

    let mut draft = DraftDfd::new("200999", Uuid::new_v4());
    draft.description = "Serviço de manutenção predial".into();
    draft.justification = "Manutenção preventiva das escolas".into();
    draft
        .add_material(
            MaterialBuilder::new("Manutenção elétrica", dec!(120), "H", dec!(85))
                .kind(ItemKind::Service)
                .build(),
            &[],
            false,
        )
        .expect("valid line");

    match submit(&draft, &store, Uuid::new_v4()).await {
        Ok(dfd) => {
            println!("saved DFD {}", dfd.number.as_deref().unwrap_or("-"));
            if let Some(id) = dfd.id {
                match send(&store, id).await {
                    Ok(()) => println!("sent for analysis"),
                    Err(e) => eprintln!("send failed: {e}"),
                }
            }
        }
        Err(e) => eprintln!("save failed: {e}"),
    }
}
