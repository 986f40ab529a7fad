use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use uuid::Uuid;

use super::RestConfig;
use super::rows::{
    DFDS, DfdRow, IdRow, InsertedDfdRow, MATERIALS, NewDfdRow, NewMaterialRow,
    NewResponsibleRow, RESPONSIBLES,
};
use crate::core::{Dfd, DfdStatus, Material, Responsible};
use crate::draft::{InsertedDfd, Store, StoreError};

/// [`Store`] talking to PostgREST endpoints over HTTPS.
#[derive(Debug, Clone)]
pub struct RestStore {
    client: Client,
    config: RestConfig,
}

impl RestStore {
    pub fn new(config: RestConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StoreError::Network(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &RestConfig {
        &self.config
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        let req = req
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key);
        match &self.config.schema {
            Some(schema) => req
                .header("Accept-Profile", schema)
                .header("Content-Profile", schema),
            None => req,
        }
    }

    fn insert(&self, table: &str) -> RequestBuilder {
        self.authorize(self.client.post(self.config.table_url(table)))
            .header("Prefer", "return=representation")
    }

    fn by_id(&self, table: &str, column: &str, id: Uuid) -> String {
        format!("{}?{column}=eq.{id}", self.config.table_url(table))
    }
}

async fn check(resp: Result<Response, reqwest::Error>) -> Result<String, StoreError> {
    let resp = resp.map_err(|e| StoreError::Network(e.to_string()))?;
    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| StoreError::Network(e.to_string()))?;
    if !status.is_success() {
        return Err(StoreError::Api {
            status: status.as_u16(),
            message: body,
        });
    }
    Ok(body)
}

async fn read_json<T: DeserializeOwned>(
    resp: Result<Response, reqwest::Error>,
) -> Result<T, StoreError> {
    let body = check(resp).await?;
    serde_json::from_str(&body).map_err(|e| StoreError::Parse(e.to_string()))
}

impl Store for RestStore {
    async fn insert_dfd(&self, dfd: &Dfd, user_id: Uuid) -> Result<InsertedDfd, StoreError> {
        debug!(table = DFDS, uasg = %dfd.uasg_number, "inserting DFD");
        let rows: Vec<InsertedDfdRow> = read_json(
            self.insert(DFDS)
                .json(&[NewDfdRow::new(dfd, user_id)])
                .send()
                .await,
        )
        .await?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Parse("insert returned no row".into()))?;
        Ok(InsertedDfd {
            id: row.id,
            number: row.display_number(),
        })
    }

    async fn insert_materials(
        &self,
        dfd_id: Uuid,
        materials: &[Material],
    ) -> Result<Vec<Uuid>, StoreError> {
        debug!(table = MATERIALS, %dfd_id, count = materials.len(), "inserting rows");
        let body: Vec<NewMaterialRow<'_>> = materials
            .iter()
            .map(|m| NewMaterialRow::new(dfd_id, m))
            .collect();
        let rows: Vec<IdRow> =
            read_json(self.insert(MATERIALS).json(&body).send().await).await?;
        Ok(rows.into_iter().map(|r| r.id).collect())
    }

    async fn insert_responsibles(
        &self,
        dfd_id: Uuid,
        responsibles: &[Responsible],
    ) -> Result<Vec<Uuid>, StoreError> {
        debug!(table = RESPONSIBLES, %dfd_id, count = responsibles.len(), "inserting rows");
        let body: Vec<NewResponsibleRow<'_>> = responsibles
            .iter()
            .map(|r| NewResponsibleRow::new(dfd_id, r))
            .collect();
        let rows: Vec<IdRow> =
            read_json(self.insert(RESPONSIBLES).json(&body).send().await).await?;
        Ok(rows.into_iter().map(|r| r.id).collect())
    }

    async fn delete_dfd(&self, dfd_id: Uuid) -> Result<(), StoreError> {
        debug!(%dfd_id, "deleting DFD");
        for table in [MATERIALS, RESPONSIBLES] {
            let url = self.by_id(table, "dfd_id", dfd_id);
            check(self.authorize(self.client.delete(url)).send().await).await?;
        }
        let url = self.by_id(DFDS, "id", dfd_id);
        check(self.authorize(self.client.delete(url)).send().await).await?;
        Ok(())
    }

    async fn update_status(&self, dfd_id: Uuid, status: DfdStatus) -> Result<(), StoreError> {
        debug!(%dfd_id, status = status.label(), "updating DFD status");
        let url = self.by_id(DFDS, "id", dfd_id);
        let body = serde_json::json!({ "situacao": status });
        check(self.authorize(self.client.patch(url)).json(&body).send().await).await?;
        Ok(())
    }

    async fn fetch_dfd(&self, dfd_id: Uuid) -> Result<Option<Dfd>, StoreError> {
        debug!(%dfd_id, "fetching DFD");
        let url = format!(
            "{}&select=*,{MATERIALS}(*),{RESPONSIBLES}(*)",
            self.by_id(DFDS, "id", dfd_id)
        );
        let rows: Vec<DfdRow> =
            read_json(self.authorize(self.client.get(url)).send().await).await?;
        Ok(rows.into_iter().next().map(Dfd::from))
    }
}
