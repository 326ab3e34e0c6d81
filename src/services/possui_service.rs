//! Possui Service - links between startups and skills

use std::sync::Arc;

use sea_orm::{DatabaseConnection, EntityTrait, ModelTrait};
use serde::Serialize;

use super::{first_inserted, found, paginate, HabilidadeResponse, StartupResponse};
use crate::domain::{DomainError, Repository};
use crate::models::possui::{self, CreatePossuiRequest};
use crate::models::{habilidade, startup};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PossuiResponse {
    pub id: i64,
    pub startup_cnpj: String,
    pub habilidade_id: i64,
}

impl From<possui::Model> for PossuiResponse {
    fn from(model: possui::Model) -> Self {
        Self {
            id: model.id,
            startup_cnpj: model.startup_cnpj,
            habilidade_id: model.habilidade_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PossuiDetails {
    #[serde(flatten)]
    pub possui: PossuiResponse,
    pub startup: Option<StartupResponse>,
    pub habilidade: Option<HabilidadeResponse>,
}

pub struct PossuiService {
    repo: Arc<dyn Repository<possui::Model>>,
    db: DatabaseConnection,
}

impl PossuiService {
    pub fn new(repo: Arc<dyn Repository<possui::Model>>, db: DatabaseConnection) -> Self {
        Self { repo, db }
    }

    pub async fn create(&self, request: CreatePossuiRequest) -> Result<PossuiResponse, DomainError> {
        self.repo.add(possui::Model::create(request))?;
        let created = first_inserted(self.repo.save_changes().await?)?;

        tracing::info!(
            "Linked habilidade {} to startup {}",
            created.habilidade_id,
            created.startup_cnpj
        );
        Ok(created.into())
    }

    pub async fn get_all_paged(
        &self,
        page: u64,
        page_size: u64,
    ) -> Result<Vec<PossuiResponse>, DomainError> {
        let links = self.repo.find_all().await?;
        Ok(paginate(links, page, page_size)
            .map(PossuiResponse::from)
            .collect())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<PossuiResponse>, DomainError> {
        Ok(self.repo.find_by_id(id).await?.map(PossuiResponse::from))
    }

    pub async fn get_details(&self, id: i64) -> Result<Option<PossuiDetails>, DomainError> {
        let Some(link) = possui::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let startup = link.find_related(startup::Entity).one(&self.db).await?;
        let habilidade = link.find_related(habilidade::Entity).one(&self.db).await?;

        Ok(Some(PossuiDetails {
            possui: link.into(),
            startup: startup.map(StartupResponse::from),
            habilidade: habilidade.map(HabilidadeResponse::from),
        }))
    }

    pub async fn update(&self, id: i64, request: CreatePossuiRequest) -> Result<bool, DomainError> {
        let Some(mut link) = self.repo.find_by_id(id).await? else {
            return Ok(false);
        };

        link.apply(request);
        self.repo.update(link)?;
        Ok(found(self.repo.save_changes().await)?.is_some())
    }

    pub async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let Some(link) = self.repo.find_by_id(id).await? else {
            return Ok(false);
        };

        self.repo.delete(link)?;
        Ok(found(self.repo.save_changes().await)?.is_some())
    }
}
