//! Habilidade Service - skills catalogue

use std::sync::Arc;

use sea_orm::{DatabaseConnection, EntityTrait, ModelTrait};
use serde::Serialize;

use super::{first_inserted, found, paginate, StartupResponse};
use crate::domain::{DomainError, Repository};
use crate::models::habilidade::{self, CreateHabilidadeRequest};
use crate::models::startup;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HabilidadeResponse {
    pub id: i64,
    pub name: String,
    pub kind: String,
}

impl From<habilidade::Model> for HabilidadeResponse {
    fn from(model: habilidade::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            kind: model.kind,
        }
    }
}

/// Skill with the startups that list it
#[derive(Debug, Clone, Serialize)]
pub struct HabilidadeDetails {
    #[serde(flatten)]
    pub habilidade: HabilidadeResponse,
    pub startups: Vec<StartupResponse>,
}

pub struct HabilidadeService {
    repo: Arc<dyn Repository<habilidade::Model>>,
    db: DatabaseConnection,
}

impl HabilidadeService {
    pub fn new(repo: Arc<dyn Repository<habilidade::Model>>, db: DatabaseConnection) -> Self {
        Self { repo, db }
    }

    pub async fn create(
        &self,
        request: CreateHabilidadeRequest,
    ) -> Result<HabilidadeResponse, DomainError> {
        self.repo.add(habilidade::Model::create(request))?;
        let created = first_inserted(self.repo.save_changes().await?)?;

        tracing::info!("Created habilidade {}", created.id);
        Ok(created.into())
    }

    /// Every skill, unpaged
    pub async fn get_all(&self) -> Result<Vec<HabilidadeResponse>, DomainError> {
        let skills = self.repo.find_all().await?;
        Ok(skills.into_iter().map(HabilidadeResponse::from).collect())
    }

    pub async fn get_all_paged(
        &self,
        page: u64,
        page_size: u64,
    ) -> Result<Vec<HabilidadeResponse>, DomainError> {
        let skills = self.repo.find_all().await?;
        Ok(paginate(skills, page, page_size)
            .map(HabilidadeResponse::from)
            .collect())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<HabilidadeResponse>, DomainError> {
        Ok(self.repo.find_by_id(id).await?.map(HabilidadeResponse::from))
    }

    pub async fn get_details(&self, id: i64) -> Result<Option<HabilidadeDetails>, DomainError> {
        let Some(skill) = habilidade::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let startups = skill.find_related(startup::Entity).all(&self.db).await?;

        Ok(Some(HabilidadeDetails {
            habilidade: skill.into(),
            startups: startups.into_iter().map(StartupResponse::from).collect(),
        }))
    }

    pub async fn update(
        &self,
        id: i64,
        request: CreateHabilidadeRequest,
    ) -> Result<bool, DomainError> {
        let Some(mut skill) = self.repo.find_by_id(id).await? else {
            return Ok(false);
        };

        skill.apply(request);
        self.repo.update(skill)?;
        Ok(found(self.repo.save_changes().await)?.is_some())
    }

    /// Fails with a constraint violation while a startup still owns the skill
    pub async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let Some(skill) = self.repo.find_by_id(id).await? else {
            return Ok(false);
        };

        self.repo.delete(skill)?;
        Ok(found(self.repo.save_changes().await)?.is_some())
    }
}
