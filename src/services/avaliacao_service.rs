//! Avaliacao Service - evaluations of startups by users

use std::sync::Arc;

use sea_orm::{DatabaseConnection, EntityTrait, ModelTrait};
use serde::Serialize;

use super::{first_inserted, found, paginate, StartupResponse, UsuarioResponse};
use crate::domain::{DomainError, Repository};
use crate::models::avaliacao::{self, CreateAvaliacaoRequest};
use crate::models::{startup, usuario};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvaliacaoResponse {
    pub id: i64,
    pub score: i64,
    pub comment: Option<String>,
    pub usuario_cpf: String,
    pub startup_cnpj: String,
}

impl From<avaliacao::Model> for AvaliacaoResponse {
    fn from(model: avaliacao::Model) -> Self {
        Self {
            id: model.id,
            score: model.score,
            comment: model.comment,
            usuario_cpf: model.usuario_cpf,
            startup_cnpj: model.startup_cnpj,
        }
    }
}

/// Evaluation with its author and the evaluated startup
#[derive(Debug, Clone, Serialize)]
pub struct AvaliacaoDetails {
    #[serde(flatten)]
    pub avaliacao: AvaliacaoResponse,
    pub usuario: Option<UsuarioResponse>,
    pub startup: Option<StartupResponse>,
}

pub struct AvaliacaoService {
    repo: Arc<dyn Repository<avaliacao::Model>>,
    db: DatabaseConnection,
}

impl AvaliacaoService {
    pub fn new(repo: Arc<dyn Repository<avaliacao::Model>>, db: DatabaseConnection) -> Self {
        Self { repo, db }
    }

    pub async fn create(
        &self,
        request: CreateAvaliacaoRequest,
    ) -> Result<AvaliacaoResponse, DomainError> {
        self.repo.add(avaliacao::Model::create(request))?;
        let created = first_inserted(self.repo.save_changes().await?)?;

        tracing::info!(
            "Created avaliacao {} for startup {}",
            created.id,
            created.startup_cnpj
        );
        Ok(created.into())
    }

    pub async fn get_all_paged(
        &self,
        page: u64,
        page_size: u64,
    ) -> Result<Vec<AvaliacaoResponse>, DomainError> {
        let avaliacoes = self.repo.find_all().await?;
        Ok(paginate(avaliacoes, page, page_size)
            .map(AvaliacaoResponse::from)
            .collect())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<AvaliacaoResponse>, DomainError> {
        Ok(self.repo.find_by_id(id).await?.map(AvaliacaoResponse::from))
    }

    pub async fn get_details(&self, id: i64) -> Result<Option<AvaliacaoDetails>, DomainError> {
        let Some(avaliacao) = avaliacao::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let usuario = avaliacao.find_related(usuario::Entity).one(&self.db).await?;
        let startup = avaliacao.find_related(startup::Entity).one(&self.db).await?;

        Ok(Some(AvaliacaoDetails {
            avaliacao: avaliacao.into(),
            usuario: usuario.map(UsuarioResponse::from),
            startup: startup.map(StartupResponse::from),
        }))
    }

    pub async fn update(&self, id: i64, request: CreateAvaliacaoRequest) -> Result<bool, DomainError> {
        let Some(mut avaliacao) = self.repo.find_by_id(id).await? else {
            return Ok(false);
        };

        avaliacao.apply(request);
        self.repo.update(avaliacao)?;
        Ok(found(self.repo.save_changes().await)?.is_some())
    }

    pub async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let Some(avaliacao) = self.repo.find_by_id(id).await? else {
            return Ok(false);
        };

        self.repo.delete(avaliacao)?;
        Ok(found(self.repo.save_changes().await)?.is_some())
    }
}
