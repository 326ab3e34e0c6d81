//! Startup Service

use std::sync::Arc;

use sea_orm::{DatabaseConnection, EntityTrait, ModelTrait};
use serde::Serialize;

use super::{first_inserted, found, paginate, AvaliacaoResponse, HabilidadeResponse};
use crate::domain::{DomainError, Repository};
use crate::models::startup::{self, CreateStartupRequest};
use crate::models::{avaliacao, habilidade};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StartupResponse {
    pub cnpj: String,
    pub video: Option<String>,
    pub name: String,
    pub site: Option<String>,
    pub description: String,
    pub responsible_name: Option<String>,
    pub email: String,
    pub usuario_cpf: String,
}

impl From<startup::Model> for StartupResponse {
    fn from(model: startup::Model) -> Self {
        Self {
            cnpj: model.cnpj,
            video: model.video,
            name: model.name,
            site: model.site,
            description: model.description,
            responsible_name: model.responsible_name,
            email: model.email,
            usuario_cpf: model.usuario_cpf,
        }
    }
}

/// Startup with its evaluations and the skills linked through possui
#[derive(Debug, Clone, Serialize)]
pub struct StartupDetails {
    #[serde(flatten)]
    pub startup: StartupResponse,
    pub avaliacoes: Vec<AvaliacaoResponse>,
    pub habilidades: Vec<HabilidadeResponse>,
}

pub struct StartupService {
    repo: Arc<dyn Repository<startup::Model>>,
    db: DatabaseConnection,
}

impl StartupService {
    pub fn new(repo: Arc<dyn Repository<startup::Model>>, db: DatabaseConnection) -> Self {
        Self { repo, db }
    }

    /// The owner must exist; a missing owner or a taken CNPJ fails at commit.
    pub async fn create(&self, request: CreateStartupRequest) -> Result<StartupResponse, DomainError> {
        self.repo.add(startup::Model::create(request))?;
        let created = first_inserted(self.repo.save_changes().await?)?;

        tracing::info!("Created startup {} for usuario {}", created.cnpj, created.usuario_cpf);
        Ok(created.into())
    }

    pub async fn get_all_paged(
        &self,
        page: u64,
        page_size: u64,
    ) -> Result<Vec<StartupResponse>, DomainError> {
        let startups = self.repo.find_all().await?;
        Ok(paginate(startups, page, page_size)
            .map(StartupResponse::from)
            .collect())
    }

    pub async fn get_by_id(&self, cnpj: &str) -> Result<Option<StartupResponse>, DomainError> {
        Ok(self
            .repo
            .find_by_id(cnpj.to_string())
            .await?
            .map(StartupResponse::from))
    }

    pub async fn get_details(&self, cnpj: &str) -> Result<Option<StartupDetails>, DomainError> {
        let Some(startup) = startup::Entity::find_by_id(cnpj.to_string())
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let avaliacoes = startup.find_related(avaliacao::Entity).all(&self.db).await?;
        let habilidades = startup.find_related(habilidade::Entity).all(&self.db).await?;

        Ok(Some(StartupDetails {
            startup: startup.into(),
            avaliacoes: avaliacoes.into_iter().map(AvaliacaoResponse::from).collect(),
            habilidades: habilidades.into_iter().map(HabilidadeResponse::from).collect(),
        }))
    }

    pub async fn update(&self, cnpj: &str, request: CreateStartupRequest) -> Result<bool, DomainError> {
        let Some(mut startup) = self.repo.find_by_id(cnpj.to_string()).await? else {
            return Ok(false);
        };

        if request.cnpj != startup.cnpj {
            tracing::debug!("Ignoring CNPJ change {} -> {}", startup.cnpj, request.cnpj);
        }
        startup.apply(request);
        self.repo.update(startup)?;
        Ok(found(self.repo.save_changes().await)?.is_some())
    }

    pub async fn delete(&self, cnpj: &str) -> Result<bool, DomainError> {
        let Some(startup) = self.repo.find_by_id(cnpj.to_string()).await? else {
            return Ok(false);
        };

        self.repo.delete(startup)?;
        Ok(found(self.repo.save_changes().await)?.is_some())
    }
}
