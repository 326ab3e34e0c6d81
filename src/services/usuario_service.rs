//! Usuario Service - users, their startups and login

use std::sync::Arc;

use sea_orm::{DatabaseConnection, EntityTrait, ModelTrait};
use serde::Serialize;

use super::{first_inserted, found, paginate, StartupResponse};
use crate::auth::{hash_password, verify_password};
use crate::domain::{DomainError, Repository};
use crate::models::usuario::{self, CreateUsuarioRequest};
use crate::models::{startup, Role};

/// User projection. Password material never leaves the service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsuarioResponse {
    pub cpf: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub phone: Option<String>,
}

impl From<usuario::Model> for UsuarioResponse {
    fn from(model: usuario::Model) -> Self {
        Self {
            cpf: model.cpf,
            name: model.name,
            email: model.email,
            role: model.role,
            phone: model.phone,
        }
    }
}

/// User with the startups it owns
#[derive(Debug, Clone, Serialize)]
pub struct UsuarioDetails {
    #[serde(flatten)]
    pub usuario: UsuarioResponse,
    pub startups: Vec<StartupResponse>,
}

pub struct UsuarioService {
    repo: Arc<dyn Repository<usuario::Model>>,
    db: DatabaseConnection,
}

fn hash(password: &str) -> Result<String, DomainError> {
    hash_password(password).map_err(DomainError::Internal)
}

impl UsuarioService {
    pub fn new(repo: Arc<dyn Repository<usuario::Model>>, db: DatabaseConnection) -> Self {
        Self { repo, db }
    }

    /// A CPF that is already taken fails at commit with a constraint violation.
    pub async fn create(&self, request: CreateUsuarioRequest) -> Result<UsuarioResponse, DomainError> {
        let password_hash = hash(&request.password)?;
        self.repo.add(usuario::Model::create(request, password_hash))?;
        let created = first_inserted(self.repo.save_changes().await?)?;

        tracing::info!("Created usuario {}", created.cpf);
        Ok(created.into())
    }

    pub async fn get_all_paged(
        &self,
        page: u64,
        page_size: u64,
    ) -> Result<Vec<UsuarioResponse>, DomainError> {
        let usuarios = self.repo.find_all().await?;
        Ok(paginate(usuarios, page, page_size)
            .map(UsuarioResponse::from)
            .collect())
    }

    pub async fn get_by_id(&self, cpf: &str) -> Result<Option<UsuarioResponse>, DomainError> {
        Ok(self
            .repo
            .find_by_id(cpf.to_string())
            .await?
            .map(UsuarioResponse::from))
    }

    pub async fn get_details(&self, cpf: &str) -> Result<Option<UsuarioDetails>, DomainError> {
        let Some(usuario) = usuario::Entity::find_by_id(cpf.to_string())
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let startups = usuario.find_related(startup::Entity).all(&self.db).await?;

        Ok(Some(UsuarioDetails {
            usuario: usuario.into(),
            startups: startups.into_iter().map(StartupResponse::from).collect(),
        }))
    }

    /// Overwrites every attribute but the CPF and re-hashes the password.
    pub async fn update(
        &self,
        cpf: &str,
        request: CreateUsuarioRequest,
    ) -> Result<Option<UsuarioResponse>, DomainError> {
        let Some(mut usuario) = self.repo.find_by_id(cpf.to_string()).await? else {
            return Ok(None);
        };

        let password_hash = hash(&request.password)?;
        usuario.apply(request, password_hash);
        self.repo.update(usuario)?;

        let committed = found(self.repo.save_changes().await)?;
        Ok(committed
            .and_then(|c| c.updated.into_iter().next())
            .map(UsuarioResponse::from))
    }

    /// Rejected with a constraint violation while startups or evaluations
    /// still reference the user.
    pub async fn delete(&self, cpf: &str) -> Result<bool, DomainError> {
        let Some(usuario) = self.repo.find_by_id(cpf.to_string()).await? else {
            return Ok(false);
        };

        self.repo.delete(usuario)?;
        Ok(found(self.repo.save_changes().await)?.is_some())
    }

    /// Full scan for an exact (case-sensitive) email whose stored hash
    /// matches `password`.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<usuario::Model>, DomainError> {
        let usuarios = self.repo.find_all().await?;

        for usuario in usuarios.into_iter().filter(|u| u.email == email) {
            match verify_password(password, &usuario.password_hash) {
                Ok(true) => {
                    tracing::info!("Login succeeded for usuario {}", usuario.cpf);
                    return Ok(Some(usuario));
                }
                Ok(false) => {}
                Err(e) => tracing::warn!("Unreadable password hash for usuario {}: {}", usuario.cpf, e),
            }
        }

        Ok(None)
    }
}
