//! Application state and per-request service construction

use sea_orm::{DatabaseConnection, IntoActiveModel};
use std::sync::Arc;

use crate::domain::{DomainError, Repository, StartupAnalyzer};
use crate::infrastructure::{ProcedureStartupAnalyzer, SeaOrmRepository};
use crate::models::Record;
use crate::services::{
    AvaliacaoService, HabilidadeService, PossuiService, StartupAnalysisService, StartupService,
    UsuarioService,
};

/// Application state shared across all requests
///
/// Services are built per call: each gets fresh repositories, so staged
/// changes never leak between requests.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    analyzer: Arc<dyn StartupAnalyzer>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, analysis_procedure: &str) -> Result<Self, DomainError> {
        let analyzer = Arc::new(ProcedureStartupAnalyzer::new(db.clone(), analysis_procedure)?);
        Ok(Self { db, analyzer })
    }

    /// Replace the analysis bridge (used when the store has no procedure)
    pub fn with_analyzer(mut self, analyzer: Arc<dyn StartupAnalyzer>) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// Get the database connection
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// A fresh unit of work for one entity kind
    pub fn repository<M>(&self) -> Arc<dyn Repository<M>>
    where
        M: Record + IntoActiveModel<M::ActiveModel>,
    {
        Arc::new(SeaOrmRepository::<M>::new(self.db.clone()))
    }

    pub fn usuarios(&self) -> UsuarioService {
        UsuarioService::new(self.repository(), self.db.clone())
    }

    pub fn startups(&self) -> StartupService {
        StartupService::new(self.repository(), self.db.clone())
    }

    pub fn avaliacoes(&self) -> AvaliacaoService {
        AvaliacaoService::new(self.repository(), self.db.clone())
    }

    pub fn habilidades(&self) -> HabilidadeService {
        HabilidadeService::new(self.repository(), self.db.clone())
    }

    pub fn possuis(&self) -> PossuiService {
        PossuiService::new(self.repository(), self.db.clone())
    }

    pub fn analysis(&self) -> StartupAnalysisService {
        StartupAnalysisService::new(self.analyzer.clone())
    }
}

impl AsRef<DatabaseConnection> for AppState {
    fn as_ref(&self) -> &DatabaseConnection {
        &self.db
    }
}
