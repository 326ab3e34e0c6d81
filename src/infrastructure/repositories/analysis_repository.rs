//! Store-side startup analysis
//!
//! Calls a database function with the startup's CNPJ and hands back its
//! text result untouched.

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, Statement};

use crate::domain::{DomainError, StartupAnalyzer};

pub struct ProcedureStartupAnalyzer {
    db: DatabaseConnection,
    procedure: String,
}

impl ProcedureStartupAnalyzer {
    /// `procedure` is interpolated into SQL, so only dotted identifiers pass.
    pub fn new(db: DatabaseConnection, procedure: impl Into<String>) -> Result<Self, DomainError> {
        let procedure = procedure.into();
        if !is_procedure_name(&procedure) {
            return Err(DomainError::InvalidArgument(format!(
                "invalid procedure name: {:?}",
                procedure
            )));
        }
        Ok(Self { db, procedure })
    }
}

fn is_procedure_name(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|part| {
            let mut chars = part.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

#[async_trait]
impl StartupAnalyzer for ProcedureStartupAnalyzer {
    async fn analyze(&self, cnpj: &str) -> Result<String, DomainError> {
        let backend = self.db.get_database_backend();
        let placeholder = match backend {
            DbBackend::Postgres => "$1",
            _ => "?",
        };
        let sql = format!("SELECT {}({}) AS resultado", self.procedure, placeholder);

        tracing::debug!("Running {} for startup {}", self.procedure, cnpj);
        let row = self
            .db
            .query_one(Statement::from_sql_and_values(backend, &sql, [cnpj.into()]))
            .await?;

        let text = match row {
            Some(row) => row.try_get::<Option<String>>("", "resultado")?,
            None => None,
        };
        Ok(text.unwrap_or_default())
    }
}
