//! Startup analysis - pass-through to the store-side procedure

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, StartupAnalyzer};

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeStartupRequest {
    pub cnpj: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResponse {
    pub result: String,
}

pub struct StartupAnalysisService {
    analyzer: Arc<dyn StartupAnalyzer>,
}

impl StartupAnalysisService {
    pub fn new(analyzer: Arc<dyn StartupAnalyzer>) -> Self {
        Self { analyzer }
    }

    pub async fn analyze(&self, request: AnalyzeStartupRequest) -> Result<AnalysisResponse, DomainError> {
        if request.cnpj.trim().is_empty() {
            return Err(DomainError::InvalidArgument("CNPJ is required".to_string()));
        }

        let result = self.analyzer.analyze(&request.cnpj).await?;
        Ok(AnalysisResponse { result })
    }
}
