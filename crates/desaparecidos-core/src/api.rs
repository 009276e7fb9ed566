//! The seam between page controllers and the remote case API.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::filter::Filter;
use crate::model::{Person, PersonPage, Statistics, SupplementaryInfo};
use crate::submission::InfoSubmission;

/// Operations the portal performs against the missing-persons REST API.
///
/// Every call is a single request/response; there is no retry, caching or
/// cancellation behind this trait.
#[async_trait]
pub trait CaseApi: Send + Sync {
    /// `GET /pessoas/:id`
    async fn person(&self, id: u64) -> Result<Person, ApiError>;

    /// `GET /pessoas/aberto/filtro`, one page of [`crate::PAGE_SIZE`] persons.
    async fn search(&self, filter: &Filter, page: u32) -> Result<PersonPage, ApiError>;

    /// `GET /pessoas/aberto/estatistico`
    async fn statistics(&self) -> Result<Statistics, ApiError>;

    /// `GET /ocorrencias/informacoes-desaparecido?ocorrenciaId=`
    async fn occurrence_info(&self, occurrence_id: u64)
    -> Result<Vec<SupplementaryInfo>, ApiError>;

    /// `POST /ocorrencias/informacoes-desaparecido` (multipart `files`).
    async fn submit_info(&self, submission: &InfoSubmission)
    -> Result<SupplementaryInfo, ApiError>;
}
