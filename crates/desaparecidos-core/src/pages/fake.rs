//! In-memory `CaseApi` for controller tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::CaseApi;
use crate::error::ApiError;
use crate::filter::{Filter, PAGE_SIZE};
use crate::model::{Person, PersonPage, Statistics, SupplementaryInfo};
use crate::submission::InfoSubmission;

#[derive(Default)]
pub(crate) struct FakeApi {
    pub person: Option<Person>,
    pub roster: Vec<Person>,
    pub stats: Statistics,
    pub feed: Mutex<Vec<SupplementaryInfo>>,
    pub fail_person: bool,
    pub fail_search: bool,
    pub fail_stats: bool,
    pub fail_feed: bool,
    pub fail_submit: bool,
    pub calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn unavailable() -> ApiError {
        ApiError::Server {
            status: 503,
            body: r#"{"message":"indisponível"}"#.into(),
        }
    }
}

#[async_trait]
impl CaseApi for FakeApi {
    async fn person(&self, id: u64) -> Result<Person, ApiError> {
        self.record(format!("person {id}"));
        if self.fail_person {
            return Err(ApiError::Transport("connection refused".into()));
        }
        Ok(self.person.clone().unwrap_or_default())
    }

    async fn search(&self, filter: &Filter, page: u32) -> Result<PersonPage, ApiError> {
        let query: Vec<String> = filter
            .query(page)
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        self.record(format!("search {}", query.join("&")));
        if self.fail_search {
            return Err(Self::unavailable());
        }
        let matching: Vec<Person> = self
            .roster
            .iter()
            .filter(|p| filter.sex.is_none_or(|s| p.sex == Some(s)))
            .filter(|p| filter.status.is_none_or(|s| p.status() == s))
            .filter(|p| filter.name.as_ref().is_none_or(|n| p.name.contains(n.as_str())))
            .cloned()
            .collect();
        let size = PAGE_SIZE as usize;
        let total_elements = matching.len() as u64;
        let total_pages = matching.len().div_ceil(size) as u32;
        let content = matching
            .into_iter()
            .skip(page as usize * size)
            .take(size)
            .collect();
        Ok(PersonPage {
            content,
            total_pages,
            number: page,
            total_elements,
        })
    }

    async fn statistics(&self) -> Result<Statistics, ApiError> {
        self.record("statistics".into());
        if self.fail_stats {
            return Err(Self::unavailable());
        }
        Ok(self.stats)
    }

    async fn occurrence_info(
        &self,
        occurrence_id: u64,
    ) -> Result<Vec<SupplementaryInfo>, ApiError> {
        self.record(format!("feed {occurrence_id}"));
        if self.fail_feed {
            return Err(Self::unavailable());
        }
        Ok(self.feed.lock().unwrap().clone())
    }

    async fn submit_info(
        &self,
        submission: &InfoSubmission,
    ) -> Result<SupplementaryInfo, ApiError> {
        self.record(format!(
            "submit /ocorrencias/informacoes-desaparecido ocoId={} files={}",
            submission.occurrence_id,
            submission.attachments.len()
        ));
        if self.fail_submit {
            return Err(Self::unavailable());
        }
        let mut feed = self.feed.lock().unwrap();
        let created = SupplementaryInfo {
            occurrence_id: submission.occurrence_id,
            text: submission.text.clone(),
            date: crate::dates::iso_date(submission.date),
            id: 100 + feed.len() as u64,
            attachments: Some(
                submission
                    .attachments
                    .iter()
                    .map(|a| format!("https://files.example/{}", a.file_name))
                    .collect(),
            ),
        };
        feed.push(created.clone());
        Ok(created)
    }
}
