//! Detail page: resolves `/details/:id` to a person record.

use tracing::{error, info, warn};

use crate::api::CaseApi;
use crate::model::Person;

/// What the detail route renders. Exactly one at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailView {
    Loading,
    NotFound,
    Error,
    Content(Person),
}

#[derive(Debug)]
enum Outcome {
    Pending,
    Fetched(Person),
    Failed,
}

pub struct DetailPage {
    raw_id: String,
    outcome: Outcome,
}

impl DetailPage {
    pub fn new(raw_id: impl Into<String>) -> Self {
        Self {
            raw_id: raw_id.into(),
            outcome: Outcome::Pending,
        }
    }

    /// Parsed path parameter; `None` when it is not a record id.
    pub fn requested_id(&self) -> Option<u64> {
        self.raw_id.trim().parse().ok()
    }

    /// Fetch the record. A non-numeric id never reaches the network.
    pub async fn load(&mut self, api: &dyn CaseApi) {
        let Some(id) = self.requested_id() else {
            warn!(raw_id = %self.raw_id, "detail id is not numeric");
            self.outcome = Outcome::Fetched(Person::default());
            return;
        };
        self.outcome = match api.person(id).await {
            Ok(person) => {
                info!(id, returned = person.id, "person loaded");
                Outcome::Fetched(person)
            }
            Err(e) => {
                error!(id, error = %e, detail = %e.detail(), "person request failed");
                Outcome::Failed
            }
        };
    }

    /// Evaluated in priority order: loading, not found, error, content.
    ///
    /// Not found means a response arrived but carries no id, or an id other
    /// than the requested one. A failed request is an error, never not found.
    pub fn view(&self) -> DetailView {
        match &self.outcome {
            Outcome::Pending => DetailView::Loading,
            Outcome::Fetched(person)
                if person.id == 0 || Some(person.id) != self.requested_id() =>
            {
                DetailView::NotFound
            }
            Outcome::Failed => DetailView::Error,
            Outcome::Fetched(person) => DetailView::Content(person.clone()),
        }
    }

    /// Resolve `raw_id` in one step.
    pub async fn resolve(api: &dyn CaseApi, raw_id: &str) -> DetailView {
        let mut page = Self::new(raw_id);
        page.load(api).await;
        page.view()
    }
}
