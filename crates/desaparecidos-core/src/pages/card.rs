//! Detail card: person profile, latest occurrence, and its information feed.

use chrono::NaiveDate;
use tracing::{error, info};

use crate::api::CaseApi;
use crate::feed::sort_by_date_desc;
use crate::model::{Occurrence, Person, SupplementaryInfo};
use crate::pages::dialog::{AddInfoDialog, SubmitError};

pub const EMPTY_FEED: &str = "Até então nenhuma informação adicional...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardView {
    /// The person has no occurrence at all.
    NotFound,
    Loading,
    Error,
    Ready,
}

/// Id of the person's latest occurrence, if the API actually assigned one.
fn occurrence_key(person: &Person) -> Option<u64> {
    person
        .latest_occurrence
        .as_ref()
        .map(|occ| occ.id)
        .filter(|&id| id != 0)
}

pub struct DetailCard {
    person: Person,
    feed: Vec<SupplementaryInfo>,
    loading: bool,
    failed: bool,
    dialog: Option<AddInfoDialog>,
}

impl DetailCard {
    pub fn new(person: Person) -> Self {
        let dialog = occurrence_key(&person).map(AddInfoDialog::new);
        Self {
            person,
            feed: Vec::new(),
            loading: true,
            failed: false,
            dialog,
        }
    }

    pub fn person(&self) -> &Person {
        &self.person
    }

    pub fn occurrence(&self) -> Option<&Occurrence> {
        self.person.latest_occurrence.as_ref()
    }

    /// Feed entries, newest first.
    pub fn feed(&self) -> &[SupplementaryInfo] {
        &self.feed
    }

    pub fn view(&self) -> CardView {
        if self.occurrence().is_none() {
            CardView::NotFound
        } else if self.loading {
            CardView::Loading
        } else if self.failed {
            CardView::Error
        } else {
            CardView::Ready
        }
    }

    pub fn dialog(&self) -> Option<&AddInfoDialog> {
        self.dialog.as_ref()
    }

    pub fn dialog_mut(&mut self) -> Option<&mut AddInfoDialog> {
        self.dialog.as_mut()
    }

    /// Fetch and sort the occurrence's information feed.
    ///
    /// An occurrence without an id has nothing to fetch and shows an empty feed.
    pub async fn load(&mut self, api: &dyn CaseApi) {
        let Some(occurrence_id) = occurrence_key(&self.person) else {
            self.feed.clear();
            self.loading = false;
            return;
        };
        self.loading = true;
        match api.occurrence_info(occurrence_id).await {
            Ok(entries) => {
                info!(occurrence_id, count = entries.len(), "information feed loaded");
                self.feed = sort_by_date_desc(entries);
                self.failed = false;
            }
            Err(e) => {
                error!(occurrence_id, error = %e, detail = %e.detail(), "information feed request failed");
                self.failed = true;
            }
        }
        self.loading = false;
    }

    /// Re-run the feed fetch.
    pub async fn refresh(&mut self, api: &dyn CaseApi) {
        self.load(api).await;
    }

    /// Called with the record the dialog just created.
    pub async fn on_saved(&mut self, api: &dyn CaseApi, created: &SupplementaryInfo) {
        info!(id = created.id, "refreshing feed after new information");
        self.refresh(api).await;
    }

    /// Submit the hosted dialog and refresh the feed when it succeeds.
    pub async fn submit_dialog(
        &mut self,
        api: &dyn CaseApi,
        today: NaiveDate,
    ) -> Result<SupplementaryInfo, SubmitError> {
        let dialog = self.dialog.as_mut().ok_or(SubmitError::NotOpen)?;
        let created = dialog.submit(api, today).await?;
        self.on_saved(api, &created).await;
        Ok(created)
    }
}
