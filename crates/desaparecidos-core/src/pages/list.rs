//! Roster page: filter form, result grid, statistics panel and pager.

use futures::future;
use tracing::{error, info, warn};

use crate::api::CaseApi;
use crate::error::FieldError;
use crate::filter::{Filter, FilterForm, PAGE_SIZE};
use crate::model::{Person, PersonPage, Statistics};
use crate::pagination::Pager;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListView {
    Loading,
    Error,
    Ready,
}

pub struct ListPage {
    pub form: FilterForm,
    form_errors: Vec<FieldError>,
    filter: Filter,
    items: Vec<Person>,
    pager: Pager,
    total_elements: u64,
    statistics: Option<Statistics>,
    view: ListView,
}

impl Default for ListPage {
    fn default() -> Self {
        Self::new()
    }
}

impl ListPage {
    pub fn new() -> Self {
        Self {
            form: FilterForm::default(),
            form_errors: Vec::new(),
            filter: Filter::default(),
            items: Vec::new(),
            pager: Pager::default(),
            total_elements: 0,
            statistics: None,
            view: ListView::Loading,
        }
    }

    pub fn view(&self) -> ListView {
        self.view
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn form_errors(&self) -> &[FieldError] {
        &self.form_errors
    }

    pub fn items(&self) -> &[Person] {
        &self.items
    }

    pub fn pager(&self) -> Pager {
        self.pager
    }

    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    pub fn statistics(&self) -> Option<Statistics> {
        self.statistics
    }

    /// Result count line shown above the grid.
    pub fn summary(&self) -> String {
        if self.total_elements == 0 {
            return "Nenhum resultado encontrado".into();
        }
        let plural = if self.total_elements != 1 { "s" } else { "" };
        format!(
            "Exibindo {} de {} resultado{plural}",
            self.items.len(),
            self.total_elements
        )
    }

    /// First load: page 0 of the current filter and the statistics panel.
    pub async fn load(&mut self, api: &dyn CaseApi) {
        self.load_at(api, 0).await;
    }

    /// Fetch `page` of the current filter and the statistics panel
    /// concurrently. Either failure turns the whole page into an error.
    pub async fn load_at(&mut self, api: &dyn CaseApi, page: u32) {
        self.view = ListView::Loading;
        let (result, stats) =
            future::join(api.search(&self.filter, page), api.statistics()).await;

        match stats {
            Ok(stats) => self.statistics = Some(stats),
            Err(e) => {
                error!(error = %e, detail = %e.detail(), "statistics request failed");
                self.view = ListView::Error;
            }
        }
        match result {
            Ok(result) => {
                self.apply(result);
                if self.view != ListView::Error {
                    self.view = ListView::Ready;
                }
            }
            Err(e) => {
                error!(page, error = %e, detail = %e.detail(), "roster request failed");
                self.view = ListView::Error;
            }
        }
    }

    /// Validate the form and adopt it as the current filter, without
    /// fetching. On rejection the previous filter stays in place.
    pub fn apply_form(&mut self) -> Result<(), Vec<FieldError>> {
        match self.form.validate() {
            Ok(filter) => {
                self.form_errors.clear();
                self.filter = filter;
                Ok(())
            }
            Err(errors) => {
                warn!(count = errors.len(), "filter form rejected");
                self.form_errors = errors.clone();
                Err(errors)
            }
        }
    }

    /// Validate the form and, when it passes, fetch page 0 of the new filter.
    ///
    /// Statistics are left untouched: they describe every open case.
    pub async fn submit(&mut self, api: &dyn CaseApi) -> Result<(), Vec<FieldError>> {
        self.apply_form()?;
        self.fetch(api, 0).await;
        Ok(())
    }

    /// Reset form and filter, then fetch page 0 unfiltered.
    pub async fn clear(&mut self, api: &dyn CaseApi) {
        self.form.reset();
        self.form_errors.clear();
        self.filter = Filter::default();
        self.fetch(api, 0).await;
    }

    pub async fn goto(&mut self, api: &dyn CaseApi, page: u32) {
        self.fetch(api, page).await;
    }

    pub async fn previous(&mut self, api: &dyn CaseApi) {
        if let Some(page) = self.pager.previous() {
            self.fetch(api, page).await;
        }
    }

    pub async fn next(&mut self, api: &dyn CaseApi) {
        if let Some(page) = self.pager.next() {
            self.fetch(api, page).await;
        }
    }

    async fn fetch(&mut self, api: &dyn CaseApi, page: u32) {
        self.view = ListView::Loading;
        match api.search(&self.filter, page).await {
            Ok(result) => {
                self.apply(result);
                self.view = ListView::Ready;
            }
            Err(e) => {
                error!(page, error = %e, detail = %e.detail(), "roster request failed");
                self.view = ListView::Error;
            }
        }
    }

    fn apply(&mut self, page: PersonPage) {
        let mut items = page.content;
        if items.len() > PAGE_SIZE as usize {
            warn!(
                received = items.len(),
                "roster page larger than requested, truncating"
            );
            items.truncate(PAGE_SIZE as usize);
        }
        info!(
            page = page.number,
            count = items.len(),
            total = page.total_elements,
            "roster page loaded"
        );
        self.items = items;
        self.pager = Pager::new(page.number, page.total_pages);
        self.total_elements = page.total_elements;
    }
}
