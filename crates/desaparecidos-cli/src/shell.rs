//! Router shell: maps a route to its page controller and renders one view.

use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;
use desaparecidos_core::pages::{
    CardView, DetailCard, DetailPage, DetailView, ListPage, ListView, SubmitError,
};
use desaparecidos_core::{Attachment, CaseApi, FilterForm, InfoForm, Route};
use tracing::info;

use crate::display;

/// A rendered page and whether it represents a successful outcome.
pub struct Rendered {
    pub text: String,
    pub ok: bool,
}

impl Rendered {
    fn ok(text: String) -> Self {
        Self { text, ok: true }
    }

    fn failed(text: String) -> Self {
        Self { text, ok: false }
    }
}

fn show_loading() {
    eprintln!("{}", display::loading());
}

/// Resolve a client-side path the way the browser router would.
pub async fn open(api: &dyn CaseApi, path: &str) -> Rendered {
    let route = Route::parse(path);
    info!(path, route = ?route, "routing");
    match route {
        Route::List => list(api, FilterForm::default(), 0).await,
        Route::Detail(id) => details(api, &id).await,
        Route::NotFound => Rendered::failed(display::render_not_found()),
    }
}

/// Roster page for `form`, at zero-based `page`.
///
/// An invalid form is reported without touching the network.
pub async fn list(api: &dyn CaseApi, form: FilterForm, page: u32) -> Rendered {
    let mut roster = ListPage::new();
    roster.form = form;
    if let Err(errors) = roster.apply_form() {
        let mut text = String::from("Filtro inválido:\n");
        text.push_str(&display::render_field_errors(&errors));
        return Rendered::failed(text);
    }
    show_loading();
    roster.load_at(api, page).await;
    let text = display::render_list(&roster);
    match roster.view() {
        ListView::Ready => Rendered::ok(text),
        _ => Rendered::failed(text),
    }
}

/// Statistics panel alone.
pub async fn statistics(api: &dyn CaseApi) -> Rendered {
    show_loading();
    match api.statistics().await {
        Ok(stats) => Rendered::ok(display::render_statistics(&stats)),
        Err(e) => {
            tracing::error!(error = %e, detail = %e.detail(), "statistics request failed");
            Rendered::failed(display::render_server_error())
        }
    }
}

async fn load_card(api: &dyn CaseApi, raw_id: &str) -> Result<DetailCard, Rendered> {
    show_loading();
    let person = match DetailPage::resolve(api, raw_id).await {
        DetailView::Content(person) => person,
        DetailView::NotFound | DetailView::Loading => {
            return Err(Rendered::failed(display::render_not_found()));
        }
        DetailView::Error => return Err(Rendered::failed(display::render_server_error())),
    };
    let mut card = DetailCard::new(person);
    card.load(api).await;
    match card.view() {
        CardView::Ready => Ok(card),
        _ => Err(Rendered::failed(display::render_card(&card))),
    }
}

/// Detail page with the occurrence's information feed.
pub async fn details(api: &dyn CaseApi, raw_id: &str) -> Rendered {
    match load_card(api, raw_id).await {
        Ok(card) => Rendered::ok(display::render_card(&card)),
        Err(rendered) => rendered,
    }
}

/// Open the add-information dialog on a person's card, fill it, submit it,
/// and render the outcome followed by the refreshed card.
pub async fn add_info(
    api: &dyn CaseApi,
    raw_id: &str,
    form: InfoForm,
    today: NaiveDate,
) -> Rendered {
    let mut card = match load_card(api, raw_id).await {
        Ok(card) => card,
        Err(rendered) => return rendered,
    };
    let Some(dialog) = card.dialog_mut() else {
        return Rendered::failed(display::render_not_found());
    };
    dialog.open();
    if let Some(fields) = dialog.form_mut() {
        *fields = form;
    }

    let result = card.submit_dialog(api, today).await;
    let notice = card.dialog_mut().and_then(|d| d.take_notice());
    let mut text = notice
        .as_ref()
        .map(display::render_notice)
        .unwrap_or_default();

    match result {
        Ok(created) => {
            info!(id = created.id, "information added");
            text.push_str(&display::render_card(&card));
            Rendered::ok(text)
        }
        Err(SubmitError::Invalid(errors)) => {
            text.push_str("Formulário inválido:\n");
            text.push_str(&display::render_field_errors(&errors));
            Rendered::failed(text)
        }
        Err(_) => Rendered::failed(text),
    }
}

/// Read a file from disk as a form attachment.
pub async fn load_attachment(path: &Path) -> anyhow::Result<Attachment> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading attachment {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .context("attachment path has no file name")?
        .to_string();
    Ok(Attachment::new(file_name, bytes))
}
