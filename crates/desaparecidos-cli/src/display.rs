//! Text rendering of the portal's pages.
//!
//! Each renderer returns the full page as a `String` framed by the site
//! header and footer, so the shell prints exactly one view per route.

use std::fmt::Write;

use desaparecidos_core::pages::card::EMPTY_FEED;
use desaparecidos_core::pages::{CardView, DetailCard, ListPage, ListView, Notice};
use desaparecidos_core::{FieldError, Filter, Occurrence, Pager, Person, Statistics, dates};

const SITE_TITLE: &str = "Polícia Judiciária Civil de Mato Grosso";
const FOOTER: &str = "© Todos os direitos reservados";
const HOME_LINK: &str = "Voltar para a Home: /";

// ── Frame ──

fn header(out: &mut String) {
    let _ = writeln!(out, "=== {SITE_TITLE} ===");
    out.push('\n');
}

fn footer(out: &mut String) {
    out.push('\n');
    let _ = writeln!(out, "--- {FOOTER} ---");
}

fn framed(body: impl FnOnce(&mut String)) -> String {
    let mut out = String::new();
    header(&mut out);
    body(&mut out);
    footer(&mut out);
    out
}

fn field(out: &mut String, label: &str, value: impl std::fmt::Display) {
    let _ = writeln!(out, "  {:<26} {}", label, value);
}

/// Shown on stderr while a page is loading.
pub fn loading() -> &'static str {
    "Carregando..."
}

// ── Error pages ──

pub fn render_not_found() -> String {
    framed(|out| {
        let _ = writeln!(out, "404");
        let _ = writeln!(out, "Página não encontrada");
        out.push('\n');
        let _ = writeln!(out, "{HOME_LINK}");
    })
}

pub fn render_server_error() -> String {
    framed(|out| {
        let _ = writeln!(out, "500");
        let _ = writeln!(
            out,
            "Ocorreu um erro interno no servidor, tente novamente mais tarde."
        );
        out.push('\n');
        let _ = writeln!(out, "{HOME_LINK}");
    })
}

// ── Forms and notices ──

pub fn render_field_errors(errors: &[FieldError]) -> String {
    let mut out = String::new();
    for err in errors {
        let _ = writeln!(out, "  ! {}: {}", err.field, err.message);
    }
    out
}

pub fn render_notice(notice: &Notice) -> String {
    match notice {
        Notice::Success(msg) => format!("[ok] {msg}\n"),
        Notice::Failure(msg) => format!("[erro] {msg}\n"),
    }
}

// ── List page ──

pub fn render_list(page: &ListPage) -> String {
    match page.view() {
        ListView::Error => return render_server_error(),
        ListView::Loading => return format!("{}\n", loading()),
        ListView::Ready => {}
    }

    framed(|out| {
        let _ = writeln!(out, "Pessoas Desaparecidas");
        let _ = writeln!(
            out,
            "Utilize os filtros abaixo para buscar pessoas desaparecidas"
        );
        out.push('\n');

        render_filter(out, page.filter());
        if !page.form_errors().is_empty() {
            out.push_str(&render_field_errors(page.form_errors()));
        }
        out.push('\n');

        let _ = writeln!(out, "{}", page.summary());
        if page.total_elements() > 0
            && let Some(stats) = page.statistics()
        {
            out.push_str(&render_statistics(&stats));
        }
        out.push('\n');

        for person in page.items() {
            render_person_card(out, person);
        }

        if page.pager().is_visible() {
            let _ = writeln!(out, "{}", render_pager(&page.pager()));
        }
    })
}

fn render_filter(out: &mut String, filter: &Filter) {
    if filter.is_empty() {
        let _ = writeln!(out, "Filtros: nenhum");
        return;
    }
    let mut parts = Vec::new();
    if let Some(name) = &filter.name {
        parts.push(format!("nome={name}"));
    }
    if let Some(age) = filter.age_from {
        parts.push(format!("idade inicial={age}"));
    }
    if let Some(age) = filter.age_to {
        parts.push(format!("idade final={age}"));
    }
    if let Some(sex) = filter.sex {
        parts.push(format!("sexo={}", sex.label()));
    }
    if let Some(status) = filter.status {
        parts.push(format!("status={}", status.label()));
    }
    let _ = writeln!(out, "Filtros: {}", parts.join(", "));
}

/// Only non-zero counters are shown.
pub fn render_statistics(stats: &Statistics) -> String {
    let mut out = String::new();
    if stats.missing > 0 {
        let _ = writeln!(out, "Total de pessoas desaparecidas: {}", stats.missing);
    }
    if stats.found > 0 {
        let _ = writeln!(out, "Total de pessoas encontradas: {}", stats.found);
    }
    out
}

fn render_person_card(out: &mut String, person: &Person) {
    let _ = writeln!(out, "[{}] {}", person.status().label(), person.name);
    field(out, "Sexo", person.sex_label());
    field(out, "Idade", format!("{} anos", person.age));
    if let Some(date) = person
        .latest_occurrence
        .as_ref()
        .and_then(Occurrence::disappeared_on)
    {
        field(out, "Desaparecido em", date);
    }
    if person.photo_url.is_none() {
        field(out, "Foto", "Imagem não fornecida");
    }
    field(out, "Ver detalhes", format!("/details/{}", person.id));
    out.push('\n');
}

/// One-line pager: pages are 1-based on screen, the current page bracketed.
pub fn render_pager(pager: &Pager) -> String {
    let mut parts = Vec::new();
    parts.push(if pager.has_previous() {
        "« Anterior".to_string()
    } else {
        "(« Anterior)".to_string()
    });
    let mut last_shown: Option<u32> = None;
    for page in pager.window() {
        if last_shown.is_some_and(|prev| page > prev + 1) {
            parts.push("…".into());
        }
        if page == pager.current {
            parts.push(format!("[{}]", page + 1));
        } else {
            parts.push((page + 1).to_string());
        }
        last_shown = Some(page);
    }
    parts.push(if pager.has_next() {
        "Próxima »".to_string()
    } else {
        "(Próxima »)".to_string()
    });
    parts.join("  ")
}

// ── Detail card ──

pub fn render_card(card: &DetailCard) -> String {
    match card.view() {
        CardView::NotFound => return render_not_found(),
        CardView::Error => return render_server_error(),
        CardView::Loading => return format!("{}\n", loading()),
        CardView::Ready => {}
    }

    let person = card.person();
    framed(|out| {
        let _ = writeln!(out, "=== {} ===", person.name);
        out.push('\n');

        let _ = writeln!(out, "Perfil");
        match &person.photo_url {
            Some(url) => field(out, "Foto", url),
            None => field(out, "Foto", "Imagem não fornecida"),
        }
        field(out, "Idade", format!("{} anos", person.age));
        field(out, "Sexo", person.sex_label());
        field(out, "Situação", person.status().label());
        out.push('\n');

        let _ = writeln!(out, "Últimas informações");
        if card.feed().is_empty() {
            let _ = writeln!(out, "  {EMPTY_FEED}");
        }
        for item in card.feed() {
            let _ = writeln!(out, "  {}", dates::format_br(&item.date));
            for (idx, url) in item.attachments.iter().flatten().enumerate() {
                let _ = writeln!(out, "    Anexo {}: {}", idx + 1, url.trim());
            }
            let _ = writeln!(out, "    Informação: {}", item.text.trim());
        }
        out.push('\n');

        if let Some(occ) = card.occurrence() {
            render_occurrence(out, occ);
        }

        if card.dialog().is_some() {
            let _ = writeln!(
                out,
                "Adicionar mais informações: desaparecidos add-info {} --informacao ... --data AAAA-MM-DD",
                person.id
            );
        }
        let _ = writeln!(out, "Voltar para a página inicial: /");
    })
}

fn render_occurrence(out: &mut String, occ: &Occurrence) {
    let _ = writeln!(out, "Última Ocorrência");
    if let Some(date) = occ.disappeared_on() {
        field(out, "Data do desaparecimento", date);
    }
    if let Some(date) = occ.located_on() {
        field(out, "Data da localização", date);
    }
    if let Some(location) = occ.location.as_deref().filter(|l| !l.is_empty()) {
        field(out, "Local do desaparecimento", location);
    }
    field(out, "ID da ocorrência", occ.id);
    field(
        out,
        "Situação",
        if occ.found_alive {
            "Localizado vivo"
        } else {
            "Sem informações"
        },
    );
    if let Some(interview) = &occ.interview {
        if let Some(clothing) = interview.clothing.as_deref().filter(|c| !c.is_empty()) {
            field(out, "Vestimentas", clothing);
        }
        if let Some(notes) = interview.notes.as_deref().filter(|n| !n.is_empty()) {
            field(out, "Informações da entrevista", notes.trim());
        }
    }
    if !occ.posters.is_empty() {
        let _ = writeln!(out, "  Lista de cartaz:");
        for poster in &occ.posters {
            let _ = writeln!(out, "    - {}: {}", poster.kind, poster.url);
        }
    }
    out.push('\n');
}
