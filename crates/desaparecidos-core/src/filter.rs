//! Roster filter: raw form input, validation, and the query it produces.

use crate::error::FieldError;
use crate::model::{CaseStatus, Sex};

/// Fixed number of persons requested per roster page.
pub const PAGE_SIZE: u32 = 10;

/// Validated filter applied to the roster endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub name: Option<String>,
    pub age_from: Option<u32>,
    pub age_to: Option<u32>,
    pub sex: Option<Sex>,
    pub status: Option<CaseStatus>,
}

impl Filter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Query pairs for `GET /pessoas/aberto/filtro`.
    ///
    /// Pagination is always present. A zero age bound carries no constraint
    /// and is left out, like every other unset field.
    pub fn query(&self, page: u32) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("pagina", page.to_string()),
            ("porPagina", PAGE_SIZE.to_string()),
        ];
        if let Some(name) = &self.name {
            params.push(("nome", name.clone()));
        }
        if let Some(age) = self.age_from.filter(|&a| a > 0) {
            params.push(("faixaIdadeInicial", age.to_string()));
        }
        if let Some(age) = self.age_to.filter(|&a| a > 0) {
            params.push(("faixaIdadeFinal", age.to_string()));
        }
        if let Some(sex) = self.sex {
            params.push(("sexo", sex.as_str().to_string()));
        }
        if let Some(status) = self.status {
            params.push(("status", status.as_str().to_string()));
        }
        params
    }
}

/// Filter form exactly as typed. Empty strings mean "unset".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterForm {
    pub name: String,
    pub age_from: String,
    pub age_to: String,
    pub sex: String,
    pub status: String,
}

impl FilterForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Validate every field, collecting all errors.
    ///
    /// Ages must be non-negative integers. The range itself is not checked:
    /// an initial age above the final age is passed through to the API.
    pub fn validate(&self) -> Result<Filter, Vec<FieldError>> {
        let mut errors = Vec::new();

        let age_from = parse_age("faixaIdadeInicial", &self.age_from, &mut errors);
        let age_to = parse_age("faixaIdadeFinal", &self.age_to, &mut errors);

        let sex = non_blank(&self.sex).and_then(|s| {
            s.parse::<Sex>()
                .map_err(|e| errors.push(FieldError::new("sexo", e)))
                .ok()
        });
        let status = non_blank(&self.status).and_then(|s| {
            s.parse::<CaseStatus>()
                .map_err(|e| errors.push(FieldError::new("status", e)))
                .ok()
        });

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Filter {
            name: non_blank(&self.name).map(str::to_string),
            age_from,
            age_to,
            sex,
            status,
        })
    }
}

fn non_blank(s: &str) -> Option<&str> {
    let s = s.trim();
    (!s.is_empty()).then_some(s)
}

fn parse_age(field: &'static str, raw: &str, errors: &mut Vec<FieldError>) -> Option<u32> {
    let raw = non_blank(raw)?;
    match raw.parse::<u32>() {
        Ok(age) => Some(age),
        Err(_) => {
            let message = if raw.parse::<i64>().is_ok_and(|n| n < 0) {
                "A idade não pode ser negativa"
            } else {
                "Informe um número inteiro"
            };
            errors.push(FieldError::new(field, message));
            None
        }
    }
}
