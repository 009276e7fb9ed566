//! Case records as served by the missing-persons API.
//!
//! Field names follow the API's Portuguese camelCase JSON. Every record is
//! request-scoped: fetched, held by a page controller, dropped on navigation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::dates;

/// Treat an explicit JSON `null` the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "MASCULINO")]
    Male,
    #[serde(rename = "FEMININO")]
    Female,
}

impl Sex {
    /// Query-string value expected by the filter endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "MASCULINO",
            Self::Female => "FEMININO",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Male => "Masculino",
            Self::Female => "Feminino",
        }
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MASCULINO" => Ok(Self::Male),
            "FEMININO" => Ok(Self::Female),
            other => Err(format!("sexo desconhecido: {other}")),
        }
    }
}

/// Case status, both as a filter value and as the badge shown on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseStatus {
    #[serde(rename = "DESAPARECIDO")]
    Missing,
    #[serde(rename = "LOCALIZADO")]
    Located,
}

impl CaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Missing => "DESAPARECIDO",
            Self::Located => "LOCALIZADO",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Missing => "Desaparecido(a)",
            Self::Located => "Localizado(a)",
        }
    }
}

impl FromStr for CaseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DESAPARECIDO" => Ok(Self::Missing),
            "LOCALIZADO" => Ok(Self::Located),
            other => Err(format!("status desconhecido: {other}")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Person {
    #[serde(deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(rename = "nome", deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "idade", deserialize_with = "null_as_default")]
    pub age: u32,
    #[serde(rename = "sexo")]
    pub sex: Option<Sex>,
    #[serde(rename = "vivo", deserialize_with = "null_as_default")]
    pub alive: bool,
    #[serde(rename = "urlFoto")]
    pub photo_url: Option<String>,
    #[serde(rename = "ultimaOcorrencia")]
    pub latest_occurrence: Option<Occurrence>,
}

impl Person {
    /// Located when the latest occurrence reports the person found alive or
    /// carries a location date. No occurrence means still missing.
    pub fn status(&self) -> CaseStatus {
        match &self.latest_occurrence {
            Some(occ) if occ.found_alive || occ.located_at.is_some() => CaseStatus::Located,
            _ => CaseStatus::Missing,
        }
    }

    pub fn sex_label(&self) -> &'static str {
        self.sex.map(|s| s.label()).unwrap_or("Não informado")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Occurrence {
    #[serde(rename = "dtDesaparecimento")]
    pub disappeared_at: Option<String>,
    #[serde(rename = "dataLocalizacao")]
    pub located_at: Option<String>,
    #[serde(rename = "encontradoVivo", deserialize_with = "null_as_default")]
    pub found_alive: bool,
    #[serde(rename = "localDesaparecimentoConcat")]
    pub location: Option<String>,
    #[serde(rename = "ocoId", deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(rename = "ocorrenciaEntrevDesapDTO")]
    pub interview: Option<Interview>,
    #[serde(rename = "listaCartaz", deserialize_with = "null_as_default")]
    pub posters: Vec<Poster>,
}

impl Occurrence {
    pub fn disappeared_on(&self) -> Option<String> {
        self.disappeared_at.as_deref().map(dates::format_br)
    }

    pub fn located_on(&self) -> Option<String> {
        self.located_at.as_deref().map(dates::format_br)
    }
}

/// Interview notes taken when the disappearance was reported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Interview {
    #[serde(rename = "informacao")]
    pub notes: Option<String>,
    #[serde(rename = "vestimentasDesaparecido")]
    pub clothing: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PosterKind {
    PdfDesaparecido,
    PdfLocalizado,
    JpgDesaparecido,
    JpgLocalizado,
    InstaDesaparecido,
    InstaLocalizado,
}

impl PosterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PdfDesaparecido => "PDF_DESAPARECIDO",
            Self::PdfLocalizado => "PDF_LOCALIZADO",
            Self::JpgDesaparecido => "JPG_DESAPARECIDO",
            Self::JpgLocalizado => "JPG_LOCALIZADO",
            Self::InstaDesaparecido => "INSTA_DESAPARECIDO",
            Self::InstaLocalizado => "INSTA_LOCALIZADO",
        }
    }
}

impl fmt::Display for PosterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().replace('_', " "))
    }
}

/// A published flyer for an occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poster {
    #[serde(rename = "urlCartaz")]
    pub url: String,
    #[serde(rename = "tipoCartaz")]
    pub kind: PosterKind,
}

/// A note submitted by the public against an occurrence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplementaryInfo {
    #[serde(rename = "ocoId", deserialize_with = "null_as_default")]
    pub occurrence_id: u64,
    #[serde(rename = "informacao", deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(rename = "data", deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(rename = "anexos")]
    pub attachments: Option<Vec<String>>,
}

/// One page of the filtered roster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonPage {
    #[serde(deserialize_with = "null_as_default")]
    pub content: Vec<Person>,
    pub total_pages: u32,
    pub number: u32,
    pub total_elements: u64,
}

/// Aggregate counts over every open case, independent of any filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Statistics {
    #[serde(rename = "quantPessoasDesaparecidas")]
    pub missing: u64,
    #[serde(rename = "quantPessoasEncontradas")]
    pub found: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_full_json() {
        let json = r#"{
            "id": 1,
            "nome": "João Silva",
            "idade": 34,
            "sexo": "MASCULINO",
            "vivo": true,
            "urlFoto": "https://example.org/foto.jpg",
            "ultimaOcorrencia": {
                "dtDesaparecimento": "2025-08-20T10:00:00",
                "dataLocalizacao": null,
                "encontradoVivo": false,
                "localDesaparecimentoConcat": "Centro - Cuiabá/MT",
                "ocoId": 7,
                "ocorrenciaEntrevDesapDTO": {
                    "informacao": "Saiu para trabalhar",
                    "vestimentasDesaparecido": "camiseta azul"
                },
                "listaCartaz": [
                    {"urlCartaz": "https://example.org/c.pdf", "tipoCartaz": "PDF_DESAPARECIDO"}
                ]
            }
        }"#;
        let person: Person = serde_json::from_str(json).unwrap();
        assert_eq!(person.id, 1);
        assert_eq!(person.name, "João Silva");
        assert_eq!(person.sex, Some(Sex::Male));
        let occ = person.latest_occurrence.as_ref().unwrap();
        assert_eq!(occ.id, 7);
        assert_eq!(occ.posters[0].kind, PosterKind::PdfDesaparecido);
        assert_eq!(
            occ.interview.as_ref().unwrap().clothing.as_deref(),
            Some("camiseta azul")
        );
        assert_eq!(person.status(), CaseStatus::Missing);
    }

    #[test]
    fn person_sparse_json_uses_defaults() {
        let person: Person = serde_json::from_str(r#"{"nome": "Sem id", "idade": null}"#).unwrap();
        assert_eq!(person.id, 0);
        assert_eq!(person.age, 0);
        assert!(person.latest_occurrence.is_none());
        assert_eq!(person.sex_label(), "Não informado");
    }

    #[test]
    fn status_located_by_date_or_found_alive() {
        let mut person = Person {
            latest_occurrence: Some(Occurrence {
                located_at: Some("2025-09-02".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(person.status(), CaseStatus::Located);

        person.latest_occurrence = Some(Occurrence {
            found_alive: true,
            ..Default::default()
        });
        assert_eq!(person.status(), CaseStatus::Located);

        person.latest_occurrence = None;
        assert_eq!(person.status(), CaseStatus::Missing);
    }

    #[test]
    fn poster_kind_label_replaces_underscores() {
        assert_eq!(PosterKind::InstaLocalizado.to_string(), "INSTA LOCALIZADO");
    }

    #[test]
    fn sex_and_status_parse_case_insensitive() {
        assert_eq!("feminino".parse::<Sex>(), Ok(Sex::Female));
        assert_eq!(" LOCALIZADO ".parse::<CaseStatus>(), Ok(CaseStatus::Located));
        assert!("outro".parse::<Sex>().is_err());
    }

    #[test]
    fn page_and_statistics_json() {
        let page: PersonPage = serde_json::from_str(
            r#"{"content":[{"id":1,"nome":"A"},{"id":2,"nome":"B"}],"totalPages":3,"number":0,"totalElements":25}"#,
        )
        .unwrap();
        assert_eq!(page.content.len(), 2);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_elements, 25);

        let stats: Statistics = serde_json::from_str(
            r#"{"quantPessoasDesaparecidas": 120, "quantPessoasEncontradas": 80}"#,
        )
        .unwrap();
        assert_eq!(stats.missing, 120);
        assert_eq!(stats.found, 80);
    }

    #[test]
    fn supplementary_info_without_attachments() {
        let info: SupplementaryInfo = serde_json::from_str(
            r#"{"ocoId": 1, "informacao": "Visto na rodoviária", "data": "2025-09-01", "id": 10}"#,
        )
        .unwrap();
        assert_eq!(info.text, "Visto na rodoviária");
        assert!(info.attachments.is_none());
    }
}
