//! The "add information" form and the payload it produces.

use std::path::Path;

use chrono::NaiveDate;

use crate::dates::iso_date;
use crate::error::FieldError;

/// Minimum length of the free-text note, in characters.
pub const MIN_TEXT_CHARS: usize = 5;

/// Maximum number of files sent with one note.
pub const MAX_ATTACHMENTS: usize = 2;

/// A file attached to a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = guess_mime(&file_name).to_string();
        Self {
            file_name,
            mime,
            bytes,
        }
    }
}

/// MIME type for the file kinds the portal accepts: images, PDF and Word.
pub fn guess_mime(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoForm {
    pub text: String,
    pub date: Option<NaiveDate>,
    pub files: Vec<Attachment>,
}

impl InfoForm {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.date.is_none() && self.files.is_empty()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check every rule against `today` and collect all violations.
    pub fn validate(&self, today: NaiveDate) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.text.chars().count() < MIN_TEXT_CHARS {
            errors.push(FieldError::new(
                "informacao",
                "Mensagem deve ter pelo menos 5 caracteres.",
            ));
        }

        match self.date {
            None => errors.push(FieldError::new("data", "Por favor, selecione uma data")),
            Some(date) if date > today => errors.push(FieldError::new(
                "data",
                "A data não pode estar no futuro",
            )),
            Some(_) => {}
        }

        if self.files.len() > MAX_ATTACHMENTS {
            errors.push(FieldError::new(
                "files",
                "Você só pode enviar até 2 arquivos, se possui mais de um arquivo word ou pdf, \
                 tente juntar todos em um arquivo só para enviar somente ele.",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Validate and build the payload for `occurrence_id`.
    pub fn to_submission(
        &self,
        occurrence_id: u64,
        today: NaiveDate,
    ) -> Result<InfoSubmission, Vec<FieldError>> {
        self.validate(today)?;
        let date = self.date.ok_or_else(|| {
            vec![FieldError::new("data", "Por favor, selecione uma data")]
        })?;
        Ok(InfoSubmission {
            text: self.text.clone(),
            date,
            occurrence_id,
            attachments: self.files.clone(),
        })
    }
}

/// A validated note ready to be posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoSubmission {
    pub text: String,
    pub date: NaiveDate,
    pub occurrence_id: u64,
    pub attachments: Vec<Attachment>,
}

impl InfoSubmission {
    /// Query pairs for `POST /ocorrencias/informacoes-desaparecido`.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("informacao", self.text.clone()),
            ("data", iso_date(self.date)),
            ("ocoId", self.occurrence_id.to_string()),
        ]
    }
}
