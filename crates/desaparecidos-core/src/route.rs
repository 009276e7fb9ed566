//! Client-side routes: `/`, `/details/:id`, and everything else.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    /// Raw `:id` segment; the detail page decides whether it names a record.
    Detail(String),
    NotFound,
}

impl Route {
    /// Match a path. Query strings, fragments and trailing slashes are ignored.
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Self::List,
            ["details", id] => Self::Detail((*id).to_string()),
            _ => Self::NotFound,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::List => "/".into(),
            Self::Detail(id) => format!("/details/{id}"),
            Self::NotFound => "/404".into(),
        }
    }
}
