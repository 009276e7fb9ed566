//! Page controllers: the state behind each view of the portal.
//!
//! Controllers own page-local state and drive it through [`CaseApi`] calls.
//! They never render; the binary turns their views into text.
//!
//! [`CaseApi`]: crate::CaseApi

pub mod card;
pub mod detail;
pub mod dialog;
pub mod list;

#[cfg(test)]
pub(crate) mod fake;

pub use card::{CardView, DetailCard};
pub use detail::{DetailPage, DetailView};
pub use dialog::{AddInfoDialog, DialogState, Notice, SubmitError};
pub use list::{ListPage, ListView};
