pub mod api;
pub mod dates;
pub mod error;
pub mod feed;
pub mod filter;
pub mod model;
pub mod pages;
pub mod pagination;
pub mod route;
pub mod submission;

pub use api::CaseApi;
pub use error::{ApiError, FieldError};
pub use feed::sort_by_date_desc;
pub use filter::{Filter, FilterForm, PAGE_SIZE};
pub use model::{
    CaseStatus, Interview, Occurrence, Person, PersonPage, Poster, PosterKind, Sex, Statistics,
    SupplementaryInfo,
};
pub use pagination::Pager;
pub use route::Route;
pub use submission::{Attachment, InfoForm, InfoSubmission};
