//! Data models for MovieWorld

pub mod cast;
mod date;
pub mod movie;
pub mod page;
pub mod person;

// Re-export commonly used types
pub use cast::CastDiff;
pub use movie::{CreateMovie, Movie, MovieFields, MoviePage, UpdateMovie};
pub use page::{Page, PageQuery};
pub use person::{Actor, CreatePerson, PersonDetails, PersonFields, PersonPage};
