pub mod application;
pub mod availability;
pub mod competence;
pub mod person;
pub mod translation;

pub use application::{Application, ApplicationStatus, ApplicationSubmission};
pub use availability::AvailabilityPeriod;
pub use competence::{Competence, CompetenceProfile};
pub use person::{Person, Role};
pub use translation::{CompetenceTranslation, Language};
