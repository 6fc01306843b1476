//! Clients for the two remote collaborators: the page scraper and the
//! question-answering function.

pub mod collaborator;
pub mod executor;
pub mod functions;
pub mod payload;

pub use collaborator::{AnswerRequest, Answerer, BackendError, Scraper};
pub use executor::execute;
pub use functions::FunctionsClient;
