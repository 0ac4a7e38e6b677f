//! Form response model and field extraction.
//!
//! Responses are external, read-only entities owned by the form platform;
//! this module deserializes them from the workspace response store and turns
//! them into the ordered field sequences the template filler consumes.

mod extract;
mod response;

pub use extract::{extract, Field};
pub use response::{AnswerValue, FormResponse, ItemAnswer, JsonResponseStore, ResponseStore};
