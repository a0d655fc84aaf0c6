#![forbid(unsafe_code)]

pub mod error;
pub mod grading;
pub mod model;

pub use error::Error;
pub use grading::{Verdict, grade_answer};
