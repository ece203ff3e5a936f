pub mod response;
pub mod submission;
