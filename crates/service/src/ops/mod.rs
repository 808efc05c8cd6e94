#![forbid(unsafe_code)]

mod assign;
mod import;
mod niches;
mod organize;
mod stats;
pub(crate) mod suggestions;
