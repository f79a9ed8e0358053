pub mod types;

pub use types::{Label, Verdict, VerdictReport};
