// Job search proxy over the Adzuna API.

pub mod adzuna;
pub mod handlers;
