pub mod aggregate;
pub mod interpretation;
