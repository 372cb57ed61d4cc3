pub mod run;
pub mod spectrum;
pub mod validate;
