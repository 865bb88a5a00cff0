pub mod convert;
pub mod elements;
