mod backends;
mod dispatch;
mod docx;
mod pdf;
mod run;

pub use run::run;
