pub mod input;
pub mod output;

pub use input::{load_answers, load_questions};
pub use output::{create_writer, OutputFormat, ReportWriter};
