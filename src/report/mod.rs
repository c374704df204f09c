mod formatter;

pub use formatter::WorkflowFormatter;
