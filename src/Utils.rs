/// reading of sectioned text documents: capital-letter headers followed by JSON bodies
pub mod load_from_file;
