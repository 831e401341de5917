// Presentation layer used by the CLI binary.

pub mod view;
