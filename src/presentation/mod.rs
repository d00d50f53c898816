pub mod trails;
pub mod palette;
pub mod console;
