pub mod logger;
pub mod time_ranges;
pub mod url;
