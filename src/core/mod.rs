pub mod carousel;
pub mod checker;
pub mod config;
pub mod fetch;
pub mod git;
pub mod ideas;
pub mod image_opt;
pub mod import;
pub mod log;
pub mod price;
pub mod prices;
pub mod process;
pub mod silver;
pub mod site;
