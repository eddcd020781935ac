pub mod rank;
pub mod show;
pub mod site;
