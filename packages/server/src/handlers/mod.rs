pub mod site;
pub mod website;
