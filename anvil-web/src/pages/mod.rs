pub mod forge;
pub mod home;
pub mod not_found;
