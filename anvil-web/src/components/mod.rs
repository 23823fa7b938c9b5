pub mod meter;
pub mod toast_list;
