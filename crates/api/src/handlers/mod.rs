pub mod items;
pub mod orders;
pub mod view;
