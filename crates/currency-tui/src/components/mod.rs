pub mod currency_picker;
pub mod header;
pub mod selected_list;
