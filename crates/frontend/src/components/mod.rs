pub mod label_form;
pub mod map_view;
pub mod notice;
pub mod status_view;
