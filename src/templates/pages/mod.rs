pub mod entity_form;
pub mod entity_list;
pub mod home;

pub use entity_form::{entity_form_page, FormMode, FormVm};
pub use entity_list::{entity_list_page, ListVm};
pub use home::home_page;
