pub(crate) mod post_details;
pub(crate) mod post_form;
pub(crate) mod posts_panel;
pub(crate) mod session_panel;
