pub mod check_url;
pub mod history;
pub mod render;
pub mod respond;
