pub mod groups;
pub mod ok;
pub mod stripe;
