pub mod catalog;
pub mod health;
pub mod personalized_list;
