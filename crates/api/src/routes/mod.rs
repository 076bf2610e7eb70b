pub mod health;
pub mod makeup_items;
