pub mod makeup_items;
