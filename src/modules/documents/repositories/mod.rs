pub mod line_item_rows;

pub use line_item_rows::{
    delete_line_items, fetch_line_items, fetch_line_items_for, insert_line_items, ItemTable,
};
