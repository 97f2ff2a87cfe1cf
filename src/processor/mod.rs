pub mod flat_master;
pub mod hierarchy;
pub mod output;
pub mod text;

pub use flat_master::{
    create_flat_master_table, create_flat_master_table_from_input_order, DivisionRange,
    DivisionRanges,
};
pub use hierarchy::determine_hierarchy;
pub use text::clean_description;
