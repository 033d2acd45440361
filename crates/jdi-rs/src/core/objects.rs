//! mirrors of objects living in the target VM

pub mod field_table;
pub mod reference_type;
