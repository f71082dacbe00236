pub mod erp;
pub mod fastener;
pub mod normalizer;
pub mod numbering;

pub use erp::{build_erp_tables, ErpTableBuilder};
pub use numbering::AllocatorState;
