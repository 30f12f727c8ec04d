mod table;

pub use table::{is_private_use, CodePointEncodingTable, MAX_SCALAR};
