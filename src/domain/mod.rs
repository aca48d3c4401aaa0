pub mod awrs;
pub mod lookup_result;
pub mod status;

pub use awrs::format_awrs;
pub use lookup_result::LookupResult;
pub use status::normalise_status;
