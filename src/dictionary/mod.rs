// Dictionary module - the persistence controller handle, its errors and bulk import

mod error;
mod import;
mod store;

pub use error::DictionaryError;
pub use import::parse_entries;
pub use store::Dictionary;
