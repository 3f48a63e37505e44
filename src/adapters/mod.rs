// Adapters layer: concrete TabularDataSource implementations.

pub mod cache;
pub mod csv_dir;
pub mod memory;
pub mod sheets;

pub use cache::CachedSource;
pub use csv_dir::CsvDirectorySource;
pub use memory::InMemorySource;
pub use sheets::GoogleSheetsSource;
