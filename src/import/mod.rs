mod csv_import;

pub use csv_import::{import_accounts, import_file, ImportSummary};
