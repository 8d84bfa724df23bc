pub mod aggregate;
pub mod import;

pub use aggregate::{Client, ClientDto, ClientId};
pub use import::{
    is_valid_email, is_valid_phone, ClientCsvRow, ClientImportResult, ValidationError,
    CLIENT_CSV_TEMPLATE,
};
