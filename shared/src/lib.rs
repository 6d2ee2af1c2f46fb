pub mod models;
pub mod utils;
pub mod validation;

// Pure helpers shared by the client layer and the desktop shell.
// Nothing in this crate performs I/O.

pub use utils::brazilian_format::{
    format_date, format_date_time, format_money, format_number, DateInput,
};
pub use utils::{generate_unique_id, string_to_slug};
pub use validation::{is_valid_barcode, is_valid_cpf, is_valid_email, is_valid_money};
