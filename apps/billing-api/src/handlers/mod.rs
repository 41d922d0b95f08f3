pub mod catalog;
pub mod documents;
pub mod health;
pub mod session;

pub use catalog::{get_invoice, get_product, list_invoices, list_products};
pub use documents::{generate_pdf, send_email};
pub use health::health_check;
pub use session::{abandon_cart, get_session, scan, set_customer, submit};
