pub mod form_client;

pub use form_client::{FormClient, FormSource};
