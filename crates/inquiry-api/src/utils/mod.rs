pub mod provenance;

pub use provenance::{client_ip, request_provenance};
