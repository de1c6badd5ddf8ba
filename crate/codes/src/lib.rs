#![allow(clippy::upper_case_acronyms)]

//! Named status, disposition and request-type codes of a certificate
//! services CA.
//!
//! Three independent domains are covered:
//! - [`CaResponseDisposition`]: the disposition a CA returns for a request,
//! - [`RequestDisposition`]: the disposition of a request row in the CA database,
//! - [`RequestType`] / [`RequestFlags`]: the request format and modifier flags
//!   passed when submitting a request.

pub use ca_response::CaResponseDisposition;
pub use domain::{CodeDomain, Decoded};
pub use error::{CodeError, CodeResult};
pub use request_disposition::RequestDisposition;
pub use request_type::{FORMAT_MASK, MODIFIER_MASK, RequestFlags, RequestType, parse_u32};

mod ca_response;
mod domain;
mod error;
mod request_disposition;
mod request_type;
