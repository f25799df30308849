#![forbid(unsafe_code)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR" ), "/", "README.md"))]

pub mod configs;
pub mod errors;
pub mod redirect;
pub mod response;

pub use redirect::{RedirectForm, RedirectHttpResponse, RedirectMethod};
pub use response::{
    BaseResponse, PaymentRequest, PaymentResponse, RedirectResponse, ResponseState,
};

pub(crate) use tracing as logger;
