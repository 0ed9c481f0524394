pub mod client;
pub mod native;
pub mod types;

pub use client::{HttpClient, REQUEST_ERROR, RequestError};
pub use native::NativeHttpClient;
pub use types::{Method, ParamValue, Params, RequestDescriptor, RequestKind, Response};
