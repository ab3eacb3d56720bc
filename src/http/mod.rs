//! HTTP utility module
//!
//! Response builders shared by the request handlers.

pub mod response;

pub use response::{
    build_400_response, build_404_response, build_405_response, build_413_response,
    build_json_response, build_options_response, build_text_response,
};
