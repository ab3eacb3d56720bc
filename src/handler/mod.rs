// Request handling module entry point
// Dispatches HTTP requests to the document handlers

pub mod document;
pub mod router;

pub use router::handle_request;
