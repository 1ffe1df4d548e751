pub mod cors;

// Re-export middleware functions
pub use cors::with_cors_headers;
