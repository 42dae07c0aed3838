// Integration tests for the HTTP API
// Router-level request/response cycles plus the client against a live listener

pub mod client_test;
