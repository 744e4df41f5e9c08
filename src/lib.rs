// Library root
// ------------
// Uploads a generated exam directory to the test server. The binary
// (`main.rs`) only parses arguments and maps errors to exit codes.
//
// Module responsibilities:
// - `model`: `Test` and `Permutation` records and their line parsing.
// - `layout`: file names inside a test directory and file access.
// - `form`: multipart bodies for the two upload endpoints.
// - `api`: blocking HTTP client talking to the server.
// - `cli`: argument definition and the upload sequence.
// - `error`: the error type and its exit codes.
// - `telemetry`: log subscriber setup.
pub mod api;
pub mod cli;
pub mod error;
pub mod form;
pub mod layout;
pub mod model;
pub mod telemetry;
