//! Web server exposing the score catalog as a JSON query API.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080, cataloging ./scores
//! scorebook serve
//!
//! # Custom port and auto-open browser
//! scorebook serve --port 3000 --open
//!
//! # Different document root
//! scorebook --root /srv/scores serve --address 0.0.0.0
//! ```
//!
//! ## API Endpoints
//!
//! - `GET /` - Index page describing the API
//! - `GET /api/scores` - List scores, filterable by query parameters
//! - `GET /api/scores/{path}` - Fetch one score by catalog path
//! - `GET /api/categories` - Distinct categories, sorted
//! - `GET /api/composers` - Distinct composers, sorted
//! - `GET /api/search/title?q=` - Title substring search
//! - `GET /api/search/composer?q=` - Composer substring search
//! - `GET /api/catalog` - Catalog status (source, size, load time)

pub mod server;
