//! Declarative fixture applications loaded from YAML / JSON / JSONC files.

pub mod error;
pub mod fixture;
pub mod parser;

pub use error::ConfigError;
pub use fixture::{FixtureFile, FixtureResponse, FixtureRoute};
pub use parser::{load_fixture_app, load_fixtures};
