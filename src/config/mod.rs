//! Configuration management for specq
//!
//! specq has a single configuration layer, the build environment
//! ([`BuildEnv`]), which supplies the distribution context a spec is evaluated
//! in. It is loaded once per invocation from a TOML file and then patched
//! from `SPECQ_*` environment variables.
//!
//! # Modules
//!
//! - `build_env` - TOML-backed build environment with environment overrides

mod build_env;

pub use build_env::BuildEnv;
