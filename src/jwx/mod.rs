// src/jwx/mod.rs

//! JOSE primitives: JWK records, JWKS key resolution, and JWS (RS256)
//! signature verification.

pub mod jwk;
pub mod jwk_set;
pub mod jws;

pub use jwk::Jwk;
pub use jws::{Algorithm, Jws};
