//! Maven deploy protocol: POM generation, repository layout, checksum
//! sidecars, authentication, and artifact upload.

pub mod auth;
pub mod checksum;
pub mod pom;
pub mod publish;
pub mod repository;
pub mod types;
pub mod upload;
