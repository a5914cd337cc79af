//! Access to compiled contract artifacts.
//!
//! Contracts are compiled outside of this repository (by Hardhat) and the
//! resulting JSON artifacts are read at runtime to get the creation code of
//! the contract that should be deployed.
pub mod artifact;
pub mod error;
pub mod store;

pub use {artifact::Artifact, error::ArtifactError, store::ArtifactStore};
