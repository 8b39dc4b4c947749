//! Build tooling knowledge.
//!
//! Recognizes the manifests and build files of the supported ecosystems
//! (Python, Node, Cargo, Gradle/Maven, Go modules, Bundler, Composer, .NET,
//! Make/CMake, containers).

pub mod artifacts;

pub use artifacts::{BuildArtifactDetector, Ecosystem};
