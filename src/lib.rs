//! Workspace-level tooling package.
//!
//! Carries the pre-commit hook configuration; all functionality lives in
//! the member crates under `crates/`.
