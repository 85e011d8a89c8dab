//! Workspace-level tooling package (pre-commit hooks); no code.
