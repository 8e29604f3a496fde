//! Unit tests for the project context.
