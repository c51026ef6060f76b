//! Test support: mocks of the form's collaborators

pub mod mocks;
