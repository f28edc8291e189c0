//! Drill operations composed from the core components and the collaborators

pub mod check;
pub mod verses;
pub mod words;
