//! Orchestration of pet and order operations
//!
//! Every operation is a linear flow over one session: normalize the payload,
//! check pet references, write, commit, then re-fetch to return the stored
//! shape. Errors returned before `commit` leave the store untouched.

pub mod orders;
pub mod pets;
