//! Shared access-control helpers for the Tribal Chief contract suite.
//!
//! This crate provides [`roles`], the Guardian / Governor role registry that
//! backs every privileged entry point of the staking contracts.

#![no_std]

pub mod roles;

pub use roles::*;
