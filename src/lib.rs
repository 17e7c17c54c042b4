//! Lusog: uncertainty-aware symptom triage for English and Tagalog
//! narratives.
//!
//! A free-text symptom narrative is classified with Monte Carlo dropout
//! (repeated stochastic forward passes of a pretrained sequence
//! classifier), gated on confidence and epistemic uncertainty, and then
//! refined through adaptively selected follow-up questions. Sessions are
//! stateless: the caller echoes the belief state back each turn and the
//! cumulative narrative is reclassified from scratch.

pub mod api;
pub mod classify;
pub mod config;
pub mod model;
pub mod service;
pub mod triage;
