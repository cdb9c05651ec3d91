//! Provider-facing descriptors.
//!
//! `descriptor` exposes validated endpoint metadata ([`ProviderDescriptor`]) for the four
//! endpoints the two-phase flow talks to, plus presets for the public Feishu and Lark Suite
//! deployments.

pub mod descriptor;

pub use descriptor::*;
