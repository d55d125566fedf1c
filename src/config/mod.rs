//! Core configuration types and traits
//!
//! This module contains the foundational types for settings assembly:
//! - `FieldSpec` - One named, typed configuration slot
//! - `SettingsSchema` - Trait for a settings record built from a fixed field list
//! - `EnvSource` - Where raw variable text comes from
//! - `BuildMode` - Compile-time development/production switch

mod schema;
mod types;

pub use schema::{FieldKind, FieldSpec, SettingsSchema, ValueType, validate_schema};

pub use types::{BuildMode, EnvSource, MapEnv, ProcessEnv};
