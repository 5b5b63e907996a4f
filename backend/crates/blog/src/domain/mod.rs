//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Post, Tag) and their sparse patches
//! - Domain value objects (PostStatus, PostCriteria, Page)
//! - Domain services (folding joined rows into posts)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
