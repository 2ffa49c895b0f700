//! # Emberwood ECS
//!
//! Sparse-set Entity-Component-System registry: the in-memory database at
//! the heart of the engine. Renderer, editor panels, scripting bridge, and
//! scene serializer all talk to the world through the [`Registry`] API.
//!
//! ## Core Types
//!
//! - [`Entity`] — Lightweight (index, validity) handle to a world row
//! - [`Registry`] — Central container owning entities and component pools
//! - [`SceneView`] — Lazy multi-component intersection query
//! - [`ComponentPool`] — Dense, typed per-component-type storage
//! - [`SparseSet`] — O(1) presence/index structure backing every pool
//!
//! Component types need no registration: any `Send + Sync + 'static` type
//! becomes a component the first time it is added. [`components`] holds the
//! standard set the engine subsystems agree on.
//!
//! ## Example
//!
//! ```
//! use emberwood_ecs::Registry;
//! use emberwood_ecs::components::{Tag, Transform};
//!
//! let mut registry = Registry::new();
//!
//! let light = registry.create_entity();
//! registry.add_component(light, Transform::IDENTITY);
//! registry.add_component(light, Tag::new("Light"));
//!
//! for entity in registry.view::<(Transform, Tag)>() {
//!     let tag = registry.get_component::<Tag>(entity);
//!     assert_eq!(tag.as_str(), "Light");
//! }
//! ```

pub mod components;
mod entity;
mod pool;
mod registry;
mod sparse_set;
mod view;

pub use entity::Entity;
pub use pool::ComponentPool;
pub use registry::{Registry, DEFAULT_MAX_ENTITIES};
pub use sparse_set::SparseSet;
pub use view::{ComponentSet, SceneView, SceneViewIter};
