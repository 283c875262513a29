//! The resolution container and the pieces it is assembled from.

mod builder;
mod cache;
mod catalog;
mod container;
mod hooks;
mod instance;
mod object_builder;
mod registry;

pub use builder::ContainerBuilder;
pub use cache::InstanceCache;
pub use catalog::{
    Arguments, Constructable, ConstructorFn, DeclaredType, DefaultFn, ParameterInfo,
    TypeCatalog, TypeDescriptor, TypeLocator, type_key,
};
pub use container::Container;
pub use hooks::{AbandonHook, AfterHook, BeforeHook, ForgetHook, HookDispatcher, HookTarget};
pub use instance::{AbstractRef, Instance, Parameters, instance, trait_instance};
pub use object_builder::ObjectBuilder;
pub use registry::{BindingRecord, BindingRegistry, Concrete, Factory};
