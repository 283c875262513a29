//! Constructor introspection.
//!
//! Rust has no runtime reflection, so the container asks a [`TypeLocator`] for
//! a [`TypeDescriptor`]: the ordered constructor parameters of a type and a
//! closure that builds it from positional [`Arguments`]. Descriptors are
//! usually produced by `#[derive(Constructable)]` and collected in a
//! [`TypeCatalog`].

use super::instance::Instance;
use crate::error::{Result, SingletonizeError};
use dashmap::DashMap;
use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

/// The abstract name the container uses for a Rust type.
pub fn type_key<T: ?Sized + 'static>() -> &'static str {
    type_name::<T>()
}

/// The declared type of a constructor parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeclaredType {
    /// A type the container can resolve by name.
    Dependency(String),
    /// A plain value; only caller parameters or defaults can satisfy it.
    Value(&'static str),
}

pub type DefaultFn = Arc<dyn Fn() -> Instance + Send + Sync>;

#[derive(Clone)]
pub struct ParameterInfo {
    name: String,
    declared: DeclaredType,
    default: Option<DefaultFn>,
}

impl ParameterInfo {
    /// A parameter resolved through the container as `T`.
    pub fn dependency<T: ?Sized + 'static>(name: impl Into<String>) -> Self {
        Self::named_dependency(name, type_key::<T>())
    }

    /// A parameter resolved through the container under an arbitrary name.
    pub fn named_dependency(name: impl Into<String>, abstract_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared: DeclaredType::Dependency(abstract_name.into()),
            default: None,
        }
    }

    pub fn value<T: 'static>(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared: DeclaredType::Value(type_name::<T>()),
            default: None,
        }
    }

    pub fn with_default<T, F>(mut self, default: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.default = Some(Arc::new(move || Arc::new(default()) as Instance));
        self
    }

    /// A default that already is an [`Instance`], such as a shared dependency.
    pub fn with_default_instance<F>(mut self, default: F) -> Self
    where
        F: Fn() -> Instance + Send + Sync + 'static,
    {
        self.default = Some(Arc::new(default));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared(&self) -> &DeclaredType {
        &self.declared
    }

    /// The abstract name to resolve, when the declared type is not a value.
    pub fn dependency_name(&self) -> Option<&str> {
        match &self.declared {
            DeclaredType::Dependency(name) => Some(name),
            DeclaredType::Value(_) => None,
        }
    }

    pub fn default_value(&self) -> Option<Instance> {
        self.default.as_ref().map(|default| default())
    }
}

impl fmt::Debug for ParameterInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterInfo")
            .field("name", &self.name)
            .field("declared", &self.declared)
            .field("has_default", &self.default.is_some())
            .finish()
    }
}

pub type ConstructorFn = Arc<dyn Fn(Arguments) -> Result<Instance> + Send + Sync>;

#[derive(Clone)]
enum TypeKind {
    Abstract,
    Constructable {
        parameters: Arc<[ParameterInfo]>,
        constructor: ConstructorFn,
    },
}

/// Everything the builder needs to know about one type.
#[derive(Clone)]
pub struct TypeDescriptor {
    name: String,
    kind: TypeKind,
}

impl TypeDescriptor {
    /// Describes `T`, built from its parameters in declaration order.
    pub fn of<T, F>(parameters: Vec<ParameterInfo>, construct: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(Arguments) -> Result<T> + Send + Sync + 'static,
    {
        Self::named(type_key::<T>(), parameters, move |args| {
            construct(args).map(|value| Arc::new(value) as Instance)
        })
    }

    /// Describes a type under an explicit name.
    pub fn named<F>(name: impl Into<String>, parameters: Vec<ParameterInfo>, construct: F) -> Self
    where
        F: Fn(Arguments) -> Result<Instance> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            kind: TypeKind::Constructable {
                parameters: parameters.into(),
                constructor: Arc::new(construct),
            },
        }
    }

    /// A type that exists but can never be constructed, such as a trait.
    pub fn abstract_type<T: ?Sized + 'static>() -> Self {
        Self::abstract_named(type_key::<T>())
    }

    pub fn abstract_named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Abstract,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_instantiable(&self) -> bool {
        matches!(self.kind, TypeKind::Constructable { .. })
    }

    pub fn parameters(&self) -> &[ParameterInfo] {
        match &self.kind {
            TypeKind::Abstract => &[],
            TypeKind::Constructable { parameters, .. } => parameters,
        }
    }

    pub fn construct(&self, arguments: Arguments) -> Result<Instance> {
        match &self.kind {
            TypeKind::Abstract => Err(SingletonizeError::not_instantiable(&self.name)),
            TypeKind::Constructable { constructor, .. } => constructor(arguments),
        }
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("instantiable", &self.is_instantiable())
            .field("parameters", &self.parameters())
            .finish()
    }
}

/// Positional constructor arguments, consumed in declaration order.
pub struct Arguments {
    target: String,
    values: std::vec::IntoIter<(String, Instance)>,
}

impl Arguments {
    pub(crate) fn new(target: impl Into<String>, values: Vec<(String, Instance)>) -> Self {
        Self {
            target: target.into(),
            values: values.into_iter(),
        }
    }

    pub fn empty(target: impl Into<String>) -> Self {
        Self::new(target, Vec::new())
    }

    pub fn remaining(&self) -> usize {
        self.values.len()
    }

    fn next_raw(&mut self) -> Result<(String, Instance)> {
        self.values.next().ok_or_else(|| {
            SingletonizeError::Internal(format!(
                "constructor of [{}] asked for more arguments than it declares",
                self.target
            ))
        })
    }

    fn invalid(&self, parameter: String, expected: &str) -> SingletonizeError {
        SingletonizeError::InvalidArgument {
            target: self.target.clone(),
            parameter,
            expected: expected.to_owned(),
        }
    }

    /// The next argument as a shared concrete object.
    pub fn next_shared<T: Any + Send + Sync>(&mut self) -> Result<Arc<T>> {
        let (parameter, value) = self.next_raw()?;
        value
            .downcast::<T>()
            .map_err(|_| self.invalid(parameter, type_name::<T>()))
    }

    /// The next argument as a shared trait object.
    pub fn next_trait<T: ?Sized + Send + Sync + 'static>(&mut self) -> Result<Arc<T>> {
        let (parameter, value) = self.next_raw()?;
        match value.downcast_ref::<Arc<T>>() {
            Some(inner) => Ok(Arc::clone(inner)),
            None => Err(self.invalid(parameter, type_name::<T>())),
        }
    }

    /// The next argument cloned out as a plain value.
    pub fn next_value<T: Any + Clone>(&mut self) -> Result<T> {
        let (parameter, value) = self.next_raw()?;
        match value.downcast_ref::<T>() {
            Some(inner) => Ok(inner.clone()),
            None => Err(self.invalid(parameter, type_name::<T>())),
        }
    }
}

/// Types that can describe their own constructor.
///
/// This trait is typically implemented via `#[derive(Constructable)]`.
///
/// # Example
/// ```
/// use singletonize::Constructable;
/// use std::sync::Arc;
///
/// #[derive(Constructable)]
/// pub struct Mailer {
///     transport: Arc<Transport>,
///     #[inject(default = 3)]
///     retries: u32,
/// }
///
/// #[derive(Constructable)]
/// pub struct Transport;
/// ```
pub trait Constructable: Any + Send + Sync + Sized {
    fn descriptor() -> TypeDescriptor;
}

/// Finds descriptors by abstract name.
pub trait TypeLocator: Send + Sync {
    fn locate(&self, name: &str) -> Option<TypeDescriptor>;
}

/// The default [`TypeLocator`]: descriptors registered up front.
#[derive(Default)]
pub struct TypeCatalog {
    types: DashMap<String, TypeDescriptor>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T: Constructable>(&self) -> &Self {
        self.insert(T::descriptor())
    }

    pub fn register_abstract<T: ?Sized + 'static>(&self) -> &Self {
        self.insert(TypeDescriptor::abstract_type::<T>())
    }

    pub fn insert(&self, descriptor: TypeDescriptor) -> &Self {
        self.types.insert(descriptor.name().to_owned(), descriptor);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeLocator for TypeCatalog {
    fn locate(&self, name: &str) -> Option<TypeDescriptor> {
        self.types.get(name).map(|entry| entry.value().clone())
    }
}
