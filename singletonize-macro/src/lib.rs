use proc_macro::TokenStream;

mod constructable;

/// Derive macro describing a struct's constructor to the container
///
/// Every named field becomes a constructor parameter, in declaration order.
/// `Arc<T>` and `Arc<dyn Trait>` fields are resolved through the container;
/// any other field must be supplied by the caller or have a default.
///
/// Field attributes:
/// - `#[inject(default)]` falls back to `Default::default()`
/// - `#[inject(default = expr)]` falls back to `expr`
/// - `#[inject(name = "abstract")]` resolves the field under another name
///
/// # Example
/// ```ignore
/// use singletonize::Constructable;
///
/// #[derive(Constructable)]
/// pub struct UserService {
///     repository: Arc<dyn UserRepository>,
///     #[inject(default = 30)]
///     timeout_secs: u64,
/// }
/// ```
#[proc_macro_derive(Constructable, attributes(inject))]
pub fn derive_constructable(input: TokenStream) -> TokenStream {
    constructable::derive_constructable(input)
}
