use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse_macro_input, Data, DeriveInput, Expr, Field, Fields, GenericArgument, LitStr,
    PathArguments, Token, Type,
};

pub fn derive_constructable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let expanded = generate_constructable_impl(&input).unwrap_or_else(syn::Error::into_compile_error);
    TokenStream::from(expanded)
}

/// How a field gets its value.
enum FieldKind {
    /// `Arc<T>`
    Shared(Type),
    /// `Arc<dyn Trait>`
    Trait(Type),
    /// Anything else.
    Value,
}

#[derive(Default)]
struct InjectOptions {
    /// `None`: no default. `Some(None)`: `Default::default()`.
    default: Option<Option<Expr>>,
    name: Option<LitStr>,
}

fn generate_constructable_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let data = match &input.data {
        Data::Struct(data) => data,
        _ => {
            return Err(syn::Error::new_spanned(
                struct_name,
                "#[derive(Constructable)] can only be applied to structs",
            ));
        }
    };

    let (parameters, construct) = match &data.fields {
        Fields::Named(fields) => {
            let mut parameters = Vec::new();
            let mut initializers = Vec::new();
            for field in &fields.named {
                let (parameter, initializer) = generate_field(field)?;
                parameters.push(parameter);
                initializers.push(initializer);
            }

            let construct = if initializers.is_empty() {
                quote!(|_| ::std::result::Result::Ok(Self {}))
            } else {
                quote! {
                    |mut args| ::std::result::Result::Ok(Self {
                        #(#initializers),*
                    })
                }
            };
            (parameters, construct)
        }
        Fields::Unit => (Vec::new(), quote!(|_| ::std::result::Result::Ok(Self))),
        Fields::Unnamed(fields) => {
            return Err(syn::Error::new_spanned(
                fields,
                "#[derive(Constructable)] only supports structs with named fields",
            ));
        }
    };

    Ok(quote! {
        impl #impl_generics ::singletonize::di::Constructable for #struct_name #ty_generics #where_clause {
            fn descriptor() -> ::singletonize::di::TypeDescriptor {
                ::singletonize::di::TypeDescriptor::of::<Self, _>(
                    ::std::vec![#(#parameters),*],
                    #construct,
                )
            }
        }
    })
}

/// The `ParameterInfo` expression and the struct initializer for one field.
fn generate_field(field: &Field) -> syn::Result<(TokenStream2, TokenStream2)> {
    let field_name = field
        .ident
        .as_ref()
        .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
    let parameter_name = field_name.to_string();
    let field_type = &field.ty;
    let options = parse_inject_options(field)?;
    let kind = classify(field_type);

    let (info, next) = match (&kind, &options.name) {
        (FieldKind::Value, Some(name)) => {
            return Err(syn::Error::new_spanned(
                name,
                "`name` only applies to Arc<..> fields",
            ));
        }
        (FieldKind::Value, None) => (
            quote!(::singletonize::di::ParameterInfo::value::<#field_type>(#parameter_name)),
            quote!(args.next_value::<#field_type>()?),
        ),
        (FieldKind::Shared(inner), name) => (
            dependency_info(&parameter_name, inner, name.as_ref()),
            quote!(args.next_shared::<#inner>()?),
        ),
        (FieldKind::Trait(inner), name) => (
            dependency_info(&parameter_name, inner, name.as_ref()),
            quote!(args.next_trait::<#inner>()?),
        ),
    };

    let info = match &options.default {
        None => info,
        Some(default) => {
            let value = match default {
                Some(expr) => quote!(#expr),
                None => quote!(::std::default::Default::default()),
            };
            match kind {
                FieldKind::Shared(_) => quote! {
                    #info.with_default_instance(|| {
                        let value: #field_type = #value;
                        value as ::singletonize::di::Instance
                    })
                },
                FieldKind::Trait(_) => quote! {
                    #info.with_default_instance(|| {
                        let value: #field_type = #value;
                        ::singletonize::di::trait_instance(value)
                    })
                },
                FieldKind::Value => quote! {
                    #info.with_default(|| -> #field_type { #value })
                },
            }
        }
    };

    Ok((info, quote!(#field_name: #next)))
}

fn dependency_info(parameter_name: &str, inner: &Type, name: Option<&LitStr>) -> TokenStream2 {
    match name {
        Some(name) => quote!(::singletonize::di::ParameterInfo::named_dependency(#parameter_name, #name)),
        None => quote!(::singletonize::di::ParameterInfo::dependency::<#inner>(#parameter_name)),
    }
}

/// Splits `Arc<T>` / `Arc<dyn Trait>` from plain values.
fn classify(ty: &Type) -> FieldKind {
    if let Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            if segment.ident == "Arc" {
                if let PathArguments::AngleBracketed(args) = &segment.arguments {
                    if let Some(GenericArgument::Type(inner_type)) = args.args.first() {
                        return match inner_type {
                            Type::TraitObject(_) => FieldKind::Trait(inner_type.clone()),
                            _ => FieldKind::Shared(inner_type.clone()),
                        };
                    }
                }
            }
        }
    }

    FieldKind::Value
}

fn parse_inject_options(field: &Field) -> syn::Result<InjectOptions> {
    let mut options = InjectOptions::default();

    for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("inject")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("default") {
                if meta.input.peek(Token![=]) {
                    let expr: Expr = meta.value()?.parse()?;
                    options.default = Some(Some(expr));
                } else {
                    options.default = Some(None);
                }
                Ok(())
            } else if meta.path.is_ident("name") {
                options.name = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("unsupported inject option, expected `default` or `name`"))
            }
        })?;
    }

    Ok(options)
}
