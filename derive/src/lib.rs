//! `#[derive(Inspect)]` for debug-here.
//!
//! The generated impl lives next to the type, so private fields are read
//! like any other field. Structs render as `Name{field: value}`,
//! `Name(a, b)` or `Name`; enum variants as `Name::Variant{...}`.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{parse_macro_input, parse_quote, Data, DeriveInput, Field, Fields};

#[proc_macro_derive(Inspect, attributes(inspect))]
pub fn derive_inspect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let ident = &input.ident;

    let mut generics = input.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(::debug_here::Inspect));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let body = match &input.data {
        Data::Struct(data) => {
            let fields = struct_fields(&data.fields)?;
            quote! {
                ::debug_here::Shape::Composite {
                    name: ::debug_here::type_name_of::<Self>(),
                    fields: #fields,
                }
            }
        }
        Data::Enum(data) if data.variants.is_empty() => quote!(match *self {}),
        Data::Enum(data) => {
            let arms = data
                .variants
                .iter()
                .map(|variant| {
                    let variant_ident = &variant.ident;
                    let variant_name = variant_ident.unraw().to_string();
                    let (pattern, fields) = variant_fields(&variant.fields)?;
                    Ok(quote! {
                        Self::#variant_ident #pattern => ::debug_here::Shape::Composite {
                            name: ::std::format!(
                                "{}::{}",
                                ::debug_here::type_name_of::<Self>(),
                                #variant_name
                            ),
                            fields: #fields,
                        },
                    })
                })
                .collect::<syn::Result<Vec<_>>>()?;
            quote! {
                match self {
                    #(#arms)*
                }
            }
        }
        Data::Union(data) => {
            return Err(syn::Error::new_spanned(
                data.union_token,
                "Inspect cannot be derived for unions",
            ));
        }
    };

    Ok(quote! {
        impl #impl_generics ::debug_here::Inspect for #ident #ty_generics #where_clause {
            fn inspect(&self) -> ::debug_here::Shape {
                #body
            }
        }
    })
}

/// Whether a field carries `#[inspect(debug)]`.
fn uses_debug(field: &Field) -> syn::Result<bool> {
    let mut debug = false;
    for attr in &field.attrs {
        if !attr.path().is_ident("inspect") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("debug") {
                debug = true;
                Ok(())
            } else {
                Err(meta.error("unsupported inspect attribute, expected `debug`"))
            }
        })?;
    }
    Ok(debug)
}

/// Shape expression for a field reachable through the reference `access`.
fn field_value(field: &Field, access: TokenStream2) -> syn::Result<TokenStream2> {
    if uses_debug(field)? {
        Ok(quote!(::debug_here::Inspect::inspect(&::debug_here::Debugged(#access))))
    } else {
        Ok(quote!(::debug_here::Inspect::inspect(#access)))
    }
}

fn named_entry(field: &Field, value: TokenStream2) -> TokenStream2 {
    let name = field
        .ident
        .as_ref()
        .map(|ident| ident.unraw().to_string())
        .unwrap_or_default();
    quote!((::std::string::String::from(#name), #value))
}

fn struct_fields(fields: &Fields) -> syn::Result<TokenStream2> {
    match fields {
        Fields::Named(named) => {
            let entries = named
                .named
                .iter()
                .map(|field| {
                    let ident = &field.ident;
                    let value = field_value(field, quote!(&self.#ident))?;
                    Ok(named_entry(field, value))
                })
                .collect::<syn::Result<Vec<_>>>()?;
            Ok(quote!(::debug_here::Fields::Named(::std::vec![#(#entries),*])))
        }
        Fields::Unnamed(unnamed) => {
            let values = unnamed
                .unnamed
                .iter()
                .enumerate()
                .map(|(i, field)| {
                    let index = syn::Index::from(i);
                    field_value(field, quote!(&self.#index))
                })
                .collect::<syn::Result<Vec<_>>>()?;
            Ok(quote!(::debug_here::Fields::Unnamed(::std::vec![#(#values),*])))
        }
        Fields::Unit => Ok(quote!(::debug_here::Fields::Unit)),
    }
}

/// Match pattern and fields expression for an enum variant. Bindings are
/// references because the match is on `self`.
fn variant_fields(fields: &Fields) -> syn::Result<(TokenStream2, TokenStream2)> {
    match fields {
        Fields::Named(named) => {
            let idents: Vec<_> = named.named.iter().map(|f| &f.ident).collect();
            let entries = named
                .named
                .iter()
                .map(|field| {
                    let ident = &field.ident;
                    let value = field_value(field, quote!(#ident))?;
                    Ok(named_entry(field, value))
                })
                .collect::<syn::Result<Vec<_>>>()?;
            Ok((
                quote!({ #(#idents),* }),
                quote!(::debug_here::Fields::Named(::std::vec![#(#entries),*])),
            ))
        }
        Fields::Unnamed(unnamed) => {
            let bindings: Vec<_> = (0..unnamed.unnamed.len())
                .map(|i| format_ident!("__field{}", i))
                .collect();
            let values = unnamed
                .unnamed
                .iter()
                .zip(&bindings)
                .map(|(field, binding)| field_value(field, quote!(#binding)))
                .collect::<syn::Result<Vec<_>>>()?;
            Ok((
                quote!(( #(#bindings),* )),
                quote!(::debug_here::Fields::Unnamed(::std::vec![#(#values),*])),
            ))
        }
        Fields::Unit => Ok((quote!(), quote!(::debug_here::Fields::Unit))),
    }
}
