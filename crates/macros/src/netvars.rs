//! Netvars derive macro implementation

use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::parse::{parse_netvars, FieldLookup, NetvarsArgs};

/// Generate the NetvarSet implementation
pub fn derive_netvars(input: DeriveInput) -> TokenStream {
    match parse_netvars(&input).and_then(generate_impl) {
        Ok(tokens) => tokens,
        Err(e) => e.write_errors(),
    }
}

fn generate_impl(args: NetvarsArgs) -> darling::Result<TokenStream> {
    let struct_name = &args.ident;
    let class_name = args.class_name.as_deref();

    let fields = match args.data {
        darling::ast::Data::Struct(fields) => fields.fields,
        _ => {
            return Err(darling::Error::custom(
                "Netvars can only be derived for structs",
            )
            .with_span(struct_name))
        }
    };

    let mut errors = darling::Error::accumulator();
    let mut initializers = Vec::with_capacity(fields.len());
    let mut entries = Vec::with_capacity(fields.len());

    for field in &fields {
        let Some(field_ident) = field.ident.as_ref() else {
            continue;
        };

        let Some(lookup) = errors.handle(
            field
                .lookup(class_name)
                .map_err(|e| e.with_span(field_ident)),
        ) else {
            continue;
        };

        let init = match lookup {
            FieldLookup::Chained { path } => quote! {
                ::netvars_core::NetvarHandle::new(registry, #path)
            },
            FieldLookup::Scoped { prop, table } => quote! {
                ::netvars_core::NetvarHandle::in_table(registry, #prop, #table)
            },
        };
        let field_name = field_ident.to_string();

        initializers.push(quote! { #field_ident: #init });
        entries.push(quote! { (#field_name, self.#field_ident) });
    }

    errors.finish()?;

    let constants = class_name.map(|class| {
        quote! {
            impl #struct_name {
                /// Root class every field resolves against
                pub const CLASS_NAME: &'static str = #class;
            }
        }
    });

    Ok(quote! {
        #constants

        impl ::netvars_core::NetvarSet for #struct_name {
            fn resolve(registry: &::netvars_core::NetvarRegistry) -> Self {
                Self {
                    #(#initializers),*
                }
            }

            fn handles(&self) -> ::std::vec::Vec<(&'static str, ::netvars_core::NetvarHandle)> {
                ::std::vec![#(#entries),*]
            }
        }
    })
}
