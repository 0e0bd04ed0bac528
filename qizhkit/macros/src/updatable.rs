//! Mostly stolen from druid-derive
use crate::CRATE;
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::spanned::Spanned;

const BASE_ATTR_PATH: &str = "updatable";
const SKIP_ATTR_PATH: &str = "skip";
const RENAME_ATTR_PATH: &str = "rename";

pub fn derive(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);

    let result = match &input.data {
        syn::Data::Struct(s) => derive_struct(&input, s),
        syn::Data::Enum(e) => Err(syn::Error::new(
            e.enum_token.span(),
            "`Updatable` cannot be derived from enums",
        )),
        syn::Data::Union(u) => Err(syn::Error::new(
            u.union_token.span(),
            "`Updatable` cannot be derived from unions",
        )),
    };

    result.unwrap_or_else(|err| err.to_compile_error()).into()
}

#[derive(Default)]
struct FieldAttrs {
    /// `true` if no lens should be generated for this field.
    skip: bool,
    rename: Option<syn::Ident>,
}

impl FieldAttrs {
    fn parse_ast(field: &syn::Field) -> syn::Result<FieldAttrs> {
        let mut attrs = FieldAttrs::default();
        for attr in field.attrs.iter() {
            if !attr.path().is_ident(BASE_ATTR_PATH) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident(SKIP_ATTR_PATH) {
                    if attrs.skip {
                        return Err(meta.error("duplicate attribute"));
                    }
                    attrs.skip = true;
                    Ok(())
                } else if meta.path.is_ident(RENAME_ATTR_PATH) {
                    if attrs.rename.is_some() {
                        return Err(meta.error("duplicate attribute"));
                    }
                    let name: syn::LitStr = meta.value()?.parse()?;
                    attrs.rename = Some(name.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("unknown attribute"))
                }
            })?;
        }
        if attrs.skip && attrs.rename.is_some() {
            return Err(syn::Error::new(field.span(), "`skip` and `rename` are mutually exclusive"));
        }
        Ok(attrs)
    }
}

fn derive_struct(input: &syn::DeriveInput, s: &syn::DataStruct) -> syn::Result<TokenStream> {
    let ty = &input.ident;
    let vis = &input.vis;

    let fields = match &s.fields {
        syn::Fields::Named(fields_named) => &fields_named.named,
        syn::Fields::Unnamed(fields_unnamed) => &fields_unnamed.unnamed,
        syn::Fields::Unit => {
            return Err(syn::Error::new(
                input.ident.span(),
                "`Updatable` cannot be derived from unit structs",
            ))
        }
    };

    for param in input.generics.params.iter() {
        match param {
            syn::GenericParam::Type(_) => {}
            syn::GenericParam::Lifetime(lifetime) => {
                return Err(syn::Error::new(
                    lifetime.span(),
                    "`Updatable` cannot be derived from types with lifetime parameters",
                ))
            }
            syn::GenericParam::Const(param) => {
                return Err(syn::Error::new(
                    param.span(),
                    "`Updatable` cannot be derived from types with const parameters",
                ))
            }
        }
    }

    // lens types are generic over the type parameters of the struct, without their bounds
    let type_params: Vec<_> = input.generics.type_params().map(|param| &param.ident).collect();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let mut decls = Vec::new();
    let mut impls = Vec::new();
    let mut associated_items = Vec::new();

    for (i, f) in fields.iter().enumerate() {
        let attrs = FieldAttrs::parse_ast(f)?;
        if attrs.skip {
            continue;
        }

        let (name, path_name) = match &f.ident {
            Some(ident) => (ident.clone(), ident.to_string().trim_start_matches("r#").to_owned()),
            None => (syn::Ident::new(&format!("elem_{}", i), Span::call_site()), i.to_string()),
        };
        let name = attrs.rename.unwrap_or(name);
        let lens_ty_name = syn::Ident::new(
            &format!("{}Lens_{}", ty, name.to_string().trim_start_matches("r#")),
            Span::call_site(),
        );
        let debug_name = format!("{}::{}", ty, path_name);
        let lty = &f.ty;
        let access = match &f.ident {
            Some(ident) => {
                quote! { #ident }
            }
            None => {
                let index = syn::Index::from(i);
                quote! { #index }
            }
        };

        let decl = quote! {
            #[allow(non_camel_case_types)]
            #vis struct #lens_ty_name<#(#type_params),*>(::core::marker::PhantomData<fn() -> (#(#type_params,)*)>);

            impl<#(#type_params),*> ::core::clone::Clone for #lens_ty_name<#(#type_params),*> {
                fn clone(&self) -> Self {
                    *self
                }
            }

            impl<#(#type_params),*> ::core::marker::Copy for #lens_ty_name<#(#type_params),*> {}

            impl<#(#type_params),*> ::core::fmt::Debug for #lens_ty_name<#(#type_params),*> {
                fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
                    f.write_str(#debug_name)
                }
            }
        };
        decls.push(decl);

        let lens_impl = quote! {
            impl #impl_generics #CRATE::Lens<#ty #ty_generics, #lty> for #lens_ty_name<#(#type_params),*> #where_clause {
                fn with<__R, __F: FnOnce(&#lty) -> __R>(&self, data: &#ty #ty_generics, f: __F) -> __R {
                    f(&data.#access)
                }

                fn with_mut<__R, __F: FnOnce(&mut #lty) -> __R>(&self, data: &mut #ty #ty_generics, f: __F) -> __R {
                    f(&mut data.#access)
                }

                fn path(&self) -> #CRATE::FieldPath {
                    #CRATE::FieldPath::field(#path_name)
                }
            }
        };
        impls.push(lens_impl);

        let field_vis = &f.vis;
        let assoc_item = quote! {
            #field_vis const #name: #lens_ty_name<#(#type_params),*> = #lens_ty_name(::core::marker::PhantomData);
        };
        associated_items.push(assoc_item);
    }

    // `Updatable` requires `Clone`, which for generic types usually depends on the parameters
    let mut updatable_generics = input.generics.clone();
    if !type_params.is_empty() {
        updatable_generics
            .make_where_clause()
            .predicates
            .push(syn::parse_quote!(#ty #ty_generics: ::core::clone::Clone));
    }
    let (updatable_impl_generics, _, updatable_where_clause) = updatable_generics.split_for_impl();

    let expanded = quote! {
        #(#decls)*
        #(#impls)*

        #[allow(non_upper_case_globals)]
        impl #impl_generics #ty #ty_generics #where_clause {
            #(#associated_items)*
        }

        impl #updatable_impl_generics #CRATE::Updatable for #ty #ty_generics #updatable_where_clause {}
    };

    Ok(expanded)
}
