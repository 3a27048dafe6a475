use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput, Field};

/// Derives `intake_di::Build` for a struct whose fields can all be built by
/// the provider.
///
/// Fields marked with `#[state]` are initialized with `Default::default()`
/// instead. Because built values are cached by the provider, such state is
/// shared between all clones handed out by the same provider.
#[proc_macro_derive(Build, attributes(state))]
pub fn derive_build(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let ident = input.ident;

    let generics = input
        .generics
        .type_params()
        .map(|x| &x.ident)
        .collect::<Vec<_>>();

    let ty_generics = if generics.is_empty() {
        quote! {}
    } else {
        quote! { <#(#generics),*> }
    };

    let syn::Data::Struct(data) = input.data else {
        return quote! { ::core::compile_error!("Build can only be derived for structs"); }.into();
    };

    fn is_state(field: &Field) -> bool {
        field
            .attrs
            .iter()
            .any(|x| x.path().get_ident().is_some_and(|x| x == "state"))
    }

    let bounds = data
        .fields
        .iter()
        .filter(|x| !is_state(x))
        .map(|Field { ty, .. }| quote! { #ty: ::intake_di::Build<__Provider> })
        .collect::<Vec<_>>();

    let build_expr = match data.fields {
        syn::Fields::Named(fields) => {
            let fields = fields.named.iter().map(|f @ Field { ident, .. }| {
                if is_state(f) {
                    quote! { #ident: ::core::default::Default::default() }
                } else {
                    quote! { #ident: ::intake_di::Build::build(provider) }
                }
            });
            quote! { Self { #(#fields),* } }
        }
        syn::Fields::Unnamed(fields) => {
            let fields = fields.unnamed.iter().map(|f| {
                if is_state(f) {
                    quote! { ::core::default::Default::default() }
                } else {
                    quote! { ::intake_di::Build::build(provider) }
                }
            });
            quote! { Self( #(#fields),* ) }
        }
        syn::Fields::Unit => quote! { Self },
    };

    quote! {
        impl<__Provider, #(#generics),*> ::intake_di::Build<__Provider> for #ident #ty_generics
        where
            Self: ::core::clone::Clone + 'static,
            __Provider: ::intake_di::Provider,
            #(#bounds),*
        {
            fn build(provider: &mut __Provider) -> Self {
                if let ::core::option::Option::Some(cached) =
                    ::intake_di::Provider::cache(provider).get::<Self>()
                {
                    return ::core::clone::Clone::clone(cached);
                }
                let built: Self = #build_expr;
                ::intake_di::Provider::cache(provider).insert(::core::clone::Clone::clone(&built));
                built
            }
        }
    }
    .into()
}
