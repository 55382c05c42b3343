//! Proc-macro support for arbor widgets.

use quote::quote;
use syn::{DeriveInput, parse_macro_input};

/// Derive an implementation of the `Stateful` trait for a struct. The struct
/// must have a field named `state` of type `arbor_core::WidgetState`.
#[proc_macro_derive(Stateful)]
pub fn derive_stateful(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let expanded = quote! {
        impl #impl_generics arbor_core::Stateful for #name #ty_generics #where_clause {
            fn state_mut(&mut self) -> &mut arbor_core::WidgetState {
                &mut self.state
            }
            fn state(&self) -> &arbor_core::WidgetState {
                &self.state
            }
        }
    };
    proc_macro::TokenStream::from(expanded)
}
