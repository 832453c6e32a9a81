//! Emit the method-forwarding wrapper types.
//!
//! Both wrappers have the same shape: a struct holding the test context and
//! one method per assertion, same name, same generics, forwarding to the
//! free function with the stored context prepended. The `Assertions` wrapper
//! forwards to the assertion functions and keeps their return types; the
//! `Requirements` wrapper forwards to the fail-fast wrappers and returns
//! nothing.

use proc_macro2::TokenStream;
use quote::quote;

use crate::extract::AssertionFn;

use super::require::qualify_assert_types;
use super::{EmitError, Emitter, docs};

/// Which calling convention a forwarding method targets.
#[derive(Clone, Copy)]
enum Flavor {
    Assert,
    Require,
}

impl<'a> Emitter<'a> {
    /// Render `assert/forward.rs`: the `Assertions` wrapper type.
    #[tracing::instrument(skip_all, fields(fn_count = self.assertions.len()))]
    pub fn emit_assert_forward(&self) -> Result<String, EmitError> {
        let context = self.context_ident()?;
        let methods: Vec<TokenStream> = self
            .assertions
            .iter()
            .map(|f| self.forward_method(f, Flavor::Assert))
            .collect();

        let tokens = quote! {
            #![allow(unused_imports)]
            use std::fmt::Debug;
            use std::time::Duration;
            use super::*;

            /// Method-forwarding wrapper over the assertion functions.
            ///
            /// Holds the test context once so call sites read
            /// `assertions.equal(..)` instead of threading the context
            /// through every assertion.
            pub struct Assertions<'t> {
                t: &'t mut #context,
            }

            impl<'t> Assertions<'t> {
                pub fn new(t: &'t mut #context) -> Assertions<'t> {
                    Assertions { t }
                }

                #(#methods)*
            }
        };
        self.render(tokens)
    }

    /// Render `require/forward.rs`: the `Requirements` wrapper type.
    #[tracing::instrument(skip_all, fields(fn_count = self.assertions.len()))]
    pub fn emit_require_forward(&self) -> Result<String, EmitError> {
        let context = self.context_ident()?;
        let methods: Vec<TokenStream> = self
            .require_assertions()
            .map(|f| self.forward_method(f, Flavor::Require))
            .collect();

        let tokens = quote! {
            #![allow(unused_imports)]
            use std::fmt::Debug;
            use std::time::Duration;
            use super::super::assert;
            use super::*;

            /// Method-forwarding wrapper over the fail-fast wrappers.
            ///
            /// Every method aborts the running test on failure instead of
            /// returning a boolean.
            pub struct Requirements<'t> {
                t: &'t mut #context,
            }

            impl<'t> Requirements<'t> {
                pub fn new(t: &'t mut #context) -> Requirements<'t> {
                    Requirements { t }
                }

                #(#methods)*
            }
        };
        self.render(tokens)
    }

    /// One forwarding method: same name and generics as the free function,
    /// context argument replaced by the stored `self.t`.
    fn forward_method(&self, f: &AssertionFn, flavor: Flavor) -> TokenStream {
        let name = &f.name;
        let doc_lines = match flavor {
            Flavor::Assert => docs::drop_context_arg(&f.docs),
            Flavor::Require => docs::drop_context_arg(&docs::retarget_to_require(&f.docs)),
        };
        let (impl_generics, _ty_generics, where_clause) = f.generics.split_for_impl();
        let params: Vec<TokenStream> = f
            .params
            .iter()
            .map(|p| {
                let pname = &p.name;
                let ty = match flavor {
                    Flavor::Assert => p.ty.clone(),
                    Flavor::Require => {
                        qualify_assert_types(&p.ty, &self.options.assert_local_types)
                    }
                };
                quote!(#pname: #ty)
            })
            .collect();
        let args = f.params.iter().map(|p| &p.name);
        let output = match flavor {
            Flavor::Assert => f.output.clone(),
            Flavor::Require => syn::ReturnType::Default,
        };

        quote! {
            #(#[doc = #doc_lines])*
            pub fn #name #impl_generics (&mut self, #(#params),*) #output #where_clause {
                #name(self.t, #(#args),*)
            }
        }
    }
}
