//! Emit the fail-fast wrapper module.
//!
//! The generated `require/mod.rs` mirrors the assertion functions one to
//! one, but aborts the running test instead of returning `false`: each
//! wrapper calls the assertion and invokes `fail_now` on the context when it
//! fails. Only `bool`-returning assertions get a wrapper.
//!
//! Types defined next to the assertions (the `assert_local_types` list) are
//! path-qualified with the `assert` module when they appear in wrapper
//! signatures, since the generated module lives outside it.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{GenericArgument, PathArguments, Type};

use crate::extract::AssertionFn;

use super::{EmitError, Emitter, docs};

impl<'a> Emitter<'a> {
    /// The records that get fail-fast wrappers.
    pub(super) fn require_assertions(&self) -> impl Iterator<Item = &AssertionFn> {
        self.assertions.iter().filter(|f| f.returns_bool())
    }

    /// Render `require/mod.rs`: the fail-fast wrapper module.
    #[tracing::instrument(skip_all, fields(fn_count = self.assertions.len()))]
    pub fn emit_require_module(&self) -> Result<String, EmitError> {
        let context = self.context_ident()?;
        let fns: Vec<TokenStream> = self
            .require_assertions()
            .map(|f| self.require_fn(f, &context))
            .collect();

        let tokens = quote! {
            #![allow(unused_imports)]
            use std::fmt::Debug;
            use std::time::Duration;
            use super::assert;
            pub use super::assert::#context;

            mod forward;
            pub use forward::Requirements;

            /// Report a failure through the assertion context, then abort
            /// the running test.
            pub fn fail_now(t: &mut #context, failure_message: &str) {
                assert::fail(t, failure_message);
                t.fail_now();
            }

            #(#fns)*
        };
        self.render(tokens)
    }

    /// One fail-fast wrapper: same signature minus the `bool` return, body
    /// aborts the test when the assertion fails.
    fn require_fn(&self, f: &AssertionFn, context: &syn::Ident) -> TokenStream {
        let name = &f.name;
        let doc_lines = docs::retarget_to_require(&f.docs);
        let (impl_generics, _ty_generics, where_clause) = f.generics.split_for_impl();
        let params: Vec<TokenStream> = f
            .params
            .iter()
            .map(|p| {
                let pname = &p.name;
                let ty = qualify_assert_types(&p.ty, &self.options.assert_local_types);
                quote!(#pname: #ty)
            })
            .collect();
        let args = f.params.iter().map(|p| &p.name);

        quote! {
            #(#[doc = #doc_lines])*
            pub fn #name #impl_generics (t: &mut #context, #(#params),*) #where_clause {
                if !assert::#name(t, #(#args),*) {
                    t.fail_now();
                }
            }
        }
    }
}

/// Rewrite bare references to assert-local types into `assert::`-qualified
/// paths, recursing through references, slices, arrays, tuples, and generic
/// arguments.
pub(super) fn qualify_assert_types(ty: &Type, local_types: &[String]) -> Type {
    match ty {
        Type::Path(tp) if tp.qself.is_none() => {
            if tp.path.segments.len() == 1 {
                let segment = &tp.path.segments[0];
                if local_types.iter().any(|name| segment.ident == name) {
                    let segment = segment.clone();
                    return syn::parse_quote!(assert::#segment);
                }
            }
            let mut tp = tp.clone();
            for segment in tp.path.segments.iter_mut() {
                if let PathArguments::AngleBracketed(args) = &mut segment.arguments {
                    for arg in args.args.iter_mut() {
                        if let GenericArgument::Type(inner) = arg {
                            *inner = qualify_assert_types(inner, local_types);
                        }
                    }
                }
            }
            Type::Path(tp)
        }
        Type::Reference(r) => {
            let mut r = r.clone();
            r.elem = Box::new(qualify_assert_types(&r.elem, local_types));
            Type::Reference(r)
        }
        Type::Slice(s) => {
            let mut s = s.clone();
            s.elem = Box::new(qualify_assert_types(&s.elem, local_types));
            Type::Slice(s)
        }
        Type::Array(a) => {
            let mut a = a.clone();
            a.elem = Box::new(qualify_assert_types(&a.elem, local_types));
            Type::Array(a)
        }
        Type::Paren(p) => {
            let mut p = p.clone();
            p.elem = Box::new(qualify_assert_types(&p.elem, local_types));
            Type::Paren(p)
        }
        Type::Tuple(t) => {
            let mut t = t.clone();
            for elem in t.elems.iter_mut() {
                *elem = qualify_assert_types(elem, local_types);
            }
            Type::Tuple(t)
        }
        other => other.clone(),
    }
}
