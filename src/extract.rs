//! Declaration introspection for the hand-written assertion source.
//!
//! This is the frontend of the generator: it parses one source file with
//! `syn` and reduces every selected function to a flat [`AssertionFn`]
//! record (name, doc lines, generics, parameters, return type). Everything
//! downstream is string templating over these records.
//!
//! ## Selection rule
//!
//! A function is selected when it is `pub`, has at least one parameter, and
//! its first parameter names the configured test-context type (after
//! stripping `&`, `&mut`, parens, and `dyn`/`impl` sugar). Private helpers,
//! types, impls, and free functions that do not thread the context are
//! skipped silently.

use syn::{FnArg, Item, Pat, ReturnType, Type, TypeParamBound, Visibility};
use thiserror::Error;

/// Errors that occur while introspecting the assertion source.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("parse error: {0}")]
    Parse(#[from] syn::Error),

    #[error("unsupported declaration: {0}")]
    Unsupported(String),
}

/// Knobs for the selection and qualification rules.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Name of the test-context type threaded through every assertion.
    pub context_type: String,
    /// Types defined next to the assertions that must be path-qualified
    /// when referenced from the generated fail-fast module.
    pub assert_local_types: Vec<String>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            context_type: "TestContext".to_string(),
            assert_local_types: vec!["Comparison".to_string(), "PanicTestFn".to_string()],
        }
    }
}

/// One selected assertion function, reduced to what the templates need.
#[derive(Debug, Clone)]
pub struct AssertionFn {
    /// Function identifier.
    pub name: syn::Ident,
    /// Ordered `///` doc lines, verbatim (leading space preserved).
    pub docs: Vec<String>,
    /// Generic parameters and where-clause, forwarded to the wrappers unchanged.
    pub generics: syn::Generics,
    /// Declared parameters after the context parameter.
    pub params: Vec<Param>,
    /// Declared return type, preserved verbatim for the forwarding wrapper.
    pub output: ReturnType,
}

/// A single `ident: Type` parameter.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: syn::Ident,
    pub ty: Type,
}

impl AssertionFn {
    /// Whether the function returns a plain `bool`.
    ///
    /// Only `bool`-returning assertions get a fail-fast wrapper; anything
    /// else cannot be turned into an abort-on-false call.
    pub fn returns_bool(&self) -> bool {
        match &self.output {
            ReturnType::Type(_, ty) => match ty.as_ref() {
                Type::Path(tp) => tp.qself.is_none() && tp.path.is_ident("bool"),
                _ => false,
            },
            ReturnType::Default => false,
        }
    }
}

/// Parse `source` and collect the assertion records in declaration order.
///
/// A syntax error aborts the whole run. A selected function whose
/// parameters are not plain `ident: Type` pairs (destructuring patterns,
/// `self` receivers after the context) is rejected with
/// [`ExtractError::Unsupported`] rather than silently mis-generated.
pub fn extract_assertions(
    source: &str,
    options: &ExtractOptions,
) -> Result<Vec<AssertionFn>, ExtractError> {
    let file = syn::parse_file(source)?;

    let mut assertions = Vec::new();

    for item in &file.items {
        let Item::Fn(func) = item else { continue };
        if !matches!(func.vis, Visibility::Public(_)) {
            continue;
        }

        let mut inputs = func.sig.inputs.iter();
        let Some(FnArg::Typed(first)) = inputs.next() else {
            continue;
        };
        if !names_context_type(&first.ty, &options.context_type) {
            continue;
        }

        let mut params = Vec::new();
        for arg in inputs {
            let FnArg::Typed(pat_ty) = arg else {
                return Err(ExtractError::Unsupported(format!(
                    "`{}` takes a receiver after the context parameter",
                    func.sig.ident
                )));
            };
            let Pat::Ident(pat) = pat_ty.pat.as_ref() else {
                return Err(ExtractError::Unsupported(format!(
                    "parameter pattern in `{}` is not a plain identifier",
                    func.sig.ident
                )));
            };
            params.push(Param {
                name: pat.ident.clone(),
                ty: (*pat_ty.ty).clone(),
            });
        }

        assertions.push(AssertionFn {
            name: func.sig.ident.clone(),
            docs: doc_lines(&func.attrs),
            generics: func.sig.generics.clone(),
            params,
            output: func.sig.output.clone(),
        });
    }

    Ok(assertions)
}

/// Check whether `ty` names the context type once reference and trait-object
/// sugar is stripped. `&mut TestContext`, `TestContext`, `&mut dyn
/// TestContext`, and `&mut impl TestContext` all match.
fn names_context_type(ty: &Type, context: &str) -> bool {
    match ty {
        Type::Reference(r) => names_context_type(&r.elem, context),
        Type::Paren(p) => names_context_type(&p.elem, context),
        Type::Path(p) => p
            .path
            .segments
            .last()
            .is_some_and(|seg| seg.ident == context),
        Type::TraitObject(obj) => obj.bounds.iter().any(|b| bound_names(b, context)),
        Type::ImplTrait(imp) => imp.bounds.iter().any(|b| bound_names(b, context)),
        _ => false,
    }
}

fn bound_names(bound: &TypeParamBound, context: &str) -> bool {
    match bound {
        TypeParamBound::Trait(t) => t
            .path
            .segments
            .last()
            .is_some_and(|seg| seg.ident == context),
        _ => false,
    }
}

/// Collect the string values of `#[doc = "..."]` attributes, in order.
fn doc_lines(attrs: &[syn::Attribute]) -> Vec<String> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| {
            if let syn::Meta::NameValue(nv) = &attr.meta {
                if let syn::Expr::Lit(lit) = &nv.value {
                    if let syn::Lit::Str(s) = &lit.lit {
                        return Some(s.value());
                    }
                }
            }
            None
        })
        .collect()
}
