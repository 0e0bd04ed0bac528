//! Implementation of `#[derive(Updatable)]`
extern crate proc_macro;
use proc_macro2::Span;
use quote::{ToTokens, TokenStreamExt};

mod updatable;

//--------------------------------------------------------------------------------------------------
struct CrateName;
const CRATE: CrateName = CrateName;

impl ToTokens for CrateName {
    fn to_tokens(&self, tokens: &mut proc_macro2::TokenStream) {
        tokens.append(syn::Ident::new("qizhkit", Span::call_site()))
    }
}

//--------------------------------------------------------------------------------------------------

/// Implements `Updatable` for a struct, and generates a lens for each of its fields.
///
/// The lenses are available as associated constants named after the fields
/// (`elem_0`, `elem_1`, ... for tuple structs).
///
/// # Field attributes
/// - `#[updatable(skip)]`: don't generate a lens for this field.
/// - `#[updatable(rename = "name")]`: name of the associated constant.
///
/// # Examples
///```ignore
/// #[derive(Clone, Updatable)]
/// struct Settings {
///     count: i32,
///     tags: Vec<String>,
/// }
///
/// let settings = Settings::default().updating_field(Settings::count, 5);
///```
#[proc_macro_derive(Updatable, attributes(updatable))]
pub fn derive_updatable(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    updatable::derive(input)
}
