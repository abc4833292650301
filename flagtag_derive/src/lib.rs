extern crate proc_macro;

mod generate;
mod load;
mod model;

use crate::model::DeriveFlags;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;

/// Implement `flagtag::Flags` for a struct with named fields.
///
/// Each field becomes a flag, configured through `#[flag(..)]`:
/// * `cli = "n,name"`: the name spec (`*` prefix for required, `!` for force, `-` to ignore the field).
/// Without `cli`, the field identifier in kebab-case is used.
/// * `usage = ".."`, `dft = ".."` (or `default = ".."`), `env = "VAR"`.
/// * `required` (or `required = true`).
/// * `parser = "json"`: decode the value with a structured parser instead of `FlagValue`.
/// * `embed`: declare the flags of a nested `Flags` struct.
/// * `ignore`: exclude the field.
#[proc_macro_derive(Flags, attributes(flag))]
pub fn flags(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);

    DeriveFlags::try_from(input)
        .map(TokenStream2::from)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
