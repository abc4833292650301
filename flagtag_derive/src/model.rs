use proc_macro2::TokenStream as TokenStream2;
use std::collections::{HashMap, HashSet};

/// The tokens of an attribute's right hand side, compared by their rendering.
#[derive(Debug)]
pub struct DeriveValue {
    pub tokens: TokenStream2,
}

impl PartialEq for DeriveValue {
    fn eq(&self, other: &Self) -> bool {
        self.tokens.to_string() == other.tokens.to_string()
    }
}

impl Eq for DeriveValue {}

/// Every `#[flag(..)]` entry of a field: bare `words` and `key = value` assignments.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FlagAttributes {
    pub words: HashSet<String>,
    pub assignments: HashMap<String, Vec<DeriveValue>>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum FieldType {
    Flag {
        spec: DeriveValue,
        usage: Option<DeriveValue>,
        default: Option<DeriveValue>,
        env: Option<DeriveValue>,
        parser: Option<DeriveValue>,
        required: bool,
    },
    Embed,
    Ignore,
}

#[derive(Debug, PartialEq, Eq)]
pub struct DeriveField {
    pub field_name: syn::Ident,
    pub field_type: FieldType,
}

#[derive(Debug, PartialEq, Eq)]
pub struct DeriveFlags {
    pub struct_name: syn::Ident,
    pub fields: Vec<DeriveField>,
}
