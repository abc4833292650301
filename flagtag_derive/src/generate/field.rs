use proc_macro2::TokenStream as TokenStream2;
use quote::quote;

use crate::model::{DeriveField, DeriveValue, FieldType};

impl From<DeriveField> for TokenStream2 {
    fn from(value: DeriveField) -> Self {
        let DeriveField {
            field_name,
            field_type,
        } = value;

        match field_type {
            FieldType::Flag {
                spec,
                usage,
                default,
                env,
                parser,
                required,
            } => {
                let spec = spec.tokens;
                let constructor = match parser {
                    Some(DeriveValue { tokens }) => quote! {
                        ::flagtag::Flag::structured(&mut self.#field_name, #spec, #tokens)
                    },
                    None => quote! {
                        ::flagtag::Flag::new(&mut self.#field_name, #spec)
                    },
                };
                let usage = usage.map(|DeriveValue { tokens }| quote! { .usage(#tokens) });
                let default = default.map(|DeriveValue { tokens }| quote! { .default(#tokens) });
                let env = env.map(|DeriveValue { tokens }| quote! { .env(#tokens) });
                let required = required.then(|| quote! { .required() });

                quote! {
                    declaration.add(#constructor #usage #default #env #required);
                }
            }
            FieldType::Embed => quote! {
                declaration.embed(&mut self.#field_name);
            },
            FieldType::Ignore => TokenStream2::default(),
        }
    }
}
