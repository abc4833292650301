use crate::model::{DeriveValue, FlagAttributes};
use quote::ToTokens;
use syn::punctuated::Punctuated;

pub const ATTRIBUTE: &str = "flag";

impl TryFrom<&syn::Attribute> for FlagAttributes {
    type Error = syn::Error;

    fn try_from(value: &syn::Attribute) -> Result<Self, Self::Error> {
        let entries = value.parse_args_with(
            Punctuated::<syn::Expr, syn::Token![,]>::parse_terminated,
        )?;
        let mut attributes = FlagAttributes::default();

        for entry in entries {
            match &entry {
                syn::Expr::Assign(syn::ExprAssign { left, right, .. }) => {
                    attributes
                        .assignments
                        .entry(left.to_token_stream().to_string())
                        .or_default()
                        .push(DeriveValue {
                            tokens: right.to_token_stream(),
                        });
                }
                syn::Expr::Path(syn::ExprPath { path, .. }) if path.get_ident().is_some() => {
                    attributes.words.insert(path.to_token_stream().to_string());
                }
                other => {
                    let rendered = other.to_token_stream();
                    return Err(syn::Error::new_spanned(
                        other,
                        format!("Unparseable attribute: {rendered}"),
                    ));
                }
            }
        }

        Ok(attributes)
    }
}

impl FlagAttributes {
    /// Collect every `#[flag(..)]` attribute into one.
    pub fn collect(attrs: &[syn::Attribute]) -> Result<Self, syn::Error> {
        let mut merged = FlagAttributes::default();

        for attribute in attrs {
            if attribute.path().is_ident(ATTRIBUTE) {
                let FlagAttributes { words, assignments } =
                    FlagAttributes::try_from(attribute)?;
                merged.words.extend(words);

                for (key, values) in assignments {
                    merged.assignments.entry(key).or_default().extend(values);
                }
            }
        }

        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proc_macro2::Literal;
    use std::collections::{HashMap, HashSet};
    use syn::parse_quote;

    #[test]
    fn construct_attributes_empty() {
        // Setup
        let attribute: syn::Attribute = parse_quote! {
            #[flag()]
        };

        // Execute
        let attributes = FlagAttributes::try_from(&attribute).unwrap();

        // Verify
        assert_eq!(attributes, FlagAttributes::default());
    }

    #[test]
    fn construct_attributes() {
        // Setup
        let attribute: syn::Attribute = parse_quote! {
            #[flag(required, cli = "n,name")]
        };

        // Execute
        let attributes = FlagAttributes::try_from(&attribute).unwrap();

        // Verify
        assert_eq!(
            attributes,
            FlagAttributes {
                words: HashSet::from(["required".to_string()]),
                assignments: HashMap::from([(
                    "cli".to_string(),
                    vec![DeriveValue {
                        tokens: Literal::string("n,name").into_token_stream(),
                    }]
                )])
            }
        );
    }

    #[test]
    fn construct_attributes_multiple() {
        // Setup
        let attribute: syn::Attribute = parse_quote! {
            #[flag(usage = "one", usage = "two")]
        };

        // Execute
        let attributes = FlagAttributes::try_from(&attribute).unwrap();

        // Verify
        assert_eq!(attributes.assignments.get("usage").unwrap().len(), 2);
        assert!(attributes.words.is_empty());
    }

    #[test]
    fn construct_attributes_missing_arguments() {
        let attribute: syn::Attribute = parse_quote! {
            #[flag]
        };

        assert!(FlagAttributes::try_from(&attribute).is_err());
    }

    #[test]
    fn construct_attributes_invalid_expression() {
        let attribute: syn::Attribute = parse_quote! {
            #[flag(1 + 2)]
        };

        let error = FlagAttributes::try_from(&attribute).unwrap_err();
        assert_eq!(error.to_string(), "Unparseable attribute: 1 + 2");
    }

    #[test]
    fn collect() {
        // Setup
        let attrs: Vec<syn::Attribute> = parse_quote! {
            #[flag(cli = "n")]
            #[serde(default)]
            #[flag(required, env = "NAME")]
        };

        // Execute
        let attributes = FlagAttributes::collect(&attrs).unwrap();

        // Verify
        assert_eq!(
            attributes.words,
            HashSet::from(["required".to_string()])
        );
        let mut keys: Vec<&String> = attributes.assignments.keys().collect();
        keys.sort();
        assert_eq!(keys, vec!["cli", "env"]);
    }
}
