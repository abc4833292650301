use crate::load::conflict_error;
use crate::model::{DeriveField, DeriveValue, FieldType, FlagAttributes};
use proc_macro2::Literal;
use quote::ToTokens;

const ASSIGNMENT_KEYS: [&str; 7] = ["cli", "usage", "dft", "default", "env", "parser", "required"];
const WORD_KEYS: [&str; 3] = ["required", "embed", "ignore"];
const IGNORE_SPEC: &str = "-";

impl TryFrom<&syn::Field> for DeriveField {
    type Error = syn::Error;

    fn try_from(value: &syn::Field) -> Result<Self, Self::Error> {
        let field_name = value.ident.clone().ok_or_else(|| {
            syn::Error::new_spanned(value, "Invalid - flag fields must be named.")
        })?;
        let mut attributes = FlagAttributes::collect(&value.attrs)?;

        for key in attributes.words.iter() {
            if !WORD_KEYS.contains(&key.as_str()) {
                return Err(unknown_error(&field_name, key));
            }
        }

        for (key, values) in attributes.assignments.iter() {
            if !ASSIGNMENT_KEYS.contains(&key.as_str()) {
                return Err(unknown_error(&field_name, key));
            }

            if values.len() > 1 {
                return Err(syn::Error::new(
                    field_name.span(),
                    format!("Invalid - field cannot repeat `{key} = ..`."),
                ));
            }
        }

        let embed = attributes.words.contains("embed");
        let ignore = attributes.words.contains("ignore");

        if embed && ignore {
            return Err(conflict_error(
                &field_name,
                "#[flag(embed)]",
                "#[flag(ignore)]",
            ));
        }

        if embed || ignore {
            let word = if embed { "embed" } else { "ignore" };

            if attributes.words.contains("required") {
                return Err(conflict_error(
                    &field_name,
                    format!("#[flag({word})]"),
                    "#[flag(required)]",
                ));
            }

            let mut keys: Vec<&String> = attributes.assignments.keys().collect();
            keys.sort();

            if let Some(key) = keys.first() {
                return Err(conflict_error(
                    &field_name,
                    format!("#[flag({word})]"),
                    format!("#[flag({key} = ..)]"),
                ));
            }

            let field_type = if embed {
                FieldType::Embed
            } else {
                FieldType::Ignore
            };
            return Ok(DeriveField {
                field_name,
                field_type,
            });
        }

        if ["dft", "default"]
            .iter()
            .all(|key| attributes.assignments.contains_key(*key))
        {
            return Err(conflict_error(
                &field_name,
                "#[flag(dft = ..)]",
                "#[flag(default = ..)]",
            ));
        }

        let spec = match take(&mut attributes, "cli") {
            Some(spec) => {
                if is_ignore_spec(&spec) {
                    return Ok(DeriveField {
                        field_name,
                        field_type: FieldType::Ignore,
                    });
                }

                spec
            }
            None => DeriveValue {
                tokens: Literal::string(&fallback_spec(&field_name)).into_token_stream(),
            },
        };
        let required = match take(&mut attributes, "required") {
            Some(value) => match syn::parse2::<syn::LitBool>(value.tokens) {
                Ok(literal) => literal.value,
                Err(_) => {
                    return Err(syn::Error::new(
                        field_name.span(),
                        "Invalid - `required = ..` must be a bool literal.",
                    ));
                }
            },
            None => attributes.words.contains("required"),
        };
        let default = take(&mut attributes, "dft").or_else(|| take(&mut attributes, "default"));

        Ok(DeriveField {
            field_name,
            field_type: FieldType::Flag {
                spec,
                usage: take(&mut attributes, "usage"),
                default,
                env: take(&mut attributes, "env"),
                parser: take(&mut attributes, "parser"),
                required,
            },
        })
    }
}

fn take(attributes: &mut FlagAttributes, key: &str) -> Option<DeriveValue> {
    attributes
        .assignments
        .remove(key)
        .and_then(|values| values.into_iter().next())
}

fn unknown_error(field_name: &syn::Ident, key: &str) -> syn::Error {
    syn::Error::new(
        field_name.span(),
        format!("Invalid - unknown attribute `{key}`."),
    )
}

fn is_ignore_spec(spec: &DeriveValue) -> bool {
    syn::parse2::<syn::LitStr>(spec.tokens.clone())
        .map(|literal| literal.value() == IGNORE_SPEC)
        .unwrap_or(false)
}

/// The name spec of a field without `cli`: the identifier, in kebab-case.
fn fallback_spec(field_name: &syn::Ident) -> String {
    let name = field_name.to_string();
    name.strip_prefix("r#")
        .unwrap_or(name.as_str())
        .replace('_', "-")
}
