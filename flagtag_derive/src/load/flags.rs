use crate::model::{DeriveField, DeriveFlags};

impl TryFrom<syn::DeriveInput> for DeriveFlags {
    type Error = syn::Error;

    fn try_from(value: syn::DeriveInput) -> Result<Self, Self::Error> {
        let struct_name = value.ident.clone();

        if !value.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &value.generics,
                "Invalid - Flags cannot be derived for a generic struct.",
            ));
        }

        match &value.data {
            syn::Data::Struct(syn::DataStruct {
                fields: syn::Fields::Named(ref fields),
                ..
            }) => {
                let fields = fields
                    .named
                    .iter()
                    .map(DeriveField::try_from)
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(DeriveFlags {
                    struct_name,
                    fields,
                })
            }
            syn::Data::Struct(syn::DataStruct {
                fields: syn::Fields::Unit,
                ..
            }) => Ok(DeriveFlags {
                struct_name,
                fields: Vec::default(),
            }),
            _ => Err(syn::Error::new(
                struct_name.span(),
                "Invalid - Flags may only be derived for a struct with named fields.",
            )),
        }
    }
}
