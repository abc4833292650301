use proc_macro2::TokenStream as TokenStream2;
use quote::quote;

use crate::model::DeriveFlags;

impl From<DeriveFlags> for TokenStream2 {
    fn from(value: DeriveFlags) -> Self {
        let DeriveFlags {
            struct_name,
            fields,
        } = value;
        let declaration = if fields.is_empty() {
            quote! { _declaration }
        } else {
            quote! { declaration }
        };
        let fields = fields.into_iter().map(TokenStream2::from);

        quote! {
            impl ::flagtag::Flags for #struct_name {
                fn declare<'flagtag>(
                    &'flagtag mut self,
                    #declaration: &mut ::flagtag::Declaration<'flagtag>,
                ) {
                    #( #fields )*
                }
            }
        }
    }
}
