mod attribute;
mod field;
mod flags;

fn conflict_error(field_name: &syn::Ident, first: impl AsRef<str>, second: impl AsRef<str>) -> syn::Error {
    let (first, second) = (first.as_ref(), second.as_ref());
    syn::Error::new(
        field_name.span(),
        format!("Invalid - field cannot be both `{first}` and `{second}`."),
    )
}
