use quote::ToTokens;
use syn::{Field, Ident, LitStr, Result, Type};

pub(crate) struct ColumnMetadata {
    pub(crate) ident: Ident,
    pub(crate) ty: Type,
    pub(crate) name: LitStr,
    pub(crate) primary_key: bool,
}

/// Decode the `#[keel(column = "...", primary_key)]` attribute of a field.
///
/// Fields without a `column` are not mapped and yield `None`.
pub(crate) fn decode_column(field: &Field) -> Result<Option<ColumnMetadata>> {
    let mut name: Option<LitStr> = None;
    let mut primary_key = false;
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("keel")) {
        attr.parse_nested_meta(|arg| {
            if arg.path.is_ident("column") {
                let value: LitStr = arg.value()?.parse()?;
                if value.value().trim().is_empty() {
                    return Err(arg.error("The column name cannot be empty"));
                }
                name = Some(value);
            } else if arg.path.is_ident("primary_key") {
                if arg.input.peek(syn::Token![=]) {
                    return Err(arg.error("Use it like: `#[keel(primary_key)]`"));
                }
                primary_key = true;
            } else {
                return Err(arg.error(
                    "Unknown attribute, use it like: `#[keel(column = \"my_column\", primary_key)]`",
                ));
            }
            Ok(())
        })?;
    }
    let Some(name) = name else {
        if primary_key {
            let spanned: &dyn ToTokens = match &field.ident {
                Some(ident) => ident,
                None => &field.ty,
            };
            return Err(syn::Error::new_spanned(
                spanned,
                "The primary key must also declare its column: `#[keel(column = \"id\", primary_key)]`",
            ));
        }
        return Ok(None);
    };
    let Some(ident) = field.ident.clone() else {
        return Err(syn::Error::new_spanned(field, "Only named fields can be mapped"));
    };
    Ok(Some(ColumnMetadata {
        ident,
        ty: field.ty.clone(),
        name,
        primary_key,
    }))
}
