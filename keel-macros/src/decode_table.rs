use syn::{Error, ItemStruct, LitStr, Result};

/// Read `#[keel(table = "...")]` from the struct attributes.
pub(crate) fn decode_table(item: &ItemStruct) -> Result<LitStr> {
    let mut table = None;
    for attr in item.attrs.iter().filter(|a| a.path().is_ident("keel")) {
        attr.parse_nested_meta(|arg| {
            if arg.path.is_ident("table") {
                let value: LitStr = arg.value()?.parse()?;
                if value.value().trim().is_empty() {
                    return Err(arg.error("The table name cannot be empty"));
                }
                table = Some(value);
                Ok(())
            } else {
                Err(arg.error("Unknown attribute, use it like: `#[keel(table = \"my_table\")]`"))
            }
        })?;
    }
    table.ok_or_else(|| {
        Error::new_spanned(
            &item.ident,
            "Missing table name, use it like: `#[keel(table = \"my_table\")]`",
        )
    })
}
