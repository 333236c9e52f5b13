mod decode_column;
mod decode_table;

use decode_column::{ColumnMetadata, decode_column};
use decode_table::decode_table;
use proc_macro::TokenStream;
use quote::quote;
use syn::{Error, ItemStruct, parse_macro_input};

/// Derive `keel::Record`: the schema is built once from the `#[keel(...)]` annotations.
///
/// ```ignore
/// #[derive(Record, Default)]
/// #[keel(table = "people")]
/// struct Person {
///     #[keel(column = "id", primary_key)]
///     id: i64,
///     #[keel(column = "name")]
///     name: String,
///     cache: Vec<u8>, // not mapped
/// }
/// ```
#[proc_macro_derive(Record, attributes(keel))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as ItemStruct);
    derive(&item)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}

fn derive(item: &ItemStruct) -> syn::Result<proc_macro2::TokenStream> {
    if !item.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &item.generics,
            "Records cannot have generic parameters",
        ));
    }
    let name = &item.ident;
    let table = decode_table(item)?;
    let columns = item
        .fields
        .iter()
        .filter_map(|f| decode_column(f).transpose())
        .collect::<syn::Result<Vec<_>>>()?;
    match columns.iter().filter(|c| c.primary_key).count() {
        1 => {}
        0 => {
            return Err(Error::new_spanned(
                name,
                "Exactly one field must be marked with `#[keel(primary_key)]`, found none",
            ));
        }
        _ => {
            return Err(Error::new_spanned(
                name,
                "Exactly one field must be marked with `#[keel(primary_key)]`, found more",
            ));
        }
    }
    let columns = columns.iter().map(
        |ColumnMetadata {
             ident,
             ty,
             name: column,
             primary_key,
         }| {
            let method = if *primary_key {
                quote!(primary_key)
            } else {
                quote!(column)
            };
            quote! {
                .#method::<#ty>(
                    #column,
                    |record: &#name| ::std::clone::Clone::clone(&record.#ident),
                    |record: &mut #name, value: #ty| record.#ident = value,
                )
            }
        },
    );
    Ok(quote! {
        impl ::keel::Record for #name {
            fn schema() -> ::keel::Result<&'static ::keel::Schema<Self>> {
                static SCHEMA: ::std::sync::LazyLock<
                    ::std::result::Result<::keel::Schema<#name>, ::keel::Failure>,
                > = ::std::sync::LazyLock::new(|| {
                    ::keel::Schema::<#name>::builder(#table)
                        #(#columns)*
                        .build()
                });
                ::keel::cached_schema(&*SCHEMA)
            }
        }
    })
}
