mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// used to define how a struct is filled from result rows,
/// will generate the field descriptor table and slot accessors required by rowscan.
///
/// Fields match columns by their snake_case name unless `#[record(column = "...")]`
/// names the column explicitly. `#[record(skip)]` leaves a field out of the mapping.
/// The struct must implement `Default`.
///
/// # Example
///
/// ```no_rust
/// use rowscan::Record;
///
/// #[derive(Record, Debug, Default)]
/// pub struct BlogPost {
///     pub id: i64,
///     pub title: String,
///     #[record(column = "user_id")]
///     pub author_id: i64,
///     pub published: Option<bool>,
/// }
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn rowscan_record(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    let result = record::handle(ast);
    match result {
        Ok(codegen) => codegen.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
