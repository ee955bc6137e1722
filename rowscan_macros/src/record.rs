use darling::{ast::Data, util::Ignored, FromDeriveInput, FromField};
use proc_macro2::{Ident, Span, TokenStream};
use quote::{quote, quote_spanned};
use syn::{ext::IdentExt, spanned::Spanned, DeriveInput, Error, Generics, LitStr, Type};

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(record))]
struct RecordOpts {
    ident: Ident,
    generics: Generics,
    data: Data<Ignored, RecordStructFieldOpt>,
}

#[derive(Debug, FromField)]
#[darling(attributes(record))]
struct RecordStructFieldOpt {
    ident: Option<Ident>,
    ty: Type,
    #[darling(default)]
    column: Option<String>,
    #[darling(default)]
    skip: bool,
}

impl RecordStructFieldOpt {
    /// Name used for matching, without the `r#` prefix of raw identifiers.
    fn field_name(&self) -> Option<LitStr> {
        self.ident
            .as_ref()
            .map(|ident| LitStr::new(&ident.unraw().to_string(), ident.span()))
    }
}

pub(crate) fn handle(ast: DeriveInput) -> Result<TokenStream, Error> {
    let record_opts: RecordOpts = RecordOpts::from_derive_input(&ast)?;

    let struct_name = &record_opts.ident;
    let Data::Struct(data_struct) = record_opts.data else {
        return Err(syn::Error::new_spanned(
            struct_name,
            "enum is not supported",
        ));
    };
    if !data_struct.style.is_struct() && !data_struct.fields.is_empty() {
        return Err(syn::Error::new_spanned(
            struct_name,
            "only structs with named fields are supported",
        ));
    }
    if !record_opts.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &record_opts.generics,
            "generic records are not supported",
        ));
    }

    let mapped_fields = data_struct
        .fields
        .iter()
        .filter(|field| !field.skip)
        .collect::<Vec<_>>();

    for field in data_struct.fields.iter() {
        if field.skip && field.column.is_some() {
            return Err(syn::Error::new(
                field.ident.as_ref().map_or_else(Span::call_site, |i| i.span()),
                "`skip` and `column` cannot be combined",
            ));
        }
    }

    let record_codegen = trait_record_codegen(struct_name, &mapped_fields);
    let element_codegen = trait_element_codegen(struct_name);

    let gen = quote! {

        #record_codegen

        #element_codegen

    };

    Ok(gen)
}

fn trait_record_codegen(struct_name: &Ident, fields: &[&RecordStructFieldOpt]) -> TokenStream {
    let mut descriptor_fields: Vec<TokenStream> = Vec::new();
    let mut slot_fields: Vec<TokenStream> = Vec::new();

    for field in fields.iter() {
        let field_ident = field.ident.as_ref().expect("expect named struct field");
        let field_name = field.field_name().expect("expect named struct field");

        match &field.column {
            Some(column) => descriptor_fields.push(quote! {
                ::rowscan::record::FieldDescriptor::with_column(#field_name, #column),
            }),
            None => descriptor_fields.push(quote! {
                ::rowscan::record::FieldDescriptor::new(#field_name),
            }),
        }

        // point type errors at the offending field rather than the derive
        slot_fields.push(quote_spanned! {field.ty.span()=>
            &mut self.#field_ident as &mut dyn ::rowscan::value::Slot,
        });
    }

    quote! {
        impl ::rowscan::record::Record for #struct_name {
            fn descriptor() -> &'static ::rowscan::record::RecordDescriptor {
                static DESCRIPTOR: ::rowscan::once_cell::sync::Lazy<::rowscan::record::RecordDescriptor> = ::rowscan::once_cell::sync::Lazy::new(|| {
                    ::rowscan::record::RecordDescriptor::new(
                        stringify!(#struct_name),
                        vec![
                            #(#descriptor_fields)*
                        ],
                    )
                });

                &DESCRIPTOR
            }

            fn slots(&mut self) -> ::std::vec::Vec<&mut dyn ::rowscan::value::Slot> {
                vec![
                    #(#slot_fields)*
                ]
            }
        }
    }
}

fn trait_element_codegen(struct_name: &Ident) -> TokenStream {
    quote! {
        impl ::rowscan::record::Element for #struct_name {
            type Record = Self;

            fn from_record(record: Self) -> Self {
                record
            }
        }
    }
}
