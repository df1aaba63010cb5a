use quote::{format_ident, quote};
use proc_macro::TokenStream;
use syn::DeriveInput;

pub enum StorageKind {
    Value,
    Object,
}

pub fn impl_component(ast: &DeriveInput, kind: StorageKind) -> TokenStream {
    let name = &ast.ident;

    if !ast.generics.params.is_empty() {
        return syn::Error::new_spanned(&ast.generics, "generic components are not supported")
            .to_compile_error()
            .into();
    }

    let name_str = name.to_string().to_uppercase();
    let id_name = format_ident!("__STORAGE_TYPE_OF_{}", name_str);

    let (marker, register) = match kind {
        StorageKind::Value => (
            quote!(archetable::components::Component),
            quote!(archetable::components::register_value::<#name>()),
        ),
        StorageKind::Object => (
            quote!(archetable::components::ObjectComponent),
            quote!(archetable::components::register_object::<#name>()),
        ),
    };

    let gen = quote! {
        impl archetable::components::ComponentTypeInfo for #name {
            #[inline(always)]
            fn storage_type() -> archetable::components::StorageType {
                archetable::lazy_static! {
                    static ref #id_name: archetable::components::StorageType = #register;
                }
                *#id_name
            }
        }

        impl #marker for #name {}
    };
    gen.into()
}
