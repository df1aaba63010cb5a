mod component;

use proc_macro::TokenStream;
use component::StorageKind;

#[proc_macro_derive(Component)]
pub fn derive_component(input: TokenStream) -> TokenStream {
    let ast = syn::parse(input).unwrap();
    component::impl_component(&ast, StorageKind::Value)
}

#[proc_macro_derive(ObjectComponent)]
pub fn derive_object_component(input: TokenStream) -> TokenStream {
    let ast = syn::parse(input).unwrap();
    component::impl_component(&ast, StorageKind::Object)
}
